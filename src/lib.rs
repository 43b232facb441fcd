//! indivo-admin: administrative tooling for an Indivo medical records server
//!
//! Resolves the XML schema and XSL transform bundled for each document type,
//! and describes the admin panel's model registry and cross-record links.

pub mod admin;
pub mod cli;
pub mod core;
