//! Core module - document types, configuration, and schema resolution

pub mod config;
pub mod document_type;
pub mod html;
pub mod resolver;

pub use config::{Config, ConfigError};
pub use document_type::{DocumentType, DocumentTypeError};
pub use resolver::{FileKind, ResolveError, ResolvedFile, Resolver, SchemaRoot, Tier};
