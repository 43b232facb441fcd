//! CLI command implementations

pub mod completions;
pub mod links;
pub mod locate;
pub mod models;
pub mod roots;
pub mod show;
