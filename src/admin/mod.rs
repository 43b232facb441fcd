//! Admin panel configuration - model registry, URL reversal, and link fragments

pub mod display;
pub mod registry;
pub mod urls;

pub use display::{document_sidebar, ProviderName, Sidebar};
pub use registry::{AdminRegistry, ModelAdmin};
pub use urls::{AdminUrls, App};
