//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::{Config, Resolver};

/// Load layered configuration, then apply command-line root overrides
///
/// Roots given on the command line replace the configured roots of that tier.
pub fn load_config(global: &GlobalOpts) -> Result<Config> {
    let mut config =
        Config::load(global.config.as_deref()).map_err(|e| miette::miette!("{}", e))?;

    if !global.contrib_roots.is_empty() {
        config.contrib_schema_roots = Some(global.contrib_roots.clone());
    }
    if !global.core_roots.is_empty() {
        config.core_schema_roots = Some(global.core_roots.clone());
    }

    Ok(config)
}

/// Build a resolver from the effective configuration
pub fn resolver(global: &GlobalOpts) -> Result<Resolver> {
    Ok(Resolver::from_config(&load_config(global)?))
}

/// Truncate a string to max_len, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
