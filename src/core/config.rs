//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::resolver::DEFAULT_MAX_CANDIDATES;

/// Project config file name, discovered by walking up from the working directory
pub const PROJECT_CONFIG_FILE: &str = "indivo-admin.yaml";

pub const ENV_CONTRIB_ROOTS: &str = "INDIVO_CONTRIB_SCHEMA_ROOTS";
pub const ENV_CORE_ROOTS: &str = "INDIVO_CORE_SCHEMA_ROOTS";
pub const ENV_DEV_MODE: &str = "INDIVO_ADMIN_DEV_MODE";

const DEFAULT_ADMIN_PREFIX: &str = "/admin";

/// Admin tooling configuration with layered hierarchy
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site-specific schema roots, searched first
    pub contrib_schema_roots: Option<Vec<PathBuf>>,

    /// Schema roots shipped with the server
    pub core_schema_roots: Option<Vec<PathBuf>>,

    /// Upper bound on root entries examined per lookup
    pub max_candidates: Option<usize>,

    /// Require schema.xsd in a candidate even when resolving transforms
    pub legacy_candidacy: Option<bool>,

    /// URL prefix the admin site is mounted under
    pub admin_prefix: Option<String>,

    /// Expose account secrets in the admin forms
    pub development_mode: Option<bool>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order.
    ///
    /// `explicit` names a config file that must exist and parse; without it
    /// the nearest `indivo-admin.yaml` above the working directory is used
    /// if present.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/indivo-admin/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                match Self::from_file(&global_path) {
                    Ok(global) => config.merge(global),
                    Err(e) => warn!("ignoring global config: {}", e),
                }
            }
        }

        // 3. Project config
        if let Some(path) = explicit {
            config.merge(Self::from_file(path)?);
        } else if let Some(path) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_from(&cwd))
        {
            match Self::from_file(&path) {
                Ok(project) => config.merge(project),
                Err(e) => warn!("ignoring project config: {}", e),
            }
        }

        // 4. Environment variables
        config.apply_env(|key| std::env::var_os(key));

        Ok(config)
    }

    /// Read and parse a single config file
    ///
    /// Relative schema roots are resolved against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        let mut config: Config =
            serde_yml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(base) = path.parent() {
            config.anchor_roots(base);
        }
        Ok(config)
    }

    fn anchor_roots(&mut self, base: &Path) {
        let anchor = |roots: &mut Vec<PathBuf>| {
            for root in roots.iter_mut() {
                if root.is_relative() {
                    *root = base.join(&*root);
                }
            }
        };
        if let Some(roots) = self.contrib_schema_roots.as_mut() {
            anchor(roots);
        }
        if let Some(roots) = self.core_schema_roots.as_mut() {
            anchor(roots);
        }
    }

    /// Find the project config file by walking up from the given directory
    pub fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(PROJECT_CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "indivo-admin")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Apply environment overrides; root lists use the platform path-list syntax
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<OsString>,
    {
        if let Some(value) = var(ENV_CONTRIB_ROOTS) {
            self.contrib_schema_roots = Some(std::env::split_paths(&value).collect());
        }
        if let Some(value) = var(ENV_CORE_ROOTS) {
            self.core_schema_roots = Some(std::env::split_paths(&value).collect());
        }
        if let Some(value) = var(ENV_DEV_MODE) {
            let value = value.to_string_lossy().to_ascii_lowercase();
            self.development_mode = Some(matches!(value.as_str(), "1" | "true" | "yes" | "on"));
        }
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(&mut self, other: Config) {
        if other.contrib_schema_roots.is_some() {
            self.contrib_schema_roots = other.contrib_schema_roots;
        }
        if other.core_schema_roots.is_some() {
            self.core_schema_roots = other.core_schema_roots;
        }
        if other.max_candidates.is_some() {
            self.max_candidates = other.max_candidates;
        }
        if other.legacy_candidacy.is_some() {
            self.legacy_candidacy = other.legacy_candidacy;
        }
        if other.admin_prefix.is_some() {
            self.admin_prefix = other.admin_prefix;
        }
        if other.development_mode.is_some() {
            self.development_mode = other.development_mode;
        }
    }

    pub fn contrib_roots(&self) -> Vec<PathBuf> {
        self.contrib_schema_roots.clone().unwrap_or_default()
    }

    pub fn core_roots(&self) -> Vec<PathBuf> {
        self.core_schema_roots.clone().unwrap_or_default()
    }

    pub fn max_candidates(&self) -> usize {
        self.max_candidates.unwrap_or(DEFAULT_MAX_CANDIDATES)
    }

    pub fn legacy_candidacy(&self) -> bool {
        self.legacy_candidacy.unwrap_or(false)
    }

    pub fn admin_prefix(&self) -> &str {
        self.admin_prefix.as_deref().unwrap_or(DEFAULT_ADMIN_PREFIX)
    }

    pub fn development_mode(&self) -> bool {
        self.development_mode.unwrap_or(false)
    }
}

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yml::Error,
    },
}
