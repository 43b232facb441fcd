//! Schema and transform file resolution
//!
//! Each schema root holds one subdirectory per document type, bundling the
//! type's `schema.xsd` and (optionally) its `transform.xsl`. Given a
//! document type, the resolver scans the roots in priority order (contrib
//! before core) and returns the first file whose content mentions the
//! type's local name.
//!
//! Nothing is cached: every lookup rescans the filesystem.

use miette::Diagnostic;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use crate::core::config::Config;
use crate::core::document_type::{DocumentType, DocumentTypeError};
use crate::core::html;

/// Default upper bound on root entries examined per lookup
pub const DEFAULT_MAX_CANDIDATES: usize = 10_000;

/// Which file of a schema bundle to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Schema,
    Transform,
}

impl FileKind {
    /// File name inside a schema bundle directory
    pub fn file_name(self) -> &'static str {
        match self {
            FileKind::Schema => "schema.xsd",
            FileKind::Transform => "transform.xsl",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Schema => write!(f, "schema"),
            FileKind::Transform => write!(f, "transform"),
        }
    }
}

/// Search tier of a schema root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Site-specific schemas, searched first
    Contrib,
    /// Schemas shipped with the server
    Core,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Contrib => write!(f, "contrib"),
            Tier::Core => write!(f, "core"),
        }
    }
}

/// A directory containing schema bundle subdirectories
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaRoot {
    pub path: PathBuf,
    pub tier: Tier,
}

/// A file found by the resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFile {
    pub path: PathBuf,
    pub content: String,
}

impl ResolvedFile {
    /// Bold path label followed by the escaped content
    pub fn to_html(&self) -> String {
        format!(
            "<b>{}</b><br/><pre>{}</pre>",
            html::escape(&self.path.display().to_string()),
            html::escape(&self.content)
        )
    }
}

/// Errors surfaced by a lookup
#[derive(Debug, Error, Diagnostic)]
pub enum ResolveError {
    #[error("invalid document type: {0}")]
    #[diagnostic(
        code(indivo_admin::resolver::invalid_document_type),
        help("document types end in a '#' fragment, e.g. http://indivo.org/vocab/xml/documents#Medication")
    )]
    InvalidDocumentType(#[from] DocumentTypeError),

    #[error("No {file} found for '{local_name}' in: {}", display_roots(.roots))]
    #[diagnostic(
        code(indivo_admin::resolver::not_found),
        help("check the configured schema roots with `indivo-admin roots`")
    )]
    NotFound {
        file: &'static str,
        local_name: String,
        roots: Vec<PathBuf>,
    },

    #[error("cannot read schema root {}: {source}", .root.display())]
    #[diagnostic(code(indivo_admin::resolver::io_failure))]
    IoFailure {
        root: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("scan limit exceeded: more than {limit} root entries")]
    #[diagnostic(
        code(indivo_admin::resolver::scan_limit),
        help("raise `max_candidates` in the configuration or prune the schema roots")
    )]
    ScanLimitExceeded { limit: usize },
}

fn display_roots(roots: &[PathBuf]) -> String {
    if roots.is_empty() {
        return "(no schema roots configured)".to_string();
    }
    roots
        .iter()
        .map(|r| r.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Locates schema bundle files across an ordered list of roots
#[derive(Debug, Clone)]
pub struct Resolver {
    roots: Vec<SchemaRoot>,
    max_candidates: usize,
    legacy_candidacy: bool,
}

impl Resolver {
    /// Create a resolver searching `contrib` roots before `core` roots
    pub fn new(contrib: Vec<PathBuf>, core: Vec<PathBuf>) -> Self {
        let roots = contrib
            .into_iter()
            .map(|path| SchemaRoot {
                path,
                tier: Tier::Contrib,
            })
            .chain(core.into_iter().map(|path| SchemaRoot {
                path,
                tier: Tier::Core,
            }))
            .collect();

        Self {
            roots,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            legacy_candidacy: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.contrib_roots(), config.core_roots())
            .with_max_candidates(config.max_candidates())
            .with_legacy_candidacy(config.legacy_candidacy())
    }

    pub fn with_max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = max;
        self
    }

    /// When enabled, a directory qualifies only if it holds `schema.xsd`,
    /// even when resolving a transform.
    pub fn with_legacy_candidacy(mut self, enabled: bool) -> Self {
        self.legacy_candidacy = enabled;
        self
    }

    /// Roots in search order
    pub fn roots(&self) -> &[SchemaRoot] {
        &self.roots
    }

    /// Find the first bundle file of `kind` whose content mentions the
    /// document type's local name.
    pub fn locate(&self, document_type: &str, kind: FileKind) -> Result<ResolvedFile, ResolveError> {
        let doc_type = DocumentType::parse(document_type)?;
        self.locate_type(&doc_type, kind)
    }

    pub fn locate_type(
        &self,
        doc_type: &DocumentType,
        kind: FileKind,
    ) -> Result<ResolvedFile, ResolveError> {
        let local_name = doc_type.local_name();
        let target = kind.file_name();
        let marker = if self.legacy_candidacy {
            FileKind::Schema.file_name()
        } else {
            target
        };

        let mut scanned = 0usize;
        for root in &self.roots {
            debug!(root = %root.path.display(), tier = %root.tier, local_name, "scanning schema root");

            if let Some(found) = self.scan_root(root, marker, target, local_name, &mut scanned)? {
                return Ok(found);
            }
        }

        Err(ResolveError::NotFound {
            file: target,
            local_name: local_name.to_string(),
            roots: self.roots.iter().map(|r| r.path.clone()).collect(),
        })
    }

    /// Displayable result for embedding in an admin detail page.
    ///
    /// Every outcome, including errors, becomes HTML-safe text.
    pub fn render(&self, document_type: &str, kind: FileKind) -> String {
        match self.locate(document_type, kind) {
            Ok(file) => file.to_html(),
            Err(e) => html::escape(&e.to_string()),
        }
    }

    /// Scan the immediate subdirectories of `root` in file name order.
    ///
    /// Every listed entry counts toward the scan limit, so the bound holds
    /// before any per-entry filesystem checks are made.
    fn scan_root(
        &self,
        root: &SchemaRoot,
        marker: &str,
        target: &str,
        local_name: &str,
        scanned: &mut usize,
    ) -> Result<Option<ResolvedFile>, ResolveError> {
        if !root_exists(root)? {
            return Ok(None);
        }

        let walker = WalkDir::new(&root.path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if is_root_error(&err, &root.path) => {
                    return Err(ResolveError::IoFailure {
                        root: root.path.clone(),
                        source: err.into(),
                    });
                }
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            *scanned += 1;
            if *scanned > self.max_candidates {
                return Err(ResolveError::ScanLimitExceeded {
                    limit: self.max_candidates,
                });
            }

            // is_dir() follows symlinks, so linked bundles still count
            let dir = entry.path();
            if !dir.is_dir() || !dir.join(marker).is_file() {
                continue;
            }

            let path = dir.join(target);
            let content = match fs::read(&path) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable candidate");
                    continue;
                }
            };

            trace!(path = %path.display(), "checking candidate");
            if content.contains(local_name) {
                debug!(path = %path.display(), "resolved");
                return Ok(Some(ResolvedFile { path, content }));
            }
        }

        Ok(None)
    }
}

/// Whether a root is an existing directory worth listing.
///
/// Missing roots, roots under a regular file, dangling links and plain files
/// are skipped. A root that is present but cannot be resolved or stat'ed
/// (permissions, symlink loops) is an `IoFailure`.
fn root_exists(root: &SchemaRoot) -> Result<bool, ResolveError> {
    let io_failure = |source: io::Error| ResolveError::IoFailure {
        root: root.path.clone(),
        source,
    };

    match fs::symlink_metadata(&root.path) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => return Err(io_failure(e)),
        Err(e) => {
            debug!(root = %root.path.display(), error = %e, "schema root does not exist, skipping");
            return Ok(false);
        }
    }

    match fs::metadata(&root.path) {
        Ok(meta) if meta.is_dir() => Ok(true),
        Ok(_) => {
            debug!(root = %root.path.display(), "schema root is not a directory, skipping");
            Ok(false)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(root = %root.path.display(), "schema root is a dangling link, skipping");
            Ok(false)
        }
        Err(e) => Err(io_failure(e)),
    }
}

fn is_root_error(err: &walkdir::Error, root: &Path) -> bool {
    err.depth() == 0 || err.path() == Some(root)
}
