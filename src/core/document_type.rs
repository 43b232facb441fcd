//! Document type identifiers
//!
//! Documents are typed by a URI such as
//! `http://indivo.org/vocab/xml/documents#SimpleClinicalNote`. Only the
//! fragment after the last `#` (the local name) is used when searching
//! schema directories.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A parsed document type identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentType {
    raw: String,
    split: usize,
}

impl DocumentType {
    /// Parse a document type, requiring a non-empty `#fragment`
    pub fn parse(s: &str) -> Result<Self, DocumentTypeError> {
        if s.trim().is_empty() {
            return Err(DocumentTypeError::Empty);
        }

        let split = s
            .rfind('#')
            .ok_or_else(|| DocumentTypeError::MissingFragment(s.to_string()))?;

        // A blank local name is a substring of nearly every file
        if s[split + 1..].trim().is_empty() {
            return Err(DocumentTypeError::EmptyFragment(s.to_string()));
        }

        Ok(Self {
            raw: s.to_string(),
            split,
        })
    }

    /// The part after the last `#`
    pub fn local_name(&self) -> &str {
        &self.raw[self.split + 1..]
    }

    /// The part before the last `#`
    pub fn namespace(&self) -> &str {
        &self.raw[..self.split]
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for DocumentType {
    type Err = DocumentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Errors from parsing a document type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentTypeError {
    #[error("document type is empty")]
    Empty,

    #[error("document type '{0}' has no '#' fragment")]
    MissingFragment(String),

    #[error("document type '{0}' has a blank '#' fragment")]
    EmptyFragment(String),
}
