//! Admin URL reversal
//!
//! Admin pages live at `{prefix}/{app}/{model}/` (changelist) and
//! `{prefix}/{app}/{model}/{id}/` (change form). Object ids and filter
//! values are percent-encoded.

use serde::Serialize;
use std::fmt;
use url::form_urlencoded;

/// Application label a model is registered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum App {
    Indivo,
    CodingSystems,
}

impl App {
    pub fn label(self) -> &'static str {
        match self {
            App::Indivo => "indivo",
            App::CodingSystems => "codingsystems",
        }
    }
}

impl fmt::Display for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Builds admin page URLs under a fixed prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUrls {
    prefix: String,
}

impl Default for AdminUrls {
    fn default() -> Self {
        Self::new("/admin")
    }
}

impl AdminUrls {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Change form for one object
    pub fn change(&self, app: App, model: &str, id: impl fmt::Display) -> String {
        format!("{}{}/", self.changelist(app, model), encode_segment(&id.to_string()))
    }

    /// List view for a model
    pub fn changelist(&self, app: App, model: &str) -> String {
        format!("{}/{}/{}/", self.prefix, app.label(), model.to_lowercase())
    }

    /// List view narrowed by a field lookup, e.g. facts of one document
    pub fn changelist_filtered(
        &self,
        app: App,
        model: &str,
        field: &str,
        value: impl fmt::Display,
    ) -> String {
        format!(
            "{}?{}={}",
            self.changelist(app, model),
            encode_query(field),
            encode_query(&value.to_string())
        )
    }
}

fn encode_query(s: &str) -> String {
    form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

/// Path segments use `%20` for spaces; a literal `+` is already `%2B`
fn encode_segment(s: &str) -> String {
    encode_query(s).replace('+', "%20")
}
