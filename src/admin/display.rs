//! Computed columns, read-only link fields, and sidebars for admin pages
//!
//! Link helpers return HTML fragments with user data escaped. Label
//! helpers return plain text.

use serde::Serialize;

use crate::admin::urls::{AdminUrls, App};
use crate::core::html;

/// `"{label} ({id})"`, used wherever a record is offered in a choice field
pub fn record_label(label: &str, id: &str) -> String {
    format!("{} ({})", label, id)
}

/// `"{fqn} ({id})"` for document columns
pub fn document_name(fqn: &str, id: &str) -> String {
    format!("{} ({})", fqn, id)
}

/// Link from a record to its demographics page, labelled with the given name
pub fn demographics_link(urls: &AdminUrls, demographics_id: &str, name_given: &str) -> String {
    html::link(
        &urls.change(App::Indivo, "Demographics", demographics_id),
        name_given,
    )
}

/// Link from demographics back to the document it was parsed from
pub fn document_link(urls: &AdminUrls, document_id: &str, fqn: &str) -> String {
    html::link(
        &urls.change(App::Indivo, "Document", document_id),
        &format!("{} : {}", fqn, document_id),
    )
}

/// Audit entry record column
pub fn audit_record_link(urls: &AdminUrls, record_id: Option<&str>) -> String {
    match record_id.filter(|id| !id.is_empty()) {
        Some(id) => html::link(&urls.change(App::Indivo, "Record", id), id),
        None => "no record".to_string(),
    }
}

/// Audit entry document column
pub fn audit_document_link(urls: &AdminUrls, document_id: Option<&str>) -> String {
    match document_id.filter(|id| !id.is_empty()) {
        Some(id) => html::link(&urls.change(App::Indivo, "Document", id), id),
        None => "no document".to_string(),
    }
}

/// Link from a clinical fact subtype (encounter, lab, ...) to its base fact
pub fn fact_link(urls: &AdminUrls, fact_id: Option<&str>) -> String {
    match fact_id.filter(|id| !id.is_empty()) {
        Some(id) => html::link(&urls.change(App::Indivo, "Fact", id), &format!("Fact: {}", id)),
        None => "no record".to_string(),
    }
}

/// Name parts of an encounter provider
#[derive(Debug, Default, Clone)]
pub struct ProviderName<'a> {
    pub prefix: Option<&'a str>,
    pub given: Option<&'a str>,
    pub middle: Option<&'a str>,
    pub family: Option<&'a str>,
    pub suffix: Option<&'a str>,
}

impl ProviderName<'_> {
    /// Non-empty parts joined by single spaces
    pub fn display(&self) -> String {
        [self.prefix, self.given, self.middle, self.family, self.suffix]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A titled list of navigation links shown beside a change form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sidebar {
    pub title: String,
    pub links: Vec<String>,
}

impl Sidebar {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            links: Vec::new(),
        }
    }

    pub fn push(&mut self, href: &str, text: &str) {
        self.links.push(html::link(href, text));
    }

    pub fn to_html(&self) -> String {
        self.links.join("<br/>")
    }
}

/// Sidebar for a document: its record, the record owner's account, and the
/// facts extracted from it
pub fn document_sidebar(
    urls: &AdminUrls,
    document_id: &str,
    record_id: &str,
    owner_id: Option<&str>,
) -> Sidebar {
    let mut sidebar = Sidebar::new("Links");
    sidebar.push(&urls.change(App::Indivo, "Record", record_id), "Record");
    if let Some(owner) = owner_id {
        sidebar.push(&urls.change(App::Indivo, "Account", owner), "Account");
    }
    sidebar.push(
        &urls.changelist_filtered(App::Indivo, "Fact", "document", document_id),
        "Facts",
    );
    sidebar
}
