//! `indivo-admin links` command - Build cross-record admin links
//!
//! Each subcommand prints the computed columns and link fields one admin
//! change page shows for an object.

use clap::Subcommand;
use miette::{IntoDiagnostic, Result};

use crate::admin::display::{
    audit_document_link, audit_record_link, demographics_link, document_link, document_name,
    fact_link, record_label,
};
use crate::admin::{document_sidebar, AdminUrls, ProviderName};
use crate::cli::helpers;
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum LinksCommands {
    /// Sidebar links for a document's change page
    Document(DocumentLinksArgs),

    /// Record label and demographics link
    Record(RecordLinksArgs),

    /// Link from demographics to its source document
    Demographics(DemographicsLinksArgs),

    /// Record and document columns of an audit entry
    Audit(AuditLinksArgs),

    /// Provider name and fact link of an encounter
    Encounter(EncounterLinksArgs),

    /// Document and record columns of a fact
    Fact(FactLinksArgs),
}

#[derive(clap::Args, Debug)]
pub struct DocumentLinksArgs {
    /// Document ID
    #[arg(long)]
    pub id: String,

    /// ID of the record the document belongs to
    #[arg(long)]
    pub record: String,

    /// Account ID of the record owner
    #[arg(long)]
    pub owner: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct RecordLinksArgs {
    /// Record ID
    #[arg(long)]
    pub id: String,

    /// Record label
    #[arg(long)]
    pub label: String,

    /// Demographics ID of the record
    #[arg(long, requires = "given_name")]
    pub demographics: Option<String>,

    /// Given name shown on the demographics link
    #[arg(long)]
    pub given_name: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct DemographicsLinksArgs {
    /// ID of the document the demographics were parsed from
    #[arg(long)]
    pub document: String,

    /// Fully qualified name of that document
    #[arg(long)]
    pub fqn: String,
}

#[derive(clap::Args, Debug)]
pub struct AuditLinksArgs {
    /// Record ID of the audited request, if any
    #[arg(long)]
    pub record: Option<String>,

    /// Document ID of the audited request, if any
    #[arg(long)]
    pub document: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct EncounterLinksArgs {
    /// Base fact ID
    #[arg(long)]
    pub fact: Option<String>,

    #[arg(long)]
    pub prefix: Option<String>,

    #[arg(long)]
    pub given: Option<String>,

    #[arg(long)]
    pub middle: Option<String>,

    #[arg(long)]
    pub family: Option<String>,

    #[arg(long)]
    pub suffix: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct FactLinksArgs {
    /// Source document ID
    #[arg(long)]
    pub document: String,

    /// Source document fully qualified name
    #[arg(long)]
    pub fqn: String,

    /// Label of the record the fact belongs to
    #[arg(long)]
    pub record_label: String,
}

pub fn run(cmd: LinksCommands, global: &GlobalOpts) -> Result<()> {
    let config = helpers::load_config(global)?;
    let urls = AdminUrls::new(config.admin_prefix());

    let columns: Vec<(&str, String)> = match cmd {
        LinksCommands::Document(args) => {
            let sidebar = document_sidebar(&urls, &args.id, &args.record, args.owner.as_deref());
            if global.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&sidebar).into_diagnostic()?);
            } else {
                println!("{}", sidebar.to_html());
            }
            return Ok(());
        }
        LinksCommands::Record(args) => {
            let mut columns = vec![("Record", record_label(&args.label, &args.id))];
            if let (Some(id), Some(name)) = (&args.demographics, &args.given_name) {
                columns.push(("Demographics", demographics_link(&urls, id, name)));
            }
            columns
        }
        LinksCommands::Demographics(args) => {
            vec![("Document", document_link(&urls, &args.document, &args.fqn))]
        }
        LinksCommands::Audit(args) => vec![
            ("Record", audit_record_link(&urls, args.record.as_deref())),
            ("Document", audit_document_link(&urls, args.document.as_deref())),
        ],
        LinksCommands::Encounter(args) => {
            let provider = ProviderName {
                prefix: args.prefix.as_deref(),
                given: args.given.as_deref(),
                middle: args.middle.as_deref(),
                family: args.family.as_deref(),
                suffix: args.suffix.as_deref(),
            };
            vec![
                ("Provider", provider.display()),
                ("Fact", fact_link(&urls, args.fact.as_deref())),
            ]
        }
        LinksCommands::Fact(args) => vec![
            ("Document", document_name(&args.fqn, &args.document)),
            ("Record", args.record_label),
        ],
    };

    print_columns(&columns, global)
}

fn print_columns(columns: &[(&str, String)], global: &GlobalOpts) -> Result<()> {
    if global.format == OutputFormat::Json {
        let map: serde_json::Map<String, serde_json::Value> = columns
            .iter()
            .map(|(label, value)| (label.to_lowercase(), serde_json::Value::from(value.as_str())))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map).into_diagnostic()?);
        return Ok(());
    }

    for (label, value) in columns {
        println!("{:<14} {}", format!("{}:", label), value);
    }
    Ok(())
}
