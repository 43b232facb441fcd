//! `indivo-admin show` command - Render a bundle file for an admin detail page
//!
//! Unlike `locate`, lookup failures are not errors here: they are printed in
//! place of the file content, exactly as the admin page would show them.

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{FileKind, ResolveError};

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Document type, e.g. http://indivo.org/vocab/xml/documents#Medication
    pub document_type: String,

    /// Show the XSL transform instead of the XML schema
    #[arg(long, short = 't')]
    pub transform: bool,
}

pub fn run(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let resolver = helpers::resolver(global)?;
    let kind = if args.transform {
        FileKind::Transform
    } else {
        FileKind::Schema
    };

    match global.format {
        OutputFormat::Auto | OutputFormat::Html => {
            println!("{}", resolver.render(&args.document_type, kind));
        }
        OutputFormat::Text => match resolver.locate(&args.document_type, kind) {
            Ok(found) => {
                if !global.quiet {
                    println!("{}", style(found.path.display()).bold());
                }
                println!("{}", found.content);
            }
            Err(e) => println!("{}", e),
        },
        OutputFormat::Json => {
            let value = match resolver.locate(&args.document_type, kind) {
                Ok(found) => serde_json::json!({
                    "found": true,
                    "path": found.path,
                    "html": found.to_html(),
                }),
                Err(e) => serde_json::json!({
                    "found": false,
                    "error": error_code(&e),
                    "message": e.to_string(),
                }),
            };
            println!("{}", serde_json::to_string_pretty(&value).into_diagnostic()?);
        }
    }

    Ok(())
}

fn error_code(err: &ResolveError) -> &'static str {
    match err {
        ResolveError::InvalidDocumentType(_) => "invalid_document_type",
        ResolveError::NotFound { .. } => "not_found",
        ResolveError::IoFailure { .. } => "io_failure",
        ResolveError::ScanLimitExceeded { .. } => "scan_limit_exceeded",
    }
}
