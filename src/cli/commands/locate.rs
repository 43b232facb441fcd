//! `indivo-admin locate` command - Find a document type's schema or transform

use miette::{IntoDiagnostic, Result};

use crate::cli::helpers;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::FileKind;

#[derive(clap::Args, Debug)]
pub struct LocateArgs {
    /// Document type, e.g. http://indivo.org/vocab/xml/documents#Medication
    pub document_type: String,

    /// Resolve the XSL transform instead of the XML schema
    #[arg(long, short = 't')]
    pub transform: bool,
}

impl LocateArgs {
    pub fn kind(&self) -> FileKind {
        if self.transform {
            FileKind::Transform
        } else {
            FileKind::Schema
        }
    }
}

pub fn run(args: LocateArgs, global: &GlobalOpts) -> Result<()> {
    let resolver = helpers::resolver(global)?;
    let kind = args.kind();
    let found = resolver.locate(&args.document_type, kind)?;

    match global.format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "document_type": args.document_type,
                "kind": kind,
                "path": found.path,
                "content": found.content,
            });
            println!("{}", serde_json::to_string_pretty(&value).into_diagnostic()?);
        }
        OutputFormat::Html => println!("{}", found.to_html()),
        OutputFormat::Auto | OutputFormat::Text => println!("{}", found.path.display()),
    }

    Ok(())
}
