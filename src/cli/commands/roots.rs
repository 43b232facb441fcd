//! `indivo-admin roots` command - Show schema roots in search order

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers;
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct RootsArgs {}

pub fn run(_args: RootsArgs, global: &GlobalOpts) -> Result<()> {
    let resolver = helpers::resolver(global)?;
    let roots = resolver.roots();

    if global.format == OutputFormat::Json {
        let value: Vec<_> = roots
            .iter()
            .map(|root| {
                serde_json::json!({
                    "path": root.path,
                    "tier": root.tier,
                    "exists": root.path.is_dir(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&value).into_diagnostic()?);
        return Ok(());
    }

    if roots.is_empty() {
        println!(
            "{} No schema roots configured. Use --contrib-root/--core-root or indivo-admin.yaml",
            style("!").yellow()
        );
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["#", "TIER", "PATH", "EXISTS"]);
    for (i, root) in roots.iter().enumerate() {
        builder.push_record([
            (i + 1).to_string(),
            root.tier.to_string(),
            root.path.display().to_string(),
            if root.path.is_dir() { "yes" } else { "no" }.to_string(),
        ]);
    }
    println!("{}", builder.build().with(Style::sharp()).to_string());

    Ok(())
}
