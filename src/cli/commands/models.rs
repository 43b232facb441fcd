//! `indivo-admin models` command - Inspect the admin model registry

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::admin::{AdminRegistry, ModelAdmin};
use crate::cli::helpers::{self, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum ModelsCommands {
    /// List all registered models
    List(ListArgs),

    /// Show the admin options of one model
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only list models with customized admin options
    #[arg(long)]
    pub customized: bool,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Model name (case-insensitive), e.g. Document
    pub model: String,
}

pub fn run(cmd: ModelsCommands, global: &GlobalOpts) -> Result<()> {
    let config = helpers::load_config(global)?;
    let registry = AdminRegistry::new(config.development_mode());

    match cmd {
        ModelsCommands::List(args) => list_models(&registry, args, global),
        ModelsCommands::Show(args) => show_model(&registry, args, global),
    }
}

fn list_models(registry: &AdminRegistry, args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let models: Vec<&ModelAdmin> = registry
        .iter()
        .filter(|m| !args.customized || !m.is_default())
        .collect();

    if global.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&models).into_diagnostic()?);
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["MODEL", "APP", "LIST DISPLAY", "ADD", "DELETE"]);
    for model in &models {
        builder.push_record([
            model.name.to_string(),
            model.app.to_string(),
            truncate_str(&model.list_display.join(", "), 48),
            yes_no(model.can_add).to_string(),
            yes_no(model.can_delete).to_string(),
        ]);
    }
    println!("{}", builder.build().with(Style::sharp()).to_string());

    if !global.quiet {
        println!("\n{} model(s)", models.len());
    }
    Ok(())
}

fn show_model(registry: &AdminRegistry, args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let Some(model) = registry.get(&args.model) else {
        return Err(miette::miette!(
            help = "run `indivo-admin models list` to see registered models",
            "Unknown model: {}",
            args.model
        ));
    };

    if global.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(model).into_diagnostic()?);
        return Ok(());
    }

    let title = format!("{}.{}", model.app, model.name);
    println!("{}", style(&title).bold());
    println!("{}", "=".repeat(title.len()));

    print_list("Fields", &model.fields);
    print_list("List display", &model.list_display);
    print_list("Search fields", &model.search_fields);
    print_list("List filter", &model.list_filter);
    print_list("Read-only", &model.readonly_fields);
    print_list("Excluded", &model.exclude);
    println!("{:<14} {}", "Can add:", yes_no(model.can_add));
    println!("{:<14} {}", "Can delete:", yes_no(model.can_delete));

    Ok(())
}

fn print_list(label: &str, items: &[&str]) {
    let value = if items.is_empty() {
        style("(default)").dim().to_string()
    } else {
        items.join(", ")
    };
    println!("{:<14} {}", format!("{}:", label), value);
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}
