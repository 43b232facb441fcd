//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, links::LinksCommands, locate::LocateArgs,
    models::ModelsCommands, roots::RootsArgs, show::ShowArgs,
};

#[derive(Parser)]
#[command(name = "indivo-admin")]
#[command(author, version, about = "Indivo admin tooling")]
#[command(long_about = "Administrative tooling for an Indivo medical records server: resolves document schema and transform files, and describes the admin panel's models and cross-record links.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Config file (default: nearest indivo-admin.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Contrib schema root, searched before core roots (repeatable)
    #[arg(long = "contrib-root", global = true, value_name = "DIR")]
    pub contrib_roots: Vec<PathBuf>,

    /// Core schema root (repeatable)
    #[arg(long = "core-root", global = true, value_name = "DIR")]
    pub core_roots: Vec<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find the schema or transform file for a document type
    Locate(LocateArgs),

    /// Render a schema or transform file as an admin page fragment
    Show(ShowArgs),

    /// List schema roots in search order
    Roots(RootsArgs),

    /// Inspect the admin model registry
    #[command(subcommand)]
    Models(ModelsCommands),

    /// Build cross-record admin links
    #[command(subcommand)]
    Links(LinksCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Command default: HTML for `show` and `links`, text elsewhere
    #[default]
    Auto,
    /// Human-readable text
    Text,
    /// HTML fragment for embedding in admin pages
    Html,
    /// JSON format (for programming)
    Json,
}
