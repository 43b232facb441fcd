use clap::Parser;
use indivo_admin::cli::{Cli, Commands, GlobalOpts};
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_logging(&global);

    match cli.command {
        Commands::Locate(args) => indivo_admin::cli::commands::locate::run(args, &global),
        Commands::Show(args) => indivo_admin::cli::commands::show::run(args, &global),
        Commands::Roots(args) => indivo_admin::cli::commands::roots::run(args, &global),
        Commands::Models(cmd) => indivo_admin::cli::commands::models::run(cmd, &global),
        Commands::Links(cmd) => indivo_admin::cli::commands::links::run(cmd, &global),
        Commands::Completions(args) => indivo_admin::cli::commands::completions::run(args),
    }
}

/// Logs go to stderr so stdout stays pipeable; RUST_LOG overrides the flags
fn init_logging(global: &GlobalOpts) {
    let default_filter = if global.verbose {
        "indivo_admin=debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
