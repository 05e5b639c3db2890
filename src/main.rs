use anyhow::Result;
use clap::Parser;
use pubstats::cli::{Cli, Commands};
use pubstats::commands;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(cli.debug);

    match &cli.command {
        Commands::Pubs(args) => commands::pubs::run(args),
        Commands::Feedback(args) => commands::feedback::run(args),
        Commands::Impacts(args) => commands::impacts::run(args),
        Commands::Readability(args) => commands::readability::run(args),
    }
}
