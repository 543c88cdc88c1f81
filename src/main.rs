use clap::Parser;
use helm_smells::cli::{Cli, Commands};
use helm_smells::config;
use std::path::Path;
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> helm_smells::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    // Workspace-local configuration lives next to what is analyzed
    let workspace = match &cli.command {
        Commands::Scan { workspace, .. } => workspace.as_path(),
        Commands::Chart { path, .. } => path.as_path(),
        Commands::History {
            repository: Some(repository),
            ..
        } => repository.as_path(),
        Commands::History { .. } | Commands::Rules => Path::new("."),
    };
    let config = config::load_config(cli.config.as_deref(), Some(workspace))?;

    helm_smells::run_command(cli.command, &config, cli.quiet)
}
