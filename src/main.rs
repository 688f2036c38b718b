use clap::Parser;
use colored::*;
use famsa_export::cli::{Cli, Commands};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging with FAMSA_EXPORT_LOG environment variable support
    let log_level = std::env::var("FAMSA_EXPORT_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_level)),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);

        // Use appropriate exit codes based on error type
        let exit_code = match e.downcast_ref::<famsa_export::FamsaExportError>() {
            Some(famsa_export::FamsaExportError::Config(_)) => 2,
            Some(famsa_export::FamsaExportError::Io(_)) => 3,
            Some(famsa_export::FamsaExportError::Tool(_)) => 4,
            Some(famsa_export::FamsaExportError::Export(_)) => 5,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // FAMSA parallelizes internally; 0 means all available cores
    let threads = if cli.threads == 0 {
        num_cpus::get()
    } else {
        cli.threads
    };

    if cli.verbose > 0 {
        eprintln!("Using {} FAMSA threads", threads);
    }

    match cli.command {
        Commands::GuideTree(args) => famsa_export::cli::commands::guide_tree::run(args, threads),
        Commands::Distance(args) => famsa_export::cli::commands::distance::run(args, threads),
        Commands::Tools(args) => famsa_export::cli::commands::tools::run(args),
    }
}
