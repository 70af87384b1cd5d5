use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use commands::{Commands, TemplateCommands};

#[derive(Parser)]
#[command(name = "handoff")]
#[command(about = "Hand code references, templates and clipboard screenshots to an AI CLI in your terminal")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Send { text, file, lines } => {
            cli::send::send_command(text, file, lines).await?;
        }
        Commands::Ask { template, file, lines } => {
            cli::ask::ask_command(template, file, lines).await?;
        }
        Commands::Copy { file, lines } => {
            cli::copy::copy_command(&file, &lines)?;
        }
        Commands::Image => {
            cli::image::image_command().await?;
        }
        Commands::Watch => {
            cli::watch::watch_command().await?;
        }
        Commands::Start { cli: which } => {
            cli::start::start_command(which)?;
        }
        Commands::Templates { command } => match command {
            TemplateCommands::List => cli::templates::list_command()?,
        },
        Commands::Cleanup { all, older_than } => {
            cli::cleanup::cleanup_command(all, older_than)?;
        }
        Commands::Init { force } => {
            cli::init::init_command(force)?;
        }
    }

    Ok(())
}
