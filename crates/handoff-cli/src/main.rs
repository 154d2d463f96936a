use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "handoff")]
#[command(about = "Handoff CLI - inspect and tear down conversation hand-offs", long_about = None)]
struct Cli {
    /// Settings file (defaults to ~/.config/handoff/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON routing store, overrides the configured store
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Disconnect both sides of the connection involving an endpoint
    Delete {
        #[arg(long)]
        channel_id: String,
        #[arg(long)]
        conversation_id: String,
    },
    /// Print a sample conversation listing as JSON
    List {
        #[arg(long, default_value_t = 10)]
        top: u32,
    },
    /// Print live connections and pending requests as JSON
    Connections,
    /// Link two endpoints (demo helper)
    Connect {
        #[arg(long)]
        channel_a: String,
        #[arg(long)]
        conversation_a: String,
        #[arg(long)]
        channel_b: String,
        #[arg(long)]
        conversation_b: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let context = commands::context::AppContext::load(cli.config.as_deref(), cli.store)?;

    match cli.command {
        Commands::Delete {
            channel_id,
            conversation_id,
        } => commands::delete::run(&context, &channel_id, &conversation_id).await?,
        Commands::List { top } => commands::list::run(&context, top).await?,
        Commands::Connections => commands::connections::run(&context).await?,
        Commands::Connect {
            channel_a,
            conversation_a,
            channel_b,
            conversation_b,
        } => {
            commands::connect::run(
                &context,
                (channel_a.as_str(), conversation_a.as_str()),
                (channel_b.as_str(), conversation_b.as_str()),
            )
            .await?
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_delete_with_global_store() {
        let cli = Cli::parse_from([
            "handoff",
            "delete",
            "--channel-id",
            "facebook",
            "--conversation-id",
            "c2",
            "--store",
            "/tmp/routing.json",
        ]);

        assert_eq!(cli.store, Some(PathBuf::from("/tmp/routing.json")));
        assert!(matches!(
            cli.command,
            Commands::Delete { ref channel_id, ref conversation_id }
                if channel_id == "facebook" && conversation_id == "c2"
        ));
    }
}
