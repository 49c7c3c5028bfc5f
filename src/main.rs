//! gaggle CLI: drives the bot core the way the chat collaborator would.

use anyhow::Result;
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use gaggle::api::client::{ApiClient, RecordSource};
use gaggle::live::{LiveTracker, LiveUpdate, MessageSink};
use gaggle::setlist::ShowResolver;
use gaggle::{commands, render, Config};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gaggle", version, about = "Setlist lookup and live show tracking")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Setlist for a date (YYYY-MM-DD or YYYY/MM/DD)
    Show { date: String },
    /// Play statistics for a song
    Song { name: Vec<String> },
    /// Track today's show live until Ctrl-C or the show window ends
    Live,
    /// List available commands
    Help,
}

/// Prints live updates to stdout in place of a chat message slot.
struct ConsoleSink;

#[async_trait]
impl MessageSink for ConsoleSink {
    async fn replace(&self, update: LiveUpdate) -> Result<()> {
        println!("{}", render::render_update(&update));
        Ok(())
    }

    async fn announce(&self, text: &str) -> Result<()> {
        println!("{text}");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gaggle=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = Config::load();
    tracing::info!(
        api_base_url = %config.api_base_url,
        act = %config.act.name,
        "Starting gaggle"
    );

    let client = ApiClient::new(&config.api_base_url, config.http_timeout)?;
    let resolver = Arc::new(ShowResolver::new(client, config.act.clone()));

    match cli.command {
        Command::Show { date } => {
            println!("{}", commands::setlist_command(resolver.as_ref(), &date).await);
        }
        Command::Song { name } => {
            println!(
                "{}",
                commands::song_command(resolver.as_ref(), &name.join(" ")).await
            );
        }
        Command::Live => run_live(resolver).await?,
        Command::Help => println!("{}", commands::help_text()),
    }

    Ok(())
}

async fn run_live<S: RecordSource + 'static>(resolver: Arc<ShowResolver<S>>) -> Result<()> {
    let tracker = LiveTracker::new(resolver, Arc::new(ConsoleSink));
    println!("{}", tracker.start().await.message());

    // Exit on Ctrl-C, or as soon as the session winds down on its own at the
    // session ceiling.
    let session_done = async {
        while tracker.is_running() {
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    };
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            println!("{}", tracker.stop().await.message());
        }
        _ = session_done => {}
    }
    Ok(())
}
