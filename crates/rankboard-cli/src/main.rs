mod board;
mod settings;

use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "rankboard")]
#[command(about = "Track players and build a ranked leaderboard from their public profiles")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Track a player after checking their profile exists
    Add {
        /// Player id, e.g. Henri#EUW
        id: String,
    },
    /// Stop tracking a player
    Remove { id: String },
    /// Show tracked ids in stored order
    List,
    /// Capture every tracked player and print the leaderboard
    Rank {
        /// Print the snapshot as JSON instead
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    tracing::debug!("rankboard v{}", env!("CARGO_PKG_VERSION"));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "command failed");
            println!(
                "Something went wrong, the leaderboard was not changed. Please try again later."
            );
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Add { id } => {
            let pipeline = cli.settings.pipeline()?;
            let outcome = pipeline.add(&id).await.context("adding player")?;
            println!("{}", board::add_message(&outcome, &cli.settings.locator()));
        }
        Command::Remove { id } => {
            let pipeline = cli.settings.pipeline()?;
            let outcome = pipeline.remove(&id).await.context("removing player")?;
            println!("{}", board::remove_message(&outcome));
        }
        Command::List => {
            let store = cli.settings.store();
            let ids = store
                .load()
                .await
                .with_context(|| format!("reading {}", store.path().display()))?;
            print!("{}", board::render_id_list(&ids, &cli.settings.locator()));
        }
        Command::Rank { json } => {
            let pipeline = cli.settings.pipeline()?;
            let snapshot = pipeline.refresh().await.context("building leaderboard")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                let locator = cli.settings.locator();
                print!("{}", board::render_leaderboard(&snapshot, &locator, chrono::Utc::now()));
                for (i, batch) in board::attachment_batches(&snapshot).iter().enumerate() {
                    println!();
                    println!("Attachments {}:", i + 1);
                    for path in batch {
                        println!("  {}", path.display());
                    }
                }
            }
        }
    }

    Ok(())
}
