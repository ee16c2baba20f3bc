// Eye Catcher participant runner
//
// Design Decision: Use clap derive for ergonomic argument parsing.
// Design Decision: Use reqwest for HTTP client (already in workspace).

mod client;
mod runner;

use anyhow::Result;
use clap::{Parser, Subcommand};
use eyecatcher_contracts::TopicsResponse;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use client::Client;
use runner::RunnerOptions;

#[derive(Parser)]
#[command(name = "eyecatcher")]
#[command(about = "Eye Catcher participant runner - play survey sessions against a live API")]
#[command(version)]
pub struct Cli {
    /// API base URL
    #[arg(long, env = "EYECATCHER_API_URL", default_value = "http://localhost:8000")]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play one full survey session as a simulated participant
    Run {
        /// Display name (minimum 2 characters after trimming)
        #[arg(long, default_value = "Simulated Participant")]
        name: String,

        /// Skip the real one-second waits between ticks
        #[arg(long)]
        fast: bool,

        /// Chance of toggling an image on each click-test second
        #[arg(long, default_value_t = 0.4)]
        click_probability: f64,

        /// Seed for deterministic shuffles and choices
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List the topics the API is serving
    Topics,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eyecatcher_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let client = Client::new(&cli.api_url);

    match cli.command {
        Commands::Run {
            name,
            fast,
            click_probability,
            seed,
        } => {
            runner::play_session(
                client,
                &name,
                RunnerOptions {
                    fast,
                    click_probability,
                    seed,
                },
            )
            .await?;
        }
        Commands::Topics => {
            let response: TopicsResponse = client.get("/topics").await?;
            for topic in response.topics {
                println!("{} ({} images)", topic.name, topic.images.len());
            }
        }
    }

    Ok(())
}
