use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::mpsc::unbounded_channel;
use tracing::info;

mod config;
use config::InformConfig;

mod github;
use github::GitHubClient;

mod responder;
use responder::Responder;

mod webhooks;
use webhooks::{EventSender, GitHubSecret};

#[derive(Parser)]
#[command(version)]
struct Opts {
    /// Configuration file for cmd-inform
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Listen for GitHub webhook deliveries
    Serve,
    /// Handle a single `issue_comment` payload, as a GitHub Actions step would
    Handle {
        /// JSON payload of the triggering event
        #[arg(long, env = "GITHUB_EVENT_PATH")]
        event: PathBuf,
    },
}

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let opts = Opts::parse();
    let config = InformConfig::load(opts.config.as_deref())?;

    let client = GitHubClient::new(config.api_url()?, config.token()?.to_owned())
        .context("failed to create GitHub client")?;
    let responder = Responder::new(client, config.enabled);

    match opts.command {
        Command::Serve => serve(config, responder).await,
        Command::Handle { event } => handle(event, responder).await,
    }
}

async fn serve(config: InformConfig, responder: Responder<GitHubClient>) -> anyhow::Result<()> {
    let github_secret = config.secret()?.to_owned();
    let (sender, receiver) = unbounded_channel();

    tokio::spawn(async move { responder.run(receiver).await });

    let rocket = webhooks::server(GitHubSecret(github_secret), EventSender(sender));
    rocket
        .launch()
        .await
        .map(|_| ())
        .map_err(|err| anyhow::anyhow!("webhook server failed: {}", err))
}

async fn handle(event_path: PathBuf, responder: Responder<GitHubClient>) -> anyhow::Result<()> {
    match responder.respond_to_file(&event_path).await? {
        Some(comment) => info!("answered with {}", comment.html_url),
        None => info!("nothing to do"),
    }

    Ok(())
}
