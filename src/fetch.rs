use chrono::{Duration, Utc};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use trend_poster::application::TimelineService;
use trend_poster::infrastructure::{telemetry, AppConfig, TwitterClient, TwitterCredentials};

/// Fetch a user's recent posts into a JSON file usable as a corpus.
#[derive(Parser)]
#[command(name = "fetch")]
#[command(version)]
struct Cli {
    /// Username to fetch posts from
    username: String,

    /// How far back to go, in days
    #[arg(long, default_value = "365")]
    days: i64,

    /// Output file (default: <username>_tweets.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// YAML config file
    #[arg(short, long, env = "TREND_POSTER_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init("info");

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    let credentials = TwitterCredentials::from_env()?;

    let platform = Arc::new(TwitterClient::new(&config.twitter, &credentials)?);
    let timeline = TimelineService::new(platform, config.twitter.policy.clone());

    let username = cli.username.trim_start_matches('@');
    let since = Utc::now() - Duration::days(cli.days);
    let tweets = timeline.fetch_since(username, since).await?;

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{username}_tweets.json")));
    std::fs::write(&output, serde_json::to_string_pretty(&tweets)?)?;

    info!(
        count = tweets.len(),
        path = %output.display(),
        "saved tweets"
    );
    Ok(())
}
