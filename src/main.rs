use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use trend_poster::application::{PostGenerator, PublishService, RagService};
use trend_poster::infrastructure::{
    load_corpus, telemetry, AppConfig, GeminiCredentials, GeminiEmbedder, GeminiLlm,
    InMemoryVectorStore, TwitterClient, TwitterCredentials,
};

const DEFAULT_TREND: &str =
    "Current trends: AI automation, productivity hacks, bootstrapping startups, sales strategies";

/// Generate a post for a trend and publish it.
#[derive(Parser)]
#[command(name = "post")]
#[command(version)]
struct Cli {
    /// Trend context the post should follow
    #[arg(short, long, default_value = DEFAULT_TREND)]
    trend: String,

    /// YAML config file
    #[arg(short, long, env = "TREND_POSTER_CONFIG")]
    config: Option<PathBuf>,

    /// Directory of example posts; overrides `rag.corpus_dir`
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Generate and print the post without publishing it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init("info");

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;
    let gemini = GeminiCredentials::from_env()?;

    let embedder = Arc::new(GeminiEmbedder::new(&config.embedding, &gemini)?);

    let documents = match cli.corpus.as_ref().or(config.rag.corpus_dir.as_ref()) {
        Some(dir) => load_corpus(dir)?.documents,
        None => {
            info!("no corpus configured, generating without examples");
            Vec::new()
        }
    };
    let store =
        InMemoryVectorStore::build(embedder.as_ref(), &config.embedding.policy, documents).await?;

    let rag = Arc::new(RagService::new(
        embedder,
        Arc::new(store),
        config.embedding.policy.clone(),
        config.rag.top_k,
    ));
    info!(documents = rag.store_size(), "example store ready");
    let generator = Arc::new(
        PostGenerator::new(
            rag,
            Arc::new(GeminiLlm::new(&config.llm, &gemini)?),
            config.llm.policy.clone(),
        )
        .with_examples(config.rag.top_k),
    );

    if cli.dry_run {
        let post = generator.generate(&cli.trend).await?;
        println!("{}", serde_json::to_string_pretty(&post)?);
        return Ok(());
    }

    let twitter = TwitterCredentials::from_env()?;
    let platform = Arc::new(TwitterClient::new(&config.twitter, &twitter)?);
    let publisher = PublishService::new(generator, platform, config.twitter.policy.clone());

    let outcome = publisher.publish(&cli.trend).await?;
    info!(
        tweet_id = %outcome.published.id,
        text = %outcome.post.text,
        tags = ?outcome.post.tags,
        "tweet posted successfully"
    );
    if let Some(tweet) = outcome.confirmed {
        info!(tweet = ?tweet, "retrieved tweet");
    }

    Ok(())
}
