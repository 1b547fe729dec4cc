//! Smoke harness for the hybrid recommender.
//!
//! Loads the model artifacts, rates the first two catalog items in a demo
//! session and prints the resulting hybrid top 10.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use data_loader::ModelBundle;
use server::{DEFAULT_LIMIT, HybridRecommender};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,server=debug,sources=debug")),
        )
        .init();

    let data_dir: PathBuf = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/model".to_string())
        .into();

    info!("Loading model artifacts...");
    let bundle = Arc::new(
        ModelBundle::load_from_files(&data_dir).context("Failed to load model artifacts")?,
    );
    info!("Loaded {} catalog items", bundle.n_items());

    let recommender = HybridRecommender::new(bundle.clone());
    let session = "smoke";

    // Rate the first two catalog items so the fit has something to chew on.
    let titles: Vec<String> = bundle.catalog().titles().take(2).map(str::to_string).collect();
    for (title, rating) in titles.iter().zip([5.0, 2.0]) {
        recommender.add_rating(session, title, rating)?;
    }

    let recommendations = recommender.recommend(session, DEFAULT_LIMIT).await?;
    info!("Received {} recommendations:", recommendations.len());
    for (i, rec) in recommendations.iter().enumerate() {
        info!("{}. {} - Score: {:.3}", i + 1, rec.title, rec.score);
    }

    Ok(())
}
