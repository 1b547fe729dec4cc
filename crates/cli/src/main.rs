use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::ModelBundle;
use server::{DEFAULT_LIMIT, HybridRecommender, Recommendation};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// CineRecs - Hybrid Movie Recommender
#[derive(Parser)]
#[command(name = "cine-recs")]
#[command(about = "Hybrid movie recommendations from pretrained artifacts", long_about = None)]
struct Cli {
    /// Path to the model artifact directory
    #[arg(short, long, default_value = "data/model")]
    data_dir: PathBuf,

    /// Print results as JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rate movies and get hybrid recommendations
    Recommend {
        /// Movie rating as "Title=4.5"; repeat for several movies
        #[arg(long = "rate", value_name = "TITLE=RATING", required = true)]
        rate: Vec<String>,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },

    /// List movies most similar to a title
    Similar {
        /// Seed movie title (case-insensitive exact match)
        #[arg(long)]
        title: String,

        /// Number of similar movies to return
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Search the catalog by title substring (case-insensitive)
    Search {
        /// Title fragment to search for
        #[arg(long)]
        title: String,
    },

    /// Sample movies matching genre preferences (no ratings required)
    ColdStart {
        /// Preferred genre; repeat for several
        #[arg(long = "genre")]
        genre: Vec<String>,

        /// Number of movies to sample
        #[arg(long, default_value = "5")]
        count: usize,
    },

    /// List every title in the catalog
    Catalog,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading model artifacts from {}...", cli.data_dir.display());
    let start = Instant::now();
    let bundle = Arc::new(
        ModelBundle::load_from_files(&cli.data_dir).context("Failed to load model artifacts")?,
    );
    println!(
        "{} Loaded {} items in {:?}",
        "✓".green(),
        bundle.n_items(),
        start.elapsed()
    );

    let recommender = HybridRecommender::new(bundle.clone());

    match cli.command {
        Commands::Recommend { rate, limit } => {
            handle_recommend(&recommender, &rate, limit, cli.json).await?
        }
        Commands::Similar { title, top } => handle_similar(&recommender, &title, top, cli.json)?,
        Commands::Search { title } => handle_search(&bundle, &title),
        Commands::ColdStart { genre, count } => {
            handle_cold_start(&recommender, &genre, count, cli.json)?
        }
        Commands::Catalog => handle_catalog(&recommender, cli.json)?,
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    recommender: &HybridRecommender,
    rate: &[String],
    limit: usize,
    json: bool,
) -> Result<()> {
    // One invocation is one session; ratings accumulate in-process only.
    const SESSION: &str = "cli";

    for pair in rate {
        let (title, rating) = parse_rate_arg(pair)?;
        recommender.add_rating(SESSION, &title, rating)?;
    }

    let recommendations = recommender.recommend(SESSION, limit).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
    } else {
        print_recommendations("Hybrid recommendations:", &recommendations);
    }
    Ok(())
}

/// Handle the 'similar' command
fn handle_similar(
    recommender: &HybridRecommender,
    title: &str,
    top: usize,
    json: bool,
) -> Result<()> {
    let similar = recommender.similar(title, top)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&similar)?);
    } else {
        print_recommendations(&format!("Movies similar to '{title}':"), &similar);
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(bundle: &ModelBundle, query: &str) {
    let query_lower = query.to_lowercase();

    let mut matches: Vec<(usize, &str)> = bundle
        .catalog()
        .titles()
        .enumerate()
        .filter(|(_, title)| title.to_lowercase().contains(&query_lower))
        .collect();

    // Exact matches first, then catalog order
    matches.sort_by_key(|(idx, title)| (title.to_lowercase() != query_lower, *idx));

    println!("{}", format!("Search results for '{query}':").bold().blue());
    for (idx, title) in matches.iter().take(20) {
        println!("{idx}: {title}");
    }
}

/// Handle the 'cold-start' command
fn handle_cold_start(
    recommender: &HybridRecommender,
    genres: &[String],
    count: usize,
    json: bool,
) -> Result<()> {
    let picks = recommender.cold_start(genres, count);
    if json {
        println!("{}", serde_json::to_string_pretty(&picks)?);
    } else {
        println!("{}", "Cold-start picks:".bold().blue());
        for (i, title) in picks.iter().enumerate() {
            println!("{}. {}", (i + 1).to_string().green(), title);
        }
    }
    Ok(())
}

/// Handle the 'catalog' command
fn handle_catalog(recommender: &HybridRecommender, json: bool) -> Result<()> {
    let titles = recommender.titles();
    if json {
        println!("{}", serde_json::to_string_pretty(&titles)?);
    } else {
        for title in &titles {
            println!("{title}");
        }
    }
    Ok(())
}

/// Split a "Title=4.5" argument into its parts.
///
/// Splits on the last '=' so titles containing '=' still work.
fn parse_rate_arg(arg: &str) -> Result<(String, f64)> {
    let (title, rating) = arg
        .rsplit_once('=')
        .ok_or_else(|| anyhow!("expected TITLE=RATING, got {arg:?}"))?;
    let rating: f64 = rating
        .trim()
        .parse()
        .with_context(|| format!("invalid rating in {arg:?}"))?;
    Ok((title.trim().to_string(), rating))
}

/// Helper function to format and print a scored list
fn print_recommendations(header: &str, recommendations: &[Recommendation]) {
    println!("{}", header.bold().blue());
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} - Score: {:.3}",
            (i + 1).to_string().green(),
            rec.title,
            rec.score
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rate_arg_basic() {
        let (title, rating) = parse_rate_arg("Toy Story (1995)=4.5").unwrap();
        assert_eq!(title, "Toy Story (1995)");
        assert_eq!(rating, 4.5);
    }

    #[test]
    fn parse_rate_arg_splits_on_last_equals() {
        let (title, rating) = parse_rate_arg("2+2=4 The Movie=3").unwrap();
        assert_eq!(title, "2+2=4 The Movie");
        assert_eq!(rating, 3.0);
    }

    #[test]
    fn parse_rate_arg_rejects_garbage() {
        assert!(parse_rate_arg("no rating here").is_err());
        assert!(parse_rate_arg("Title=not-a-number").is_err());
    }
}
