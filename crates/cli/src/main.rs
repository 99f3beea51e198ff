use anyhow::{Context, Result, anyhow, ensure};
use catalog::{Catalog, Movie, MovieId};
use clap::{Parser, Subcommand};
use colored::Colorize;
use profile::UserPreferences;
use rayon::prelude::*;
use recommender::{DEFAULT_TOP_N, Recommender, summarize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// CineMatch - Content-Based Movie Recommendations
#[derive(Parser)]
#[command(name = "cine-match")]
#[command(about = "Content-based movie recommendations over CSV/JSON catalogs", long_about = None)]
struct Cli {
    /// Path to the catalog file (CSV or JSON)
    #[arg(short, long)]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the catalog against a preference profile
    Recommend {
        /// Profile JSON file: {"preferences": {...}, "watch_history": [...]}
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Add one preference as CATEGORY=VALUE (repeatable)
        #[arg(long, value_name = "CATEGORY=VALUE")]
        prefer: Vec<String>,

        /// Mark a movie id as already watched (repeatable)
        #[arg(long)]
        watched: Vec<MovieId>,

        /// Number of recommendations to return
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top_n: usize,

        /// Show similarity scores
        #[arg(long)]
        explain: bool,

        /// Print the ranking as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Validate a catalog file and report how many records it holds
    Ingest,

    /// Run benchmark to test ranking performance
    Bench {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of worker threads
        #[arg(long, default_value = "8")]
        concurrent: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load the catalog; progress goes to stderr so --json stays pipeable
    eprintln!("Loading catalog from {}...", cli.catalog.display());
    let start = Instant::now();
    let catalog = Catalog::load_path(&cli.catalog)
        .with_context(|| format!("Failed to load catalog from {}", cli.catalog.display()))?;
    eprintln!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Recommend {
            profile,
            prefer,
            watched,
            top_n,
            explain,
            json,
        } => handle_recommend(&catalog, profile, prefer, watched, top_n, explain, json)?,
        Commands::Search { title } => handle_search(&catalog, title)?,
        Commands::Ingest => handle_ingest(&cli.catalog, &catalog)?,
        Commands::Bench {
            requests,
            concurrent,
        } => handle_bench(&catalog, requests, concurrent)?,
    }

    Ok(())
}

/// Read a preference profile from a JSON file
fn read_profile(path: &Path) -> Result<UserPreferences> {
    let file =
        File::open(path).with_context(|| format!("Failed to open profile {}", path.display()))?;
    let prefs = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse profile {}", path.display()))?;
    Ok(prefs)
}

/// Handle the 'recommend' command
fn handle_recommend(
    catalog: &Catalog,
    profile_path: Option<PathBuf>,
    prefer: Vec<String>,
    watched: Vec<MovieId>,
    top_n: usize,
    explain: bool,
    json: bool,
) -> Result<()> {
    // Start from the profile file if given, then fold in command-line flags
    let mut prefs = match profile_path {
        Some(path) => read_profile(&path)?,
        None => UserPreferences::new(),
    };
    for entry in &prefer {
        let (category, value) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid --prefer '{}': expected CATEGORY=VALUE", entry))?;
        prefs.add_preference(category, value);
    }
    for id in watched {
        prefs.record_watch(id);
    }

    let ranked = Recommender::new().recommend_scored(&prefs, catalog.movies(), top_n);

    if json {
        let summaries = summarize(ranked.iter().map(|entry| entry.movie));
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!("{}", "Movie Recommendations:".bold().blue());
    for (rank, entry) in ranked.iter().enumerate() {
        let movie = entry.movie;
        let genres = movie
            .attributes
            .get("genres")
            .map(|value| value.to_string())
            .unwrap_or_default();
        if explain {
            println!(
                "{}. {} [{}] - Score: {:.3}",
                (rank + 1).to_string().green(),
                movie.title(),
                genres,
                entry.score
            );
        } else {
            println!(
                "{}. {} [{}]",
                (rank + 1).to_string().green(),
                movie.title(),
                genres
            );
        }
    }
    if ranked.is_empty() {
        println!("Nothing left to recommend.");
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(catalog: &Catalog, title: String) -> Result<()> {
    let matches = catalog.search_title(&title);

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    for movie in matches.iter().take(20) {
        let genres = movie
            .attributes
            .get("genres")
            .map(|value| value.to_string())
            .unwrap_or_default();
        println!("{}: {} [{}]", movie.id, movie.title(), genres);
    }
    if matches.is_empty() {
        println!("No movies matched.");
    }
    Ok(())
}

/// Handle the 'ingest' command
fn handle_ingest(path: &Path, catalog: &Catalog) -> Result<()> {
    // Re-read the raw records so the count reflects the file, not the
    // deduplicated catalog
    let records = catalog::load_records(path)?;
    println!(
        "{} {} movies processed successfully.",
        "✓".green(),
        records.len()
    );
    if records.len() != catalog.len() {
        println!(
            "{} duplicate titles merged during load.",
            records.len() - catalog.len()
        );
    }
    Ok(())
}

/// Handle the 'bench' command
fn handle_bench(catalog: &Catalog, requests: usize, concurrent: usize) -> Result<()> {
    ensure!(!catalog.is_empty(), "Cannot benchmark an empty catalog");
    ensure!(requests > 0, "Need at least one request");

    let movies = catalog.movies();
    let recommender = Recommender::new();

    // Each request ranks against a profile seeded from a random movie,
    // with that movie marked watched so the exclusion path runs too
    let seeds: Vec<&Movie> = (0..requests)
        .map(|_| &movies[rand::random::<u32>() as usize % movies.len()])
        .collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(concurrent)
        .build()
        .context("Failed to build worker pool")?;

    let start = Instant::now();
    let mut timings: Vec<Duration> = pool.install(|| {
        seeds
            .par_iter()
            .map(|seed| {
                let mut prefs = UserPreferences::with_preferences(seed.attributes.clone());
                prefs.record_watch(seed.id);

                let request_start = Instant::now();
                let _ = recommender.recommend(&prefs, movies, DEFAULT_TOP_N);
                request_start.elapsed()
            })
            .collect()
    });
    let total_time = start.elapsed();

    // Latency distribution
    let total_compute: Duration = timings.iter().sum();
    let avg_latency = total_compute / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = requests as f32 / total_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}
