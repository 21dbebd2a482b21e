mod charts;
mod classify;
mod clean;
mod db;
mod error;
mod export;
mod fetch;
mod parser;
mod pipeline;
mod record;
mod settings;
mod stats;

use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use fetch::{HttpFetcher, PagePlan};
use settings::Settings;

#[derive(Parser)]
#[command(name = "devjobs_scraper", about = "Job board scraper with salary-by-role analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape, store raw data, clean, aggregate and plot
    Run(PageArgs),
    /// Scrape and store raw data only
    Scrape(PageArgs),
    /// Clean, aggregate and plot the raw jobs already in the database
    Analyze,
    /// Show the role category for one or more job titles
    Classify {
        #[arg(required = true)]
        titles: Vec<String>,
    },
}

#[derive(Args)]
struct PageArgs {
    /// Number of result pages to fetch
    #[arg(short = 'n', long)]
    pages: Option<u32>,
    /// Page index step between fetches
    #[arg(long)]
    stride: Option<u32>,
}

impl PageArgs {
    fn plan(&self, settings: &Settings) -> anyhow::Result<PagePlan> {
        let plan = PagePlan::new(
            self.pages.unwrap_or(settings.page_count),
            self.stride.unwrap_or(settings.page_stride),
        )?;
        Ok(plan)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;
    info!(settings = ?settings, "Starting devjobs scraper");

    let result = match cli.command {
        Commands::Run(args) => {
            let plan = args.plan(&settings)?;
            let fetcher = HttpFetcher::new(&settings)?;
            pipeline::run(&fetcher, plan, &settings).map(|_| ())
        }
        Commands::Scrape(args) => {
            let plan = args.plan(&settings)?;
            let fetcher = HttpFetcher::new(&settings)?;
            pipeline::scrape_only(&fetcher, plan, &settings).map(|_| ())
        }
        Commands::Analyze => pipeline::analyze_stored(&settings).map(|_| ()),
        Commands::Classify { titles } => {
            for title in &titles {
                println!("{:<50} {}", truncate(title, 50), classify::categorize(title));
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
