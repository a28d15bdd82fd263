//! Vgsales CLI - reporting over video-game sales datasets
//!
//! # Main Commands
//!
//! ```bash
//! vgsales summary data.csv                  # Headline metrics
//! vgsales regions data.csv                  # Regional sales shares
//! vgsales top data.csv --by platform -n 5   # Top-N ranking
//! vgsales report data.csv -o report.json    # Full JSON report
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! vgsales inspect data.csv                  # Parse only, show metadata
//! vgsales filter data.csv --genre Sports    # Emit filtered records as JSON
//! ```
//!
//! Every data command accepts the shared filter flags (`--year-from`,
//! `--year-to`, `--genre`, `--platform`, `--publisher`, `--region`,
//! `--category`); repeat a flag to include several values.

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use vgsales::{
    build_report, load_dataset, regional_percentages, summarize, top_n, Aggregation,
    FilterCriteria, GroupColumn, MeasureColumn, Region, ReportOptions,
};

#[derive(Parser)]
#[command(name = "vgsales")]
#[command(about = "Descriptive analytics over video-game sales datasets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Shared filter flags, flattened into every data command.
#[derive(Args, Default)]
struct FilterArgs {
    /// Keep records released in or after this year
    #[arg(long)]
    year_from: Option<u16>,

    /// Keep records released in or before this year
    #[arg(long)]
    year_to: Option<u16>,

    /// Keep only these genres (repeatable)
    #[arg(long = "genre")]
    genres: Vec<String>,

    /// Keep only these platforms (repeatable)
    #[arg(long = "platform")]
    platforms: Vec<String>,

    /// Keep only these publishers (repeatable)
    #[arg(long = "publisher")]
    publishers: Vec<String>,

    /// Keep only these dominant regions (repeatable)
    #[arg(long = "region")]
    regions: Vec<Region>,

    /// Keep only these sales categories (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,
}

impl FilterArgs {
    fn criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::new()
            .with_genres(self.genres.clone())
            .with_platforms(self.platforms.clone())
            .with_publishers(self.publishers.clone())
            .with_regions(self.regions.clone())
            .with_sales_categories(self.categories.clone());

        if self.year_from.is_some() || self.year_to.is_some() {
            criteria = criteria.with_year_range(
                self.year_from.unwrap_or(0),
                self.year_to.unwrap_or(u16::MAX),
            );
        }
        criteria
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a dataset file and show its metadata
    Inspect {
        /// Input CSV file
        input: PathBuf,
    },

    /// Print headline metrics for the (filtered) dataset
    Summary {
        /// Input CSV file
        input: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Print each region's share of global sales
    Regions {
        /// Input CSV file
        input: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Rank the top groups of a categorical column
    Top {
        /// Input CSV file
        input: PathBuf,

        /// Column to group by (platform, genre, publisher, name, year,
        /// region, category)
        #[arg(short, long)]
        by: GroupColumn,

        /// Number of groups to show
        #[arg(short, default_value = "10")]
        n: usize,

        /// Measure column (global, na, eu, jp, other)
        #[arg(short, long, default_value = "global")]
        measure: MeasureColumn,

        /// Aggregation (sum, mean, count)
        #[arg(short, long, default_value = "sum")]
        agg: Aggregation,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Emit the filtered records as JSON
    Filter {
        /// Input CSV file
        input: PathBuf,

        /// JSON file with filter criteria (unknown keys are rejected)
        #[arg(short, long)]
        criteria: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Build the full report (summary + shares + rankings) as JSON
    Report {
        /// Input CSV file
        input: PathBuf,

        /// Number of entries per ranking
        #[arg(short, default_value = "10")]
        n: usize,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect { input } => cmd_inspect(&input),

        Commands::Summary { input, filters } => cmd_summary(&input, &filters.criteria()),

        Commands::Regions { input, filters } => cmd_regions(&input, &filters.criteria()),

        Commands::Top {
            input,
            by,
            n,
            measure,
            agg,
            filters,
        } => cmd_top(&input, by, n, measure, agg, &filters.criteria()),

        Commands::Filter {
            input,
            criteria,
            output,
            filters,
        } => cmd_filter(&input, criteria.as_deref(), output.as_deref(), &filters),

        Commands::Report {
            input,
            n,
            output,
            filters,
        } => cmd_report(&input, n, output.as_deref(), &filters.criteria()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn load(input: &Path, criteria: &FilterCriteria) -> Result<Vec<vgsales::GameRecord>, Box<dyn std::error::Error>> {
    eprintln!("📄 Loading dataset: {}", input.display());
    let dataset = load_dataset(input)?;
    eprintln!("   {} records ({}, '{}')", dataset.records.len(), dataset.encoding, dataset.delimiter);

    let records = criteria.apply(&dataset.records);
    if !criteria.is_unrestricted() {
        eprintln!("   {} records after filtering", records.len());
    }
    Ok(records)
}

fn cmd_inspect(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Inspecting: {}", input.display());

    let dataset = load_dataset(input)?;
    eprintln!("   Encoding: {}", dataset.encoding);
    eprintln!(
        "   Delimiter: '{}'",
        match dataset.delimiter {
            '\t' => "\\t".to_string(),
            c => c.to_string(),
        }
    );
    eprintln!("   Columns: {}", dataset.headers.join(", "));
    eprintln!("✅ Parsed {} records", dataset.records.len());

    Ok(())
}

fn cmd_summary(input: &Path, criteria: &FilterCriteria) -> Result<(), Box<dyn std::error::Error>> {
    let records = load(input, criteria)?;
    let summary = summarize(&records)?;

    println!("📊 Dataset summary");
    println!("   Games:      {}", summary.total_games);
    println!("   Sales:      {:.2}M units", summary.total_sales);
    println!("   Avg/game:   {:.2}M units", summary.avg_sales);
    println!("   Platforms:  {}", summary.total_platforms);
    println!("   Genres:     {}", summary.total_genres);
    println!("   Publishers: {}", summary.total_publishers);
    println!("   Years:      {} - {}", summary.year_range.0, summary.year_range.1);
    println!("   By region:");
    for region in Region::ALL {
        println!("     {:<14} {:.2}M", region.label(), summary.regional_sales(region));
    }

    Ok(())
}

fn cmd_regions(input: &Path, criteria: &FilterCriteria) -> Result<(), Box<dyn std::error::Error>> {
    let records = load(input, criteria)?;
    let shares = regional_percentages(&records)?;

    println!("🌍 Regional sales shares");
    for (region, share) in &shares {
        println!("   {:<14} {:>6.2}%", region.label(), share);
    }

    Ok(())
}

fn cmd_top(
    input: &Path,
    by: GroupColumn,
    n: usize,
    measure: MeasureColumn,
    agg: Aggregation,
    criteria: &FilterCriteria,
) -> Result<(), Box<dyn std::error::Error>> {
    let records = load(input, criteria)?;
    let ranking = top_n(&records, by, n, measure, agg)?;

    println!("🏆 Top {} by {} ({})", ranking.entries.len(), by, ranking.metric_label());
    for (i, entry) in ranking.entries.iter().enumerate() {
        match ranking.measure {
            Some(_) => println!("   {:>2}. {:<24} {:>10.2}", i + 1, entry.group, entry.value),
            None => println!("   {:>2}. {:<24} {:>10}", i + 1, entry.group, entry.value as u64),
        }
    }

    Ok(())
}

fn cmd_filter(
    input: &Path,
    criteria_path: Option<&Path>,
    output: Option<&Path>,
    filters: &FilterArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    // A criteria file takes precedence over the flags.
    let criteria = match criteria_path {
        Some(path) => {
            eprintln!("📋 Reading criteria: {}", path.display());
            FilterCriteria::from_json(&fs::read_to_string(path)?)?
        }
        None => filters.criteria(),
    };

    let records = load(input, &criteria)?;
    eprintln!("✅ {} records matched", records.len());

    let json = serde_json::to_string_pretty(&records)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_report(
    input: &Path,
    n: usize,
    output: Option<&Path>,
    criteria: &FilterCriteria,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Loading dataset: {}", input.display());
    let dataset = load_dataset(input)?;
    eprintln!("   {} records", dataset.records.len());

    let options = ReportOptions {
        top_n: n,
        ..Default::default()
    };
    let report = build_report(&dataset.records, criteria, &options)?;
    eprintln!("📊 {} records matched, {} rankings", report.matched, report.rankings.len());

    let json = serde_json::to_string_pretty(&report)?;
    write_output(&json, output)?;

    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
