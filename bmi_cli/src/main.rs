use bmi_core::*;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bmilog")]
#[command(about = "BMI measurement log with trend display", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new measurement
    Add {
        /// Username the measurement belongs to
        #[arg(long)]
        user: String,

        /// Body weight in kilograms
        #[arg(long)]
        weight: f64,

        /// Height in centimeters
        #[arg(long)]
        height: f64,
    },

    /// Show a user's BMI trend
    History {
        /// Username to look up (matched exactly)
        #[arg(long)]
        user: String,

        /// Emit the trend as JSON instead of a chart
        #[arg(long)]
        json: bool,
    },

    /// Export a user's records to a CSV file
    Export {
        /// Username to export (matched exactly)
        #[arg(long)]
        user: String,

        /// Output file path
        #[arg(long)]
        out: PathBuf,
    },

    /// List known users and their record counts
    Users,
}

fn main() -> Result<()> {
    // Initialize logging
    bmi_core::logging::init();

    let cli = Cli::parse();

    // Determine database location
    let config = Config::load()?;
    let db_path = match cli.data_dir {
        Some(dir) => dir.join("bmi_data.db"),
        None => config.db_path(),
    };

    match cli.command {
        Commands::Add {
            user,
            weight,
            height,
        } => cmd_add(&db_path, &user, weight, height),
        Commands::History { user, json } => cmd_history(&db_path, &user, json, &config),
        Commands::Export { user, out } => cmd_export(&db_path, &user, &out),
        Commands::Users => cmd_users(&db_path),
    }
}

fn cmd_add(db_path: &Path, user: &str, weight: f64, height: f64) -> Result<()> {
    // Compute before touching the store: rejected input writes nothing
    let bmi = compute_bmi(weight, height)?;
    let category = classify(bmi);

    let store = RecordStore::open(db_path)?;
    let id = store.append(user, weight, height, bmi)?;

    println!("BMI: {:.2} ({})", bmi, category);
    println!("✓ Recorded measurement #{} for {}", id, user);

    Ok(())
}

fn cmd_history(db_path: &Path, user: &str, json: bool, config: &Config) -> Result<()> {
    let store = RecordStore::open(db_path)?;
    let points = store.history(user)?;

    if points.is_empty() {
        println!("No records found for {}.", user);
        return Ok(());
    }

    if json {
        let rows: Vec<JsonPoint> = points.iter().map(JsonPoint::from).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    render_trend(user, &points, config.chart.width);

    Ok(())
}

fn cmd_export(db_path: &Path, user: &str, out: &Path) -> Result<()> {
    let store = RecordStore::open(db_path)?;
    let count = export_csv(&store, user, out)?;

    println!("✓ Exported {} records to {}", count, out.display());

    Ok(())
}

fn cmd_users(db_path: &Path) -> Result<()> {
    let store = RecordStore::open(db_path)?;
    let users = store.users()?;

    if users.is_empty() {
        println!("No records yet.");
        return Ok(());
    }

    println!("Users:");
    for user in &users {
        println!("  {} ({} records)", user.username, user.records);
    }

    Ok(())
}

/// One trend point as emitted by `history --json`
#[derive(serde::Serialize)]
struct JsonPoint {
    timestamp: String,
    bmi: f64,
}

impl From<&TrendPoint> for JsonPoint {
    fn from(point: &TrendPoint) -> Self {
        JsonPoint {
            timestamp: point.recorded_at.format(TIMESTAMP_FORMAT).to_string(),
            bmi: point.bmi,
        }
    }
}

fn render_trend(user: &str, points: &[TrendPoint], width: usize) {
    // Chart area never narrower than 16 columns
    let width = width.max(16);

    let min = points.iter().map(|p| p.bmi).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.bmi).fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│  BMI TREND: {}", user);
    println!("╰─────────────────────────────────────────╯");
    println!();

    for point in points {
        let filled = if span > 0.0 {
            // Lowest reading gets one cell, highest fills the full width
            1 + (((point.bmi - min) / span) * (width - 1) as f64).round() as usize
        } else {
            // Flat trend, draw mid-length bars
            width / 2
        };
        let bar = "█".repeat(filled);
        println!(
            "  {}  {:<bar_width$}  {:>6.2}  {}",
            point.recorded_at.format(TIMESTAMP_FORMAT),
            bar,
            point.bmi,
            classify(point.bmi),
            bar_width = width
        );
    }

    println!();
    println!(
        "  Records: {}   Low: {:.2}   High: {:.2}",
        points.len(),
        min,
        max
    );

    if let Some(latest) = points.last() {
        println!(
            "  Latest: {:.2} ({}) at {}",
            latest.bmi,
            classify(latest.bmi),
            latest.recorded_at.format(TIMESTAMP_FORMAT)
        );
    }
}
