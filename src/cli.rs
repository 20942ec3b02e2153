//! Command-line interface for the review harvester.

use std::path::PathBuf;

use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{validate_config, DEFAULT_PAGE_SIZE, STEAM_STORE_URL};
use crate::error::{HarvestError, Result};
use crate::harvester::harvest_reviews;
use crate::language::normalize_language;
use crate::output::save_csv;
use crate::translate::Translator;
use crate::types::{PurchaseType, RetrievalConfig, ReviewFilter, ReviewType};

/// Steam Review Harvester - Download app reviews and export them to CSV.
#[derive(Parser)]
#[command(name = "steam-review-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Numeric Steam app id (e.g., 440 for Team Fortress 2)
    pub app_id: String,

    /// Path of the CSV file to write
    pub output_file: PathBuf,

    /// Review sort mode
    #[arg(short, long, value_enum, default_value_t = ReviewFilter::All)]
    pub filter: ReviewFilter,

    /// Review language: Steam name, short API code, or 'all'
    #[arg(short, long, default_value = "all")]
    pub language: String,

    /// Look-back window in days for helpful reviews ('all' filter only)
    #[arg(short, long)]
    pub day_range: Option<u32>,

    /// Number of batches to request ('recent'/'updated' filters only)
    #[arg(short, long)]
    pub batches: Option<u32>,

    /// Which recommendation kinds to include
    #[arg(short, long, value_enum, default_value_t = ReviewType::All)]
    pub review_type: ReviewType,

    /// Filter by how the app was obtained
    #[arg(short, long, value_enum, default_value_t = PurchaseType::Steam)]
    pub purchase_type: PurchaseType,

    /// Reviews per page (1-100)
    #[arg(short = 'n', long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub num_per_page: u32,

    /// Translate non-English reviews to English via DeepL
    #[arg(short, long)]
    pub translate: bool,

    /// DeepL API key (required with --translate)
    #[arg(long)]
    pub deepl_api_key: Option<String>,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    export_command(cli)
}

/// Execute the export command.
fn export_command(cli: Cli) -> Result<()> {
    let language = normalize_language(&cli.language)?;

    let config = RetrievalConfig {
        app_id: cli.app_id,
        filter: cli.filter,
        language,
        day_range: cli.day_range,
        review_type: cli.review_type,
        purchase_type: cli.purchase_type,
        num_per_page: cli.num_per_page,
        batches: cli.batches,
    };

    // Validate inputs before making HTTP requests
    validate_config(&config)?;

    if config.batches.is_some() && !config.filter.follows_cursor() {
        tracing::warn!(
            filter = config.filter.as_str(),
            "batches is ignored for this filter"
        );
    }

    // The credential check happens before any network work
    let translator = if cli.translate {
        let api_key = cli.deepl_api_key.as_deref().ok_or(HarvestError::MissingApiKey)?;
        Some(Translator::new(api_key)?)
    } else {
        None
    };

    println!(
        "{} reviews for app {} ({} filter)",
        style("Downloading").bold(),
        style(&config.app_id).cyan(),
        style(config.filter.as_str()).green()
    );
    println!();

    // Create progress spinner
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );

    pb.set_message("Fetching review pages...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let rows = match harvest_reviews(STEAM_STORE_URL, &config, translator.as_ref()) {
        Ok(rows) => rows,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Writing CSV...");

    let output_path = match save_csv(&rows, &cli.output_file) {
        Ok(path) => path,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    println!("  Reviews: {}", style(rows.len()).green());
    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );

    Ok(())
}
