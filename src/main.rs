//! # Shopwise CLI (`shopwise`)
//!
//! ## Usage
//!
//! ```bash
//! shopwise --config ./config/shopwise.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `shopwise categories` | List catalog categories and product counts |
//! | `shopwise recommend "<query>"` | Recommend products for a shopping query |
//! | `shopwise translate "<text>" --language <lang>` | Translate text |
//! | `shopwise describe <category> <id>` | Generate a product description |
//!
//! ## Examples
//!
//! ```bash
//! shopwise recommend "laptop for college" --max-budget 60000 --brand HP
//! shopwise recommend "best phone camera" --language tamil --json
//! RUST_LOG=shopwise_core=debug shopwise recommend "headphones"
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopwise::recommend::RecommendArgs;
use shopwise::{categories, config, recommend, translate_cmd};

/// Shopwise — find and compare products with an LLM over a local catalog.
#[derive(Parser)]
#[command(
    name = "shopwise",
    about = "Shopwise — retrieval-augmented product recommendations",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/shopwise.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog categories with product counts.
    Categories,

    /// Recommend products for a free-text shopping query.
    ///
    /// Extracts intent with the LLM, retrieves matching catalog products,
    /// then asks the LLM to analyse and compare the shortlist.
    Recommend {
        /// What the shopper is looking for.
        query: String,

        /// Lower budget bound.
        #[arg(long)]
        min_budget: Option<f64>,

        /// Upper budget bound. Products above it are excluded.
        #[arg(long)]
        max_budget: Option<f64>,

        /// Only products whose name contains this brand (repeatable).
        #[arg(long = "brand")]
        brands: Vec<String>,

        /// Categories of interest, passed to the LLM as a preference (repeatable).
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Output language, by name or ISO code (e.g. `tamil`, `ta`).
        #[arg(long)]
        language: Option<String>,

        /// Print the recommendation as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Translate text into a supported language.
    Translate {
        text: String,

        /// Target language, by name or ISO code.
        #[arg(long)]
        language: String,
    },

    /// Generate a description for one catalog product.
    Describe {
        category: String,
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shopwise=info,shopwise_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Categories => {
            categories::run_categories(&cfg)?;
        }
        Commands::Recommend {
            query,
            min_budget,
            max_budget,
            brands,
            categories,
            language,
            json,
        } => {
            let args = RecommendArgs {
                text: query,
                min_budget,
                max_budget,
                brands,
                categories,
                language,
                json,
            };
            recommend::run_recommend(&cfg, &args).await?;
        }
        Commands::Translate { text, language } => {
            translate_cmd::run_translate(&cfg, &text, &language).await?;
        }
        Commands::Describe { category, id } => {
            recommend::run_describe(&cfg, &category, &id).await?;
        }
    }

    Ok(())
}
