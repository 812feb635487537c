use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::info;
use spendsheet_classify::{ModelPaths, TextClassifier, TrainedModel};
use spendsheet_ingest::load_training_set;
use spendsheet_report::{ChartStatus, Pipeline, RunOutcome, select_categorizer};
use std::path::{Path, PathBuf};

mod config;

use config::{Overrides, init_config, load_config};

#[derive(Parser, Debug)]
#[command(
    name = "spendsheet",
    version,
    about = "Categorize a transaction CSV into an xlsx spending report"
)]
struct Cli {
    /// Config file (default: ./spendsheet.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a categorized report from a CSV with Description and Amount columns
    Report {
        /// Input ledger CSV
        csv: PathBuf,

        /// Output name without extension (default: finance_report)
        #[arg(long)]
        output_prefix: Option<String>,

        /// Use keyword rules even if a learned model is available
        #[arg(long)]
        keyword_only: bool,

        /// Classifier artifact (default: expense_model.json)
        #[arg(long)]
        model: Option<PathBuf>,

        /// Vectorizer artifact (default: expense_vectorizer.json)
        #[arg(long)]
        vectorizer: Option<PathBuf>,
    },

    /// Fit the learned categorizer from a CSV with Description and Category columns
    Train {
        /// Labelled training CSV
        csv: PathBuf,

        #[arg(long)]
        model_out: Option<PathBuf>,

        #[arg(long)]
        vectorizer_out: Option<PathBuf>,
    },

    /// Write a default config file with the built-in keyword rules
    InitConfig,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Report {
            csv,
            output_prefix,
            keyword_only,
            model,
            vectorizer,
        } => {
            let cfg = load_config(cli.config.as_deref())?.apply(Overrides {
                output_prefix,
                keyword_only,
                model,
                vectorizer,
            });

            if !csv.exists() {
                bail!("CSV not found: {}", csv.display());
            }

            let categorizer = select_categorizer(
                cfg.classifier.keyword_only,
                &cfg.model_paths(),
                cfg.keyword_categorizer()?,
            );
            let pipeline = Pipeline::new(categorizer, &cfg.output.prefix);
            let outcome = pipeline
                .run(&csv)
                .with_context(|| format!("building report from {}", csv.display()))?;
            print_outcome(&outcome);
        }

        Command::Train {
            csv,
            model_out,
            vectorizer_out,
        } => {
            let cfg = load_config(cli.config.as_deref())?;
            let defaults = cfg.model_paths();
            let paths = ModelPaths {
                classifier: model_out.unwrap_or(defaults.classifier),
                vectorizer: vectorizer_out.unwrap_or(defaults.vectorizer),
            };
            train(&csv, &paths)?;
        }

        Command::InitConfig => {
            let path = cli
                .config
                .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_PATH));
            init_config(&path)?;
        }
    }

    Ok(())
}

fn train(csv: &Path, paths: &ModelPaths) -> Result<()> {
    let examples =
        load_training_set(csv).with_context(|| format!("loading {}", csv.display()))?;
    info!("Training on {} labelled rows from {}", examples.len(), csv.display());

    let pairs: Vec<(&str, &str)> = examples
        .iter()
        .map(|e| (e.description.as_str(), e.category.as_str()))
        .collect();
    let model = TrainedModel::fit(&pairs)?;
    model.save(paths)?;

    println!(
        "Trained {} labels; wrote {} and {}",
        model.classifier.labels().len(),
        paths.classifier.display(),
        paths.vectorizer.display()
    );
    Ok(())
}

fn print_outcome(outcome: &RunOutcome) {
    let s = &outcome.summary;
    println!("Saved as: {}", outcome.path.display());
    println!(
        "Categorized {} transactions using {}",
        outcome.transactions, outcome.mode
    );
    println!("Total income:   {:>12.2}", s.total_income);
    println!("Total expenses: {:>12.2}", s.total_expense);
    println!("Net balance:    {:>12.2}", s.net_balance());
    for c in &s.categories {
        println!("  {:<16} {:>12.2}", c.category.as_str(), c.total);
    }
    match outcome.chart {
        ChartStatus::Omitted => println!("Sheets generated: Transactions, Summary (no pie chart)"),
        ChartStatus::SingleSlice | ChartStatus::Rendered => {
            println!("Sheets generated: Transactions, Summary + Pie Chart")
        }
    }
}
