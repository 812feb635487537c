//! End-to-end run: load → normalize → categorize → aggregate → build → write.

use anyhow::{Context, Result};
use log::{info, warn};
use spendsheet_classify::{
    Categorizer, CategorizerMode, KeywordCategorizer, LearnedCategorizer, ModelPaths,
};
use spendsheet_core::{Summary, Transaction, aggregate, normalize_amount};
use spendsheet_ingest::{Ledger, load_ledger};
use std::path::{Path, PathBuf};

use crate::artifact::ChartStatus;
use crate::builder::ReportBuilder;
use crate::writer::write_report;

pub const DEFAULT_OUTPUT_PREFIX: &str = "finance_report";

/// Pick the categorizer for a run.
///
/// A failed model load downgrades to `keywords` with a warning instead of
/// failing the run.
pub fn select_categorizer(
    keyword_only: bool,
    model: &ModelPaths,
    keywords: KeywordCategorizer,
) -> Box<dyn Categorizer> {
    if keyword_only {
        info!(
            "Keyword-only categorization requested ({})",
            rule_order(&keywords)
        );
        return Box::new(keywords);
    }

    match LearnedCategorizer::load(model) {
        Ok(learned) => {
            info!(
                "Loaded learned model ({} labels) from {}",
                learned.labels().len(),
                model.classifier.display()
            );
            Box::new(learned)
        }
        Err(err) => {
            warn!(
                "Learned model unavailable ({err:#}); falling back to keyword rules ({})",
                rule_order(&keywords)
            );
            Box::new(keywords)
        }
    }
}

fn rule_order(keywords: &KeywordCategorizer) -> String {
    let names: Vec<&str> = keywords.categories().map(|c| c.as_str()).collect();
    format!("{} > {}", names.join(" > "), spendsheet_core::Category::OTHERS)
}

/// Result of one completed run
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub path: PathBuf,
    pub summary: Summary,
    pub transactions: usize,
    pub mode: CategorizerMode,
    pub chart: ChartStatus,
}

pub struct Pipeline {
    categorizer: Box<dyn Categorizer>,
    output_prefix: PathBuf,
}

impl Pipeline {
    pub fn new(categorizer: Box<dyn Categorizer>, output_prefix: impl Into<PathBuf>) -> Self {
        Self {
            categorizer,
            output_prefix: output_prefix.into(),
        }
    }

    pub fn mode(&self) -> CategorizerMode {
        self.categorizer.mode()
    }

    /// Normalize and label every ledger row, preserving input order.
    pub fn categorize(&self, ledger: &Ledger) -> Vec<Transaction> {
        ledger
            .rows
            .iter()
            .map(|row| {
                let description = ledger.description(row);
                Transaction::new(
                    ledger.date(row).map(str::to_string),
                    description,
                    normalize_amount(ledger.amount_text(row)),
                    self.categorizer.classify(description),
                )
            })
            .collect()
    }

    /// Run on a CSV file. Input errors abort before any file is created.
    pub fn run(&self, csv_path: impl AsRef<Path>) -> Result<RunOutcome> {
        let csv_path = csv_path.as_ref();
        let ledger =
            load_ledger(csv_path).with_context(|| format!("loading {}", csv_path.display()))?;

        if ledger.is_empty() {
            info!("{} has no transactions; writing an all-zero report", csv_path.display());
        }

        let txns = self.categorize(&ledger);
        let summary = aggregate(&txns);
        let artifact = ReportBuilder::build(&ledger, &txns, &summary)?;

        let chart = artifact.chart_status();
        match chart {
            ChartStatus::Omitted => info!("No expenses found; report created without pie chart"),
            ChartStatus::SingleSlice => {
                warn!("Only one expense category found; pie chart may not display well")
            }
            ChartStatus::Rendered => {}
        }

        let path = write_report(&artifact, &self.output_prefix)?;
        info!(
            "Saved {} ({} transactions, {})",
            path.display(),
            txns.len(),
            self.mode()
        );

        Ok(RunOutcome {
            path,
            summary,
            transactions: txns.len(),
            mode: self.mode(),
            chart,
        })
    }
}
