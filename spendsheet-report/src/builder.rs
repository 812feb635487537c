//! Assemble the two-sheet report from categorized transactions.
//!
//! Summary sheet layout (0-based rows):
//!   0     Overview | Amount
//!   1     Total Income
//!   2     Total Expenses
//!   3     Net Balance
//!   4     (blank)
//!   5     Category | Total Spent
//!   6..   one row per category

use anyhow::{Result, ensure};
use log::warn;
use spendsheet_core::{Summary, Transaction};
use spendsheet_ingest::Ledger;

use crate::artifact::{Cell, CellStyle, PieChartSpec, ReportArtifact, Sheet};

pub const TRANSACTIONS_SHEET: &str = "Transactions";
pub const SUMMARY_SHEET: &str = "Summary";
pub const CHART_TITLE: &str = "Spending by Category";
pub const CATEGORY_COLUMN: &str = "Category";

const BREAKDOWN_HEADER_ROW: u32 = 5;
const BREAKDOWN_FIRST_ROW: u32 = 6;
/// Cell D2
const CHART_ANCHOR: (u32, u16) = (1, 3);
/// Longest text an xlsx cell accepts
pub const MAX_CELL_CHARS: usize = 32_767;

pub struct ReportBuilder;

impl ReportBuilder {
    /// Build the artifact. `txns` must line up one-to-one with `ledger.rows`.
    pub fn build(ledger: &Ledger, txns: &[Transaction], summary: &Summary) -> Result<ReportArtifact> {
        ensure!(
            ledger.len() == txns.len(),
            "ledger has {} rows but {} transactions were categorized",
            ledger.len(),
            txns.len()
        );

        let transactions = Self::transactions_sheet(ledger, txns);
        let summary_sheet = Self::summary_sheet(summary);
        let chart = Self::chart(summary)?;

        Ok(ReportArtifact::new(vec![transactions, summary_sheet], chart))
    }

    fn transactions_sheet(ledger: &Ledger, txns: &[Transaction]) -> Sheet {
        let mut sheet = Sheet::new(TRANSACTIONS_SHEET);

        // an existing Category column is overwritten in place, otherwise appended
        let existing = ledger.column_index(CATEGORY_COLUMN);
        let mut header: Vec<Cell> = ledger
            .headers
            .iter()
            .enumerate()
            .map(|(col, h)| Cell::header(fit_cell(h, 0, col)))
            .collect();
        if existing.is_none() {
            header.push(Cell::header(CATEGORY_COLUMN));
        }
        sheet.push_row(header);

        let amount_idx = ledger.amount_index();
        for (n, (row, txn)) in ledger.rows.iter().zip(txns).enumerate() {
            let mut cells: Vec<Cell> = row
                .fields
                .iter()
                .enumerate()
                .map(|(i, field)| {
                    if i == amount_idx {
                        Cell::amount(txn.amount)
                    } else if Some(i) == existing {
                        Cell::text(txn.category.as_str())
                    } else {
                        Cell::text(fit_cell(field, n + 1, i))
                    }
                })
                .collect();
            if existing.is_none() {
                cells.resize(ledger.headers.len(), Cell::text(""));
                cells.push(Cell::text(txn.category.as_str()));
            }
            sheet.push_row(cells);
        }

        sheet
    }

    fn summary_sheet(summary: &Summary) -> Sheet {
        let mut sheet = Sheet::new(SUMMARY_SHEET);

        sheet.push_row(vec![Cell::header("Overview"), Cell::header("Amount")]);
        sheet.push_row(vec![
            Cell::text("Total Income"),
            Cell::number(summary.total_income, CellStyle::Income),
        ]);
        sheet.push_row(vec![
            Cell::text("Total Expenses"),
            Cell::number(summary.total_expense, CellStyle::Expense),
        ]);
        sheet.push_row(vec![
            Cell::styled_text("Net Balance", CellStyle::Emphasis),
            Cell::number(summary.net_balance(), CellStyle::Emphasis),
        ]);
        sheet.push_row(vec![Cell::blank()]);

        sheet.push_row(vec![Cell::header("Category"), Cell::header("Total Spent")]);
        for entry in &summary.categories {
            sheet.push_row(vec![
                Cell::text(entry.category.as_str()),
                Cell::number(entry.total, CellStyle::Plain),
            ]);
        }

        sheet
    }

    fn chart(summary: &Summary) -> Result<Option<PieChartSpec>> {
        if summary.has_no_expenses() {
            return Ok(None);
        }
        let n = u32::try_from(summary.categories.len())?;
        Ok(Some(PieChartSpec {
            title: CHART_TITLE.to_string(),
            sheet: SUMMARY_SHEET.to_string(),
            series_name_row: BREAKDOWN_HEADER_ROW,
            first_row: BREAKDOWN_FIRST_ROW,
            last_row: BREAKDOWN_FIRST_ROW + n - 1,
            label_col: 0,
            value_col: 1,
            anchor: CHART_ANCHOR,
        }))
    }
}

/// Cut text to the xlsx cell limit so one oversized field cannot fail the run.
fn fit_cell(text: &str, row: usize, col: usize) -> &str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        Some((end, _)) => {
            warn!(
                "Transactions cell at row {row}, column {col} has {} characters; truncated to {MAX_CELL_CHARS}",
                text.chars().count()
            );
            &text[..end]
        }
        None => text,
    }
}
