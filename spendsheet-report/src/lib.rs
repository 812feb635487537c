//! spendsheet-report: report assembly, xlsx output and the end-to-end pipeline.

pub mod artifact;
pub mod builder;
pub mod pipeline;
pub mod writer;

pub use artifact::{Cell, CellStyle, CellValue, ChartStatus, PieChartSpec, ReportArtifact, Sheet};
pub use builder::{CHART_TITLE, ReportBuilder, SUMMARY_SHEET, TRANSACTIONS_SHEET};
pub use pipeline::{Pipeline, RunOutcome, select_categorizer};
pub use writer::{output_candidate, render, write_report};
