use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use spendsheet_classify::{
    CategorizerMode, KeywordCategorizer, ModelPaths, TrainedModel,
};
use spendsheet_ingest::IngestError;
use spendsheet_report::{ChartStatus, Pipeline, select_categorizer};
use std::fs;
use std::path::{Path, PathBuf};

fn sample_csv() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("transactions.csv")
}

fn keyword_pipeline(dir: &Path) -> Pipeline {
    Pipeline::new(
        Box::new(KeywordCategorizer::default()),
        dir.join("finance_report"),
    )
}

fn write_csv(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("input.csv");
    fs::write(&path, body).unwrap();
    path
}

fn sheet(path: &Path, name: &str) -> Range<Data> {
    let mut wb: Xlsx<_> = open_workbook(path).unwrap();
    wb.worksheet_range(name).unwrap()
}

fn number(range: &Range<Data>, row: u32, col: u32) -> f64 {
    match range.get_value((row, col)) {
        Some(Data::Float(f)) => *f,
        Some(Data::Int(i)) => *i as f64,
        other => panic!("expected number at ({row},{col}), got {other:?}"),
    }
}

fn text(range: &Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        Some(Data::String(s)) => s.clone(),
        other => panic!("expected text at ({row},{col}), got {other:?}"),
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

const SCENARIO: &str = "Date,Description,Amount\n\
    2025-01-03,Swiggy Order,-450.50\n\
    2025-01-05,Salary Credit,50000.00\n\
    2025-01-06,Netflix,-499\n";

/// Three-row ledger under keyword rules, checked through the written workbook.
#[test]
fn test_scenario_report() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), SCENARIO);

    let outcome = keyword_pipeline(dir.path()).run(&csv).unwrap();

    assert_eq!(outcome.path, dir.path().join("finance_report.xlsx"));
    assert_eq!(outcome.transactions, 3);
    assert_eq!(outcome.mode, CategorizerMode::Keyword);
    assert_eq!(outcome.chart, ChartStatus::Rendered);
    assert!(close(outcome.summary.total_income, 50000.00));
    assert!(close(outcome.summary.total_expense, 949.50));
    assert!(close(outcome.summary.net_balance(), 49050.50));

    let mut wb: Xlsx<_> = open_workbook(&outcome.path).unwrap();
    assert_eq!(wb.sheet_names(), vec!["Transactions", "Summary"]);

    let txns = sheet(&outcome.path, "Transactions");
    assert_eq!(text(&txns, 0, 3), "Category");
    assert_eq!(text(&txns, 1, 3), "Food");
    assert_eq!(text(&txns, 2, 3), "Income");
    assert_eq!(text(&txns, 3, 3), "Subscriptions");
    assert!(close(number(&txns, 1, 2), -450.50));
    assert_eq!(text(&txns, 3, 1), "Netflix");

    let summary = sheet(&outcome.path, "Summary");
    assert_eq!(text(&summary, 0, 0), "Overview");
    assert!(close(number(&summary, 1, 1), 50000.00));
    assert!(close(number(&summary, 2, 1), 949.50));
    assert!(close(number(&summary, 3, 1), 49050.50));
    assert_eq!(text(&summary, 5, 0), "Category");
    assert_eq!(text(&summary, 6, 0), "Food");
    assert!(close(number(&summary, 7, 1), 499.0));
}

/// Repeated runs against the same prefix never overwrite earlier output.
#[test]
fn test_output_names_do_not_collide() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), SCENARIO);
    let pipeline = keyword_pipeline(dir.path());

    fs::write(dir.path().join("finance_report.xlsx"), b"keep me").unwrap();

    let first = pipeline.run(&csv).unwrap().path;
    assert_eq!(first, dir.path().join("finance_report_1.xlsx"));

    let second = pipeline.run(&csv).unwrap().path;
    assert_eq!(second, dir.path().join("finance_report_2.xlsx"));

    assert_eq!(fs::read(dir.path().join("finance_report.xlsx")).unwrap(), b"keep me");
}

/// Headers-only input still produces a workbook, with zero totals and no chart.
#[test]
fn test_empty_ledger_report() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), "Date,Description,Amount\n");

    let outcome = keyword_pipeline(dir.path()).run(&csv).unwrap();
    assert_eq!(outcome.transactions, 0);
    assert_eq!(outcome.chart, ChartStatus::Omitted);
    assert!(outcome.summary.categories.is_empty());
    assert_eq!(outcome.summary.total_income, 0.0);
    assert_eq!(outcome.summary.total_expense, 0.0);

    let summary = sheet(&outcome.path, "Summary");
    assert!(close(number(&summary, 1, 1), 0.0));
    assert!(close(number(&summary, 3, 1), 0.0));
    assert_eq!(text(&summary, 5, 1), "Total Spent");
}

/// Income-only ledgers render without a chart.
#[test]
fn test_no_expenses_omits_chart() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), "Description,Amount\nSalary,1000\nRefund,(0)\n");
    let outcome = keyword_pipeline(dir.path()).run(&csv).unwrap();
    assert_eq!(outcome.chart, ChartStatus::Omitted);
    assert!(outcome.path.exists());
}

/// A description beyond the cell limit is cut down instead of failing the run.
#[test]
fn test_oversized_description_still_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    let body = format!("Description,Amount\nSwiggy {},-10\n", "y".repeat(40_000));
    let csv = write_csv(dir.path(), &body);

    let outcome = keyword_pipeline(dir.path()).run(&csv).unwrap();
    assert_eq!(outcome.path, dir.path().join("finance_report.xlsx"));
    assert_eq!(outcome.summary.total_for("Food"), Some(10.0));

    let txns = sheet(&outcome.path, "Transactions");
    let description = text(&txns, 1, 0);
    assert_eq!(description.chars().count(), 32_767);
    assert!(description.starts_with("Swiggy y"));
    assert_eq!(text(&txns, 1, 2), "Food");
}

/// Missing required columns abort before any output exists.
#[test]
fn test_missing_column_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let csv = write_csv(dir.path(), "Date,Memo,Amount\n2025-01-01,Uber,-10\n");

    let err = keyword_pipeline(dir.path()).run(&csv).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<IngestError>(),
        Some(IngestError::MissingColumns { .. })
    ));
    assert!(!dir.path().join("finance_report.xlsx").exists());
}

#[test]
fn test_unreadable_input_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = keyword_pipeline(dir.path())
        .run(dir.path().join("absent.csv"))
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<IngestError>(),
        Some(IngestError::Open { .. })
    ));
}

/// The sample ledger at the workspace root, including malformed and
/// parenthesized amounts.
#[test]
fn test_sample_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = keyword_pipeline(dir.path()).run(sample_csv()).unwrap();

    assert_eq!(outcome.transactions, 12);
    assert!(close(outcome.summary.total_income, 51999.50));
    assert!(close(outcome.summary.total_expense, 7575.85));

    let order: Vec<_> = outcome
        .summary
        .categories
        .iter()
        .map(|c| c.category.as_str())
        .collect();
    assert_eq!(
        order,
        vec!["Food", "Subscriptions", "Travel", "Shopping", "Bills", "Groceries", "Others"]
    );
    assert_eq!(outcome.summary.total_for("Food"), Some(715.50));
    assert_eq!(outcome.summary.total_for("Shopping"), Some(2349.0));

    let txns = sheet(&outcome.path, "Transactions");
    assert_eq!(text(&txns, 12, 1), "Pending adjustment");
    assert!(close(number(&txns, 12, 2), 0.0));
    assert_eq!(text(&txns, 12, 3), "Others");
}

/// A trained model on disk is picked up and owns the label space.
#[test]
fn test_learned_model_run() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ModelPaths {
        classifier: dir.path().join("expense_model.json"),
        vectorizer: dir.path().join("expense_vectorizer.json"),
    };
    TrainedModel::fit(&[
        ("Swiggy Order", "Dining"),
        ("Zomato order dinner", "Dining"),
        ("Netflix plan", "Streaming"),
        ("Hotstar plan", "Streaming"),
        ("Monthly salary", "Payroll"),
        ("Salary credit", "Payroll"),
    ])
    .unwrap()
    .save(&paths)
    .unwrap();

    let categorizer = select_categorizer(false, &paths, KeywordCategorizer::default());
    let pipeline = Pipeline::new(categorizer, dir.path().join("learned"));
    let csv = write_csv(dir.path(), SCENARIO);
    let outcome = pipeline.run(&csv).unwrap();

    assert_eq!(outcome.mode, CategorizerMode::Learned);
    assert_eq!(outcome.path, dir.path().join("learned.xlsx"));
    let txns = sheet(&outcome.path, "Transactions");
    assert_eq!(text(&txns, 1, 3), "Dining");
    assert_eq!(text(&txns, 2, 3), "Payroll");
    assert_eq!(text(&txns, 3, 3), "Streaming");
}
