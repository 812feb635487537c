//! Render a [`ReportArtifact`] to xlsx and claim a collision-free file name.

use anyhow::{Context, Result};
use rust_xlsxwriter::{Chart, ChartType, Color, Format, FormatBorder, Workbook, Worksheet};
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::artifact::{CellStyle, CellValue, PieChartSpec, ReportArtifact, Sheet};

const MONEY_FORMAT: &str = "#,##0.00";

struct Formats {
    plain: Format,
    money: Format,
    header: Format,
    expense: Format,
    income: Format,
    emphasis: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            plain: Format::new(),
            money: Format::new().set_num_format(MONEY_FORMAT),
            header: Format::new()
                .set_bold()
                .set_background_color(Color::RGB(0xD9E1F2))
                .set_border_bottom(FormatBorder::Thin),
            expense: Format::new()
                .set_num_format(MONEY_FORMAT)
                .set_font_color(Color::RGB(0x9C0006))
                .set_background_color(Color::RGB(0xFFC7CE)),
            income: Format::new()
                .set_num_format(MONEY_FORMAT)
                .set_font_color(Color::RGB(0x006100))
                .set_background_color(Color::RGB(0xC6EFCE)),
            emphasis: Format::new().set_bold().set_num_format(MONEY_FORMAT),
        }
    }

    fn for_cell(&self, style: CellStyle, numeric: bool) -> &Format {
        match style {
            CellStyle::Plain if numeric => &self.money,
            CellStyle::Plain => &self.plain,
            CellStyle::Header => &self.header,
            CellStyle::Expense => &self.expense,
            CellStyle::Income => &self.income,
            CellStyle::Emphasis => &self.emphasis,
        }
    }
}

/// Build the xlsx workbook for an artifact.
pub fn render(artifact: &ReportArtifact) -> Result<Workbook> {
    let formats = Formats::new();
    let mut workbook = Workbook::new();

    for sheet in artifact.sheets() {
        let mut ws = render_sheet(sheet, &formats)?;
        if let Some(chart) = artifact.chart().filter(|c| c.sheet == sheet.name) {
            insert_pie(&mut ws, chart)?;
        }
        workbook.push_worksheet(ws);
    }

    Ok(workbook)
}

fn render_sheet(sheet: &Sheet, formats: &Formats) -> Result<Worksheet> {
    let mut ws = Worksheet::new();
    ws.set_name(&sheet.name)
        .with_context(|| format!("invalid sheet name {}", sheet.name))?;

    for (r, row) in sheet.rows.iter().enumerate() {
        let r = u32::try_from(r)?;
        for (c, cell) in row.iter().enumerate() {
            let c = u16::try_from(c)?;
            match &cell.value {
                CellValue::Text(s) => {
                    ws.write_string_with_format(r, c, s, formats.for_cell(cell.style, false))?;
                }
                CellValue::Number(n) => {
                    ws.write_number_with_format(r, c, *n, formats.for_cell(cell.style, true))?;
                }
                CellValue::Blank => {}
            }
        }
    }

    for (c, width) in sheet.column_widths().into_iter().enumerate() {
        ws.set_column_width(u16::try_from(c)?, width as f64)?;
    }

    Ok(ws)
}

fn insert_pie(ws: &mut Worksheet, pie: &PieChartSpec) -> Result<()> {
    let sheet = pie.sheet.as_str();
    let mut chart = Chart::new(ChartType::Pie);
    chart
        .add_series()
        .set_name((sheet, pie.series_name_row, pie.value_col))
        .set_categories((sheet, pie.first_row, pie.label_col, pie.last_row, pie.label_col))
        .set_values((sheet, pie.first_row, pie.value_col, pie.last_row, pie.value_col));
    chart.title().set_name(pie.title.as_str());

    let (row, col) = pie.anchor;
    ws.insert_chart(row, col, &chart)?;
    Ok(())
}

/// Name tried on the given attempt: `P.xlsx`, then `P_1.xlsx`, `P_2.xlsx`, ...
pub fn output_candidate(prefix: &Path, attempt: u32) -> PathBuf {
    let mut name = OsString::from(prefix.as_os_str());
    if attempt > 0 {
        name.push(format!("_{attempt}"));
    }
    name.push(".xlsx");
    PathBuf::from(name)
}

/// Render and write the report, never overwriting an existing file.
///
/// The workbook is rendered to memory first; each candidate path is then
/// claimed with create-new semantics, so a path taken by another file moves
/// on to the next suffix. Not an atomic reservation across processes.
pub fn write_report(artifact: &ReportArtifact, prefix: impl AsRef<Path>) -> Result<PathBuf> {
    let bytes = render(artifact)?
        .save_to_buffer()
        .context("render workbook")?;

    let prefix = prefix.as_ref();
    let mut attempt = 0u32;
    loop {
        let path = output_candidate(prefix, attempt);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                if let Err(err) = file.write_all(&bytes) {
                    let _ = fs::remove_file(&path);
                    return Err(err).with_context(|| format!("write {}", path.display()));
                }
                return Ok(path);
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                attempt = attempt
                    .checked_add(1)
                    .context("exhausted output file suffixes")?;
            }
            Err(err) => {
                return Err(err).with_context(|| format!("create {}", path.display()));
            }
        }
    }
}
