//! In-memory workbook model.
//!
//! A [`ReportArtifact`] is plain data: sheets of styled cells plus an
//! optional pie chart. Rendering to xlsx happens only in [`crate::writer`].

/// Visual treatment of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Plain,
    Header,
    Expense,
    Income,
    Emphasis,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Blank,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Self::styled_text(s, CellStyle::Plain)
    }

    pub fn styled_text(s: impl Into<String>, style: CellStyle) -> Self {
        Self {
            value: CellValue::Text(s.into()),
            style,
        }
    }

    pub fn header(s: impl Into<String>) -> Self {
        Self::styled_text(s, CellStyle::Header)
    }

    pub fn number(n: f64, style: CellStyle) -> Self {
        Self {
            value: CellValue::Number(n),
            style,
        }
    }

    /// Number styled by its sign: expense, income, or plain for zero
    pub fn amount(n: f64) -> Self {
        let style = if n < 0.0 {
            CellStyle::Expense
        } else if n > 0.0 {
            CellStyle::Income
        } else {
            CellStyle::Plain
        };
        Self::number(n, style)
    }

    pub fn blank() -> Self {
        Self {
            value: CellValue::Blank,
            style: CellStyle::Plain,
        }
    }

    /// Text used for column sizing
    pub fn display(&self) -> String {
        match &self.value {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => format!("{n:.2}"),
            CellValue::Blank => String::new(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.value {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.value {
            CellValue::Number(n) => Some(n),
            _ => None,
        }
    }
}

/// One worksheet, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Padding added to the widest value of each column
    pub const WIDTH_PADDING: usize = 2;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Auto-fit widths: longest displayed value per column, header included.
    pub fn column_widths(&self) -> Vec<usize> {
        let cols = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0usize; cols];
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.display().chars().count());
            }
        }
        widths
            .into_iter()
            .map(|w| w + Self::WIDTH_PADDING)
            .collect()
    }
}

/// Pie chart over a label column and a value column of one sheet
#[derive(Debug, Clone, PartialEq)]
pub struct PieChartSpec {
    pub title: String,
    pub sheet: String,
    /// Header cell naming the series
    pub series_name_row: u32,
    pub first_row: u32,
    pub last_row: u32,
    pub label_col: u16,
    pub value_col: u16,
    /// Top-left cell the chart is anchored at
    pub anchor: (u32, u16),
}

impl PieChartSpec {
    pub fn slices(&self) -> u32 {
        self.last_row - self.first_row + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartStatus {
    /// No expense categories, so no chart
    Omitted,
    /// Rendered with one slice; valid but uninformative
    SingleSlice,
    Rendered,
}

/// Finished report. Built once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportArtifact {
    sheets: Vec<Sheet>,
    chart: Option<PieChartSpec>,
}

impl ReportArtifact {
    pub(crate) fn new(sheets: Vec<Sheet>, chart: Option<PieChartSpec>) -> Self {
        Self { sheets, chart }
    }

    /// Sheets in workbook order
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn chart(&self) -> Option<&PieChartSpec> {
        self.chart.as_ref()
    }

    pub fn chart_status(&self) -> ChartStatus {
        match &self.chart {
            None => ChartStatus::Omitted,
            Some(c) if c.slices() == 1 => ChartStatus::SingleSlice,
            Some(_) => ChartStatus::Rendered,
        }
    }
}
