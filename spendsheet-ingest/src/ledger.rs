//! Load a transaction ledger CSV.
//!
//! Expected header (column order is free, extra columns are kept):
//! Date,Description,Amount

use crate::error::IngestError;
use std::io::Read;
use std::path::{Path, PathBuf};

pub const DESCRIPTION_COLUMN: &str = "Description";
pub const AMOUNT_COLUMN: &str = "Amount";
pub const DATE_COLUMN: &str = "Date";

/// One raw CSV row, padded to the header width
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub fields: Vec<String>,
}

/// Raw ledger: trimmed header names plus every data row in input order
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    pub headers: Vec<String>,
    pub rows: Vec<LedgerRow>,
    description_idx: usize,
    amount_idx: usize,
    date_idx: Option<usize>,
}

impl Ledger {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn description_index(&self) -> usize {
        self.description_idx
    }

    pub fn amount_index(&self) -> usize {
        self.amount_idx
    }

    /// Position of a column by exact (trimmed) name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn description<'a>(&self, row: &'a LedgerRow) -> &'a str {
        field(row, self.description_idx)
    }

    pub fn amount_text<'a>(&self, row: &'a LedgerRow) -> &'a str {
        field(row, self.amount_idx)
    }

    pub fn date<'a>(&self, row: &'a LedgerRow) -> Option<&'a str> {
        self.date_idx.map(|i| field(row, i))
    }
}

fn field(row: &LedgerRow, i: usize) -> &str {
    row.fields.get(i).map_or("", String::as_str)
}

/// Load a ledger from a CSV file.
pub fn load_ledger(path: impl AsRef<Path>) -> Result<Ledger, IngestError> {
    let path = path.as_ref();
    let rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    parse(rdr, path)
}

/// Load a ledger from any reader (stdin, in-memory fixtures).
pub fn read_ledger<R: Read>(reader: R) -> Result<Ledger, IngestError> {
    let rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    parse(rdr, Path::new("<reader>"))
}

fn parse<R: Read>(mut rdr: csv::Reader<R>, path: &Path) -> Result<Ledger, IngestError> {
    let read_err = |source| IngestError::Read {
        path: PathBuf::from(path),
        source,
    };

    let headers: Vec<String> = rdr
        .headers()
        .map_err(read_err)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let [description_idx, amount_idx] =
        require_columns(&headers, [DESCRIPTION_COLUMN, AMOUNT_COLUMN])?;
    let date_idx = headers.iter().position(|h| h == DATE_COLUMN);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(read_err)?;
        let mut fields: Vec<String> = record.iter().map(str::to_string).collect();
        // short rows are padded so every column lookup succeeds
        fields.resize(headers.len().max(fields.len()), String::new());
        rows.push(LedgerRow { fields });
    }

    Ok(Ledger {
        headers,
        rows,
        description_idx,
        amount_idx,
        date_idx,
    })
}

/// Resolve required columns by name, reporting every missing one at once.
pub(crate) fn require_columns<const N: usize>(
    headers: &[String],
    required: [&'static str; N],
) -> Result<[usize; N], IngestError> {
    let mut found = [0usize; N];
    let mut missing = Vec::new();
    for (slot, name) in found.iter_mut().zip(required) {
        match headers.iter().position(|h| h == name) {
            Some(i) => *slot = i,
            None => missing.push(name),
        }
    }
    if !missing.is_empty() {
        return Err(IngestError::MissingColumns {
            required: required.to_vec(),
            missing,
        });
    }
    Ok(found)
}
