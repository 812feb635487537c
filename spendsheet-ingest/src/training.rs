//! Labelled training rows for the learned categorizer.
//!
//! Header: Description,Category

use crate::error::IngestError;
use crate::ledger::require_columns;
use std::path::Path;

/// A description with its expected label
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingExample {
    pub description: String,
    pub category: String,
}

/// Load labelled examples. Rows with an empty label are skipped.
pub fn load_training_set(path: impl AsRef<Path>) -> Result<Vec<TrainingExample>, IngestError> {
    let path = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let read_err = |source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    };

    let headers: Vec<String> = rdr
        .headers()
        .map_err(read_err)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let [desc_idx, cat_idx] = require_columns(&headers, ["Description", "Category"])?;

    let mut out = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(read_err)?;
        let category = record.get(cat_idx).unwrap_or("").trim();
        if category.is_empty() {
            continue;
        }
        out.push(TrainingExample {
            description: record.get(desc_idx).unwrap_or("").to_string(),
            category: category.to_string(),
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_loads_labelled_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Description,Category").unwrap();
        writeln!(file, "Swiggy Delivery,Food").unwrap();
        writeln!(file, "Uber Ride, Travel ").unwrap();
        writeln!(file, "Unlabelled,").unwrap();

        let rows = load_training_set(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].category, "Travel");
        assert_eq!(rows[0].description, "Swiggy Delivery");
    }

    #[test]
    fn test_requires_category_column() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Description,Amount").unwrap();
        let err = load_training_set(file.path()).unwrap_err();
        assert!(err.to_string().contains("Category"));
    }
}
