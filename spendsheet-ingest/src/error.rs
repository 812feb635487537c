use std::path::PathBuf;
use thiserror::Error;

/// Fatal input errors. Any of these aborts a run before output is written.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("CSV must include {} column(s); missing: {}", .required.join(", "), .missing.join(", "))]
    MissingColumns {
        required: Vec<&'static str>,
        missing: Vec<&'static str>,
    },
}
