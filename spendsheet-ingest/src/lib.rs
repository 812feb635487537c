//! spendsheet-ingest: CSV ledger loading and required-column validation.

pub mod error;
pub mod ledger;
pub mod training;

pub use error::IngestError;
pub use ledger::{Ledger, LedgerRow, load_ledger, read_ledger};
pub use training::{TrainingExample, load_training_set};
