//! spendsheet-core: transaction types, amount normalization and aggregation

pub mod amount;
pub mod summary;
pub mod transaction;

pub use amount::normalize_amount;
pub use summary::{CategoryTotal, Summary, aggregate};
pub use transaction::{Category, Transaction};
