use spendsheet_core::Category;
use std::fmt;

/// Which engine produced the labels for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorizerMode {
    Keyword,
    Learned,
}

impl fmt::Display for CategorizerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategorizerMode::Keyword => f.write_str("keyword rules"),
            CategorizerMode::Learned => f.write_str("learned model"),
        }
    }
}

/// Assigns exactly one label to a transaction description.
///
/// Implementations are immutable once built; the same text always yields
/// the same label.
pub trait Categorizer {
    fn classify(&self, text: &str) -> Category;

    fn mode(&self) -> CategorizerMode;
}

impl<C: Categorizer + ?Sized> Categorizer for Box<C> {
    fn classify(&self, text: &str) -> Category {
        (**self).classify(text)
    }

    fn mode(&self) -> CategorizerMode {
        (**self).mode()
    }
}
