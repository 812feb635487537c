//! spendsheet-classify: description categorizers.
//!
//! Two interchangeable engines sit behind [`Categorizer`]: ordered keyword
//! rules, and a learned TF-IDF + naive Bayes model loaded from JSON artifacts.

pub mod categorizer;
pub mod keyword;
pub mod learned;
pub mod naive_bayes;
pub mod text;
pub mod tfidf;

pub use categorizer::{Categorizer, CategorizerMode};
pub use keyword::{KeywordCategorizer, KeywordRule, default_rules};
pub use learned::{LearnedCategorizer, ModelPaths, TrainedModel};
pub use naive_bayes::{MultinomialNb, TextClassifier};
pub use text::clean_text;
pub use tfidf::{SparseVector, TextVectorizer, TfidfVectorizer};
