//! Learned categorizer: a fitted vectorizer + classifier pair loaded from
//! JSON artifacts produced by [`TrainedModel::fit`].

use anyhow::{Context, Result, ensure};
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use spendsheet_core::Category;
use std::fs;
use std::path::{Path, PathBuf};

use crate::categorizer::{Categorizer, CategorizerMode};
use crate::naive_bayes::{MultinomialNb, TextClassifier};
use crate::text::clean_text;
use crate::tfidf::{TextVectorizer, TfidfVectorizer};

pub const DEFAULT_MODEL_PATH: &str = "expense_model.json";
pub const DEFAULT_VECTORIZER_PATH: &str = "expense_vectorizer.json";

/// Locations of the two model artifacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPaths {
    pub classifier: PathBuf,
    pub vectorizer: PathBuf,
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self {
            classifier: PathBuf::from(DEFAULT_MODEL_PATH),
            vectorizer: PathBuf::from(DEFAULT_VECTORIZER_PATH),
        }
    }
}

/// Categorizer delegating to an externally trained model.
///
/// The model owns the label space: no keyword heuristics apply here.
pub struct LearnedCategorizer {
    vectorizer: Box<dyn TextVectorizer>,
    classifier: Box<dyn TextClassifier>,
}

impl LearnedCategorizer {
    pub fn new(
        vectorizer: impl TextVectorizer + 'static,
        classifier: impl TextClassifier + 'static,
    ) -> Result<Self> {
        ensure!(
            vectorizer.n_features() == classifier.n_features(),
            "vectorizer produces {} features but classifier expects {}",
            vectorizer.n_features(),
            classifier.n_features()
        );
        Ok(Self {
            vectorizer: Box::new(vectorizer),
            classifier: Box::new(classifier),
        })
    }

    /// Load both artifacts. Any missing, unreadable or inconsistent file is
    /// an error; choosing a fallback is up to the caller.
    pub fn load(paths: &ModelPaths) -> Result<Self> {
        let classifier: MultinomialNb = read_artifact(&paths.classifier)?;
        classifier
            .validate()
            .with_context(|| format!("invalid classifier {}", paths.classifier.display()))?;

        let vectorizer: TfidfVectorizer = read_artifact(&paths.vectorizer)?;
        vectorizer
            .validate()
            .with_context(|| format!("invalid vectorizer {}", paths.vectorizer.display()))?;

        debug!(
            "Read classifier {} ({} labels) and vectorizer {} ({} terms)",
            paths.classifier.display(),
            classifier.labels().len(),
            paths.vectorizer.display(),
            vectorizer.n_features()
        );
        Self::new(vectorizer, classifier)
    }

    pub fn labels(&self) -> &[String] {
        self.classifier.labels()
    }
}

impl Categorizer for LearnedCategorizer {
    fn classify(&self, text: &str) -> Category {
        let cleaned = clean_text(text);
        if cleaned.trim().is_empty() {
            return Category::others();
        }
        let features = self.vectorizer.transform(&cleaned);
        self.classifier
            .predict(&features)
            .map(Category::new)
            .unwrap_or_else(Category::others)
    }

    fn mode(&self) -> CategorizerMode {
        CategorizerMode::Learned
    }
}

/// Freshly fitted artifacts, ready to save or use directly
#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub vectorizer: TfidfVectorizer,
    pub classifier: MultinomialNb,
}

impl TrainedModel {
    /// Fit on `(description, label)` pairs.
    pub fn fit<D: AsRef<str>, L: AsRef<str>>(examples: &[(D, L)]) -> Result<Self> {
        let docs: Vec<String> = examples.iter().map(|(d, _)| clean_text(d.as_ref())).collect();
        let labels: Vec<String> = examples
            .iter()
            .map(|(_, l)| l.as_ref().trim().to_string())
            .collect();

        let vectorizer = TfidfVectorizer::fit(&docs).context("fitting vectorizer")?;
        let rows: Vec<_> = docs.iter().map(|d| vectorizer.transform(d)).collect();
        let classifier = MultinomialNb::fit(&rows, &labels, vectorizer.n_features())
            .context("fitting classifier")?;

        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    pub fn save(&self, paths: &ModelPaths) -> Result<()> {
        write_artifact(&paths.classifier, &self.classifier)?;
        write_artifact(&paths.vectorizer, &self.vectorizer)?;
        Ok(())
    }

    pub fn into_categorizer(self) -> Result<LearnedCategorizer> {
        LearnedCategorizer::new(self.vectorizer, self.classifier)
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

fn write_artifact<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string(value).context("serialize model artifact")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
