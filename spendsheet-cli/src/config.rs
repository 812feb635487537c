use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use spendsheet_classify::learned::{DEFAULT_MODEL_PATH, DEFAULT_VECTORIZER_PATH};
use spendsheet_classify::{KeywordCategorizer, KeywordRule, ModelPaths};
use spendsheet_report::pipeline::DEFAULT_OUTPUT_PREFIX;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "spendsheet.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub output: OutputSection,
    pub classifier: ClassifierSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Output file name without extension; `_N` is appended on collision
    pub prefix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSection {
    pub keyword_only: bool,
    pub model_path: PathBuf,
    pub vectorizer_path: PathBuf,
    /// Replaces the built-in keyword table when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<KeywordRule>>,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }
}

impl Default for ClassifierSection {
    fn default() -> Self {
        Self {
            keyword_only: false,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            vectorizer_path: PathBuf::from(DEFAULT_VECTORIZER_PATH),
            rules: None,
        }
    }
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output_prefix: Option<String>,
    pub keyword_only: bool,
    pub model: Option<PathBuf>,
    pub vectorizer: Option<PathBuf>,
}

impl Config {
    pub fn apply(mut self, o: Overrides) -> Self {
        if let Some(prefix) = o.output_prefix {
            self.output.prefix = prefix;
        }
        // the flag can only force keyword mode on, never off
        self.classifier.keyword_only |= o.keyword_only;
        if let Some(p) = o.model {
            self.classifier.model_path = p;
        }
        if let Some(p) = o.vectorizer {
            self.classifier.vectorizer_path = p;
        }
        self
    }

    pub fn model_paths(&self) -> ModelPaths {
        ModelPaths {
            classifier: self.classifier.model_path.clone(),
            vectorizer: self.classifier.vectorizer_path.clone(),
        }
    }

    pub fn keyword_categorizer(&self) -> Result<KeywordCategorizer> {
        match &self.classifier.rules {
            Some(rules) => {
                KeywordCategorizer::new(rules.clone()).context("invalid [[classifier.rules]]")
            }
            None => Ok(KeywordCategorizer::default()),
        }
    }
}

/// Load the config file.
///
/// An explicit path must exist; the default path falls back to defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let p = explicit.unwrap_or(Path::new(DEFAULT_CONFIG_PATH));
    if !p.exists() {
        if explicit.is_some() {
            bail!("config file not found: {}", p.display());
        }
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    let mut cfg = Config::default();
    cfg.classifier.rules = Some(spendsheet_classify::default_rules());
    let s = toml::to_string_pretty(&cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}
