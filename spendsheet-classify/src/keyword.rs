//! Deterministic keyword rules mapping descriptions to built-in categories.
//!
//! Rules are evaluated in declaration order and the first keyword found as a
//! substring of the cleaned description wins.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use spendsheet_core::Category;

use crate::categorizer::{Categorizer, CategorizerMode};
use crate::text::clean_text;

/// Descriptions containing any of these are income regardless of the rules.
const INCOME_MARKERS: [&str; 2] = ["salary", "dividend"];

/// One category and its ordered keyword list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub category: String,
    pub keywords: Vec<String>,
}

impl KeywordRule {
    pub fn new(category: &str, keywords: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// The built-in rule table
pub fn default_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new(
            Category::FOOD,
            &["swiggy", "zomato", "mcdonald", "kfc", "restaurant", "food", "cafe"],
        ),
        KeywordRule::new(
            Category::TRAVEL,
            &["uber", "ola", "train", "flight", "bus", "petrol", "auto"],
        ),
        KeywordRule::new(Category::SHOPPING, &["amazon", "flipkart", "myntra", "ajio"]),
        KeywordRule::new(
            Category::BILLS,
            &["electricity", "internet", "wifi", "broadband", "bill"],
        ),
        KeywordRule::new(
            Category::SUBSCRIPTIONS,
            &["netflix", "spotify", "hotstar", "prime"],
        ),
        KeywordRule::new(
            Category::GROCERIES,
            &["grocery", "dmart", "big bazaar", "supermarket"],
        ),
    ]
}

/// Categorizer backed by an explicit ordered rule list
#[derive(Debug, Clone)]
pub struct KeywordCategorizer {
    rules: Vec<(Category, Vec<String>)>,
}

impl KeywordCategorizer {
    /// Build from custom rules.
    ///
    /// Keywords go through the same cleanup as descriptions, so `big-bazaar`
    /// matches "Big Bazaar". The fallback category (any case) may appear only
    /// with an empty keyword list. Keywords that clean to nothing are rejected
    /// since they would match every description.
    pub fn new(rules: Vec<KeywordRule>) -> Result<Self> {
        let mut compiled = Vec::with_capacity(rules.len());
        for rule in rules {
            let name = rule.category.trim();
            if name.is_empty() {
                bail!("keyword rule with empty category name");
            }
            let keywords: Vec<String> = rule
                .keywords
                .iter()
                .map(|k| clean_text(k).trim().to_string())
                .collect();
            if name.eq_ignore_ascii_case(Category::OTHERS) {
                if !keywords.is_empty() {
                    bail!(
                        "'{}' is the fallback category and cannot carry keywords",
                        Category::OTHERS
                    );
                }
                continue;
            }
            if keywords.iter().any(String::is_empty) {
                bail!("category '{name}' has an empty keyword");
            }
            compiled.push((Category::new(name), keywords));
        }
        Ok(Self { rules: compiled })
    }

    /// Categories in evaluation order (fallback excluded)
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.rules.iter().map(|(c, _)| c)
    }
}

impl Default for KeywordCategorizer {
    fn default() -> Self {
        Self {
            rules: default_rules()
                .into_iter()
                .map(|r| (Category::new(r.category), r.keywords))
                .collect(),
        }
    }
}

impl Categorizer for KeywordCategorizer {
    fn classify(&self, text: &str) -> Category {
        let cleaned = clean_text(text);

        // NOTE: "credit" and "refund" are left to the rules below; only these
        // markers force the income label.
        if INCOME_MARKERS.iter().any(|m| cleaned.contains(m)) {
            return Category::income();
        }

        for (category, keywords) in &self.rules {
            if keywords.iter().any(|kw| cleaned.contains(kw.as_str())) {
                return category.clone();
            }
        }

        Category::others()
    }

    fn mode(&self) -> CategorizerMode {
        CategorizerMode::Keyword
    }
}
