//! TF-IDF text vectorizer.
//!
//! Vocabulary is sorted alphabetically, idf is smoothed
//! (`ln((1 + n) / (1 + df)) + 1`) and every row is l2-normalised.

use anyhow::{Result, bail, ensure};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::text::tokenize;

/// Turns text into a feature vector
pub trait TextVectorizer {
    fn transform(&self, text: &str) -> SparseVector;

    /// Width of the feature space
    fn n_features(&self) -> usize;
}

/// Sparse feature row: `(feature index, weight)` pairs sorted by index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    pub entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "an",
    "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "been",
    "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "both", "but", "by", "can", "cannot", "could", "did", "do", "does", "done",
    "down", "due", "during", "each", "eg", "either", "else", "elsewhere", "enough", "etc",
    "even", "ever", "every", "everyone", "everything", "everywhere", "except", "few", "for",
    "former", "formerly", "from", "further", "had", "has", "have", "he", "hence", "her",
    "here", "hereafter", "hereby", "herein", "hers", "herself", "him", "himself", "his", "how",
    "however", "i", "ie", "if", "in", "indeed", "into", "is", "it", "its", "itself", "just",
    "last", "latter", "least", "less", "ltd", "many", "may", "me", "meanwhile", "might",
    "more", "moreover", "most", "mostly", "much", "must", "my", "myself", "namely", "neither",
    "never", "nevertheless", "next", "no", "nobody", "none", "noone", "nor", "not", "nothing",
    "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or", "other",
    "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "per", "perhaps",
    "please", "rather", "re", "same", "seem", "seemed", "seeming", "seems", "several", "she",
    "should", "since", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "than", "that", "the", "their", "them",
    "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore", "therein",
    "these", "they", "this", "those", "though", "through", "throughout", "thru", "thus", "to",
    "together", "too", "toward", "towards", "under", "until", "up", "upon", "us", "very", "via",
    "was", "we", "well", "were", "what", "whatever", "when", "whence", "whenever", "where",
    "whereas", "whereby", "wherein", "whether", "which", "while", "who", "whoever", "whole",
    "whom", "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your",
    "yours", "yourself", "yourselves",
];

/// Fitted TF-IDF vectorizer, serialized as a model artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn vocabulary and idf weights from lowercase documents.
    pub fn fit<S: AsRef<str>>(docs: &[S]) -> Result<Self> {
        if docs.is_empty() {
            bail!("cannot fit a vectorizer on zero documents");
        }
        let stop: HashSet<&str> = ENGLISH_STOP_WORDS.iter().copied().collect();

        let mut df: BTreeMap<String, usize> = BTreeMap::new();
        for doc in docs {
            let terms: BTreeSet<&str> = tokenize(doc.as_ref())
                .filter(|t| !stop.contains(t))
                .collect();
            for term in terms {
                *df.entry(term.to_string()).or_insert(0) += 1;
            }
        }
        if df.is_empty() {
            bail!("training documents produced an empty vocabulary");
        }

        let n = docs.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(df.len());
        for (i, (term, count)) in df.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + count as f64)).ln() + 1.0);
            vocabulary.insert(term, i);
        }

        Ok(Self { vocabulary, idf })
    }

    /// Check internal consistency of a deserialized artifact.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.vocabulary.len() == self.idf.len(),
            "vocabulary has {} terms but idf has {} weights",
            self.vocabulary.len(),
            self.idf.len()
        );
        let indices: BTreeSet<usize> = self.vocabulary.values().copied().collect();
        ensure!(
            indices.len() == self.idf.len() && indices.iter().all(|&i| i < self.idf.len()),
            "vocabulary indices are not a permutation of 0..{}",
            self.idf.len()
        );
        ensure!(
            self.idf.iter().all(|w| w.is_finite()),
            "idf contains non-finite weights"
        );
        Ok(())
    }

    #[cfg(test)]
    fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }
}

impl TextVectorizer for TfidfVectorizer {
    fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokenize(&text.to_lowercase()) {
            if let Some(&i) = self.vocabulary.get(token) {
                *counts.entry(i).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(i, tf)| (i, tf * self.idf[i]))
            .collect();

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut entries {
                *w /= norm;
            }
        }

        SparseVector { entries }
    }

    fn n_features(&self) -> usize {
        self.idf.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_builds_sorted_vocabulary_without_stop_words() {
        let v = TfidfVectorizer::fit(&["uber ride to the airport", "the zomato order"]).unwrap();
        assert_eq!(v.n_features(), 5);
        assert_eq!(v.term_index("airport"), Some(0));
        assert_eq!(v.term_index("zomato"), Some(4));
        assert_eq!(v.term_index("the"), None);
        assert!(v.validate().is_ok());
    }

    #[test]
    fn test_idf_weights_rare_terms_higher() {
        let v = TfidfVectorizer::fit(&["uber ride", "ola ride", "train ride"]).unwrap();
        let ride = v.idf[v.term_index("ride").unwrap()];
        let uber = v.idf[v.term_index("uber").unwrap()];
        assert!((ride - 1.0).abs() < 1e-12);
        assert!((uber - (2.0f64.ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_transform_is_unit_length() {
        let v = TfidfVectorizer::fit(&["uber ride", "ola ride"]).unwrap();
        let x = v.transform("Uber ride uber");
        let norm: f64 = x.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
        assert_eq!(x.entries.len(), 2);
    }

    #[test]
    fn test_unknown_terms_give_empty_vector() {
        let v = TfidfVectorizer::fit(&["uber ride"]).unwrap();
        assert!(v.transform("netflix").is_empty());
    }

    #[test]
    fn test_empty_vocabulary_is_error() {
        assert!(TfidfVectorizer::fit(&["the a an"]).is_err());
        assert!(TfidfVectorizer::fit::<&str>(&[]).is_err());
    }

    #[test]
    fn test_validate_catches_mismatched_artifact() {
        let json = r#"{"vocabulary":{"uber":0,"ola":3},"idf":[1.0,1.0]}"#;
        let v: TfidfVectorizer = serde_json::from_str(json).unwrap();
        assert!(v.validate().is_err());
    }
}
