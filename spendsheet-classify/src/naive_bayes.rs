//! Multinomial naive Bayes over TF-IDF features.

use anyhow::{Result, bail, ensure};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::tfidf::SparseVector;

/// Predicts one label from a feature vector
pub trait TextClassifier {
    fn predict(&self, features: &SparseVector) -> Option<&str>;

    /// Label space the model was trained on
    fn labels(&self) -> &[String];

    fn n_features(&self) -> usize;
}

/// Fitted classifier, serialized as a model artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultinomialNb {
    classes: Vec<String>,
    class_log_prior: Vec<f64>,
    /// `[class][feature]` log probabilities
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Laplace smoothing
    pub const ALPHA: f64 = 1.0;

    /// Fit on feature rows and their labels. Classes are sorted by name.
    pub fn fit(rows: &[SparseVector], labels: &[String], n_features: usize) -> Result<Self> {
        ensure!(
            rows.len() == labels.len(),
            "{} feature rows but {} labels",
            rows.len(),
            labels.len()
        );
        if rows.is_empty() {
            bail!("cannot fit a classifier on zero rows");
        }

        let mut per_class: BTreeMap<&str, (usize, Vec<f64>)> = BTreeMap::new();
        for (row, label) in rows.iter().zip(labels) {
            let (count, feature_count) = per_class
                .entry(label.as_str())
                .or_insert_with(|| (0, vec![0.0; n_features]));
            *count += 1;
            for &(i, w) in &row.entries {
                ensure!(i < n_features, "feature index {i} out of range {n_features}");
                feature_count[i] += w;
            }
        }

        let n = rows.len() as f64;
        let mut classes = Vec::with_capacity(per_class.len());
        let mut class_log_prior = Vec::with_capacity(per_class.len());
        let mut feature_log_prob = Vec::with_capacity(per_class.len());
        for (label, (count, feature_count)) in per_class {
            let smoothed_total: f64 = feature_count.iter().map(|c| c + Self::ALPHA).sum();
            classes.push(label.to_string());
            class_log_prior.push((count as f64 / n).ln());
            feature_log_prob.push(
                feature_count
                    .iter()
                    .map(|c| ((c + Self::ALPHA) / smoothed_total).ln())
                    .collect(),
            );
        }

        Ok(Self {
            classes,
            class_log_prior,
            feature_log_prob,
        })
    }

    /// Check internal consistency of a deserialized artifact.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.classes.is_empty(), "classifier has no classes");
        ensure!(
            self.class_log_prior.len() == self.classes.len()
                && self.feature_log_prob.len() == self.classes.len(),
            "classifier tables disagree on class count"
        );
        let width = self.feature_log_prob[0].len();
        ensure!(
            self.feature_log_prob.iter().all(|row| row.len() == width),
            "ragged feature_log_prob table"
        );
        Ok(())
    }

    /// Joint log likelihood per class
    fn joint_log_likelihood(&self, x: &SparseVector) -> Vec<f64> {
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, flp)| {
                prior
                    + x.entries
                        .iter()
                        .filter_map(|&(i, w)| flp.get(i).map(|lp| w * lp))
                        .sum::<f64>()
            })
            .collect()
    }
}

impl TextClassifier for MultinomialNb {
    fn predict(&self, features: &SparseVector) -> Option<&str> {
        let jll = self.joint_log_likelihood(features);
        let mut best: Option<(usize, f64)> = None;
        for (i, score) in jll.into_iter().enumerate() {
            // strict comparison keeps the first class on ties
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((i, score));
            }
        }
        best.map(|(i, _)| self.classes[i].as_str())
    }

    fn labels(&self) -> &[String] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.feature_log_prob.first().map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(entries: &[(usize, f64)]) -> SparseVector {
        SparseVector {
            entries: entries.to_vec(),
        }
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fit_and_predict_separable() {
        let rows = vec![row(&[(0, 1.0)]), row(&[(0, 0.8)]), row(&[(1, 1.0)])];
        let nb = MultinomialNb::fit(&rows, &labels(&["Food", "Food", "Travel"]), 2).unwrap();

        assert_eq!(nb.labels(), &["Food".to_string(), "Travel".to_string()]);
        assert_eq!(nb.predict(&row(&[(1, 1.0)])), Some("Travel"));
        assert_eq!(nb.predict(&row(&[(0, 1.0)])), Some("Food"));
        assert!(nb.validate().is_ok());
    }

    #[test]
    fn test_empty_features_fall_back_to_prior() {
        let rows = vec![row(&[(0, 1.0)]), row(&[(0, 1.0)]), row(&[(1, 1.0)])];
        let nb = MultinomialNb::fit(&rows, &labels(&["Food", "Food", "Travel"]), 2).unwrap();
        assert_eq!(nb.predict(&SparseVector::default()), Some("Food"));
    }

    #[test]
    fn test_feature_log_prob_rows_are_distributions() {
        let rows = vec![row(&[(0, 0.6), (2, 0.8)]), row(&[(1, 1.0)])];
        let nb = MultinomialNb::fit(&rows, &labels(&["A", "B"]), 3).unwrap();
        for flp in &nb.feature_log_prob {
            let total: f64 = flp.iter().map(|lp| lp.exp()).sum();
            assert!((total - 1.0).abs() < 1e-12);
        }
        assert_eq!(nb.n_features(), 3);
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        assert!(MultinomialNb::fit(&[row(&[])], &labels(&[]), 1).is_err());
        assert!(MultinomialNb::fit(&[row(&[(4, 1.0)])], &labels(&["A"]), 2).is_err());
    }
}
