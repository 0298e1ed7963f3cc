use std::collections::HashMap;

use lemma_types::TrainingRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Smoothing;
use crate::error::ModelError;

/// Unigram prior `P(lemma)` over corpus lemma counts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LanguageModel {
    smoothing: Smoothing,
    probabilities: HashMap<String, f64>,
    unseen: Option<f64>,
    total_count: u64,
}

impl LanguageModel {
    /// Count every record's lemma (the inflected word is ignored) and turn the
    /// counts into probabilities.
    ///
    /// Fails with [`ModelError::EmptyCorpus`] when no lemma was seen, or when
    /// all counts are zero and no smoothing is applied, and with
    /// [`ModelError::CountOverflow`] when the token total does not fit in a
    /// `u64`.
    pub fn train<'a>(
        records: impl IntoIterator<Item = &'a TrainingRecord>,
        smoothing: Smoothing,
    ) -> Result<Self, ModelError> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        let mut total_count = 0u64;
        for record in records {
            let overflow = || ModelError::CountOverflow(record.lemma.clone());
            total_count = total_count.checked_add(record.count).ok_or_else(overflow)?;
            *counts.entry(record.lemma.clone()).or_default() += record.count;
        }
        if counts.is_empty() {
            return Err(ModelError::EmptyCorpus);
        }

        let vocabulary = counts.len() as u64;
        let (probabilities, unseen) = match smoothing {
            Smoothing::None => {
                if total_count == 0 {
                    return Err(ModelError::EmptyCorpus);
                }
                let total = total_count as f64;
                let probs = counts
                    .into_iter()
                    .map(|(lemma, count)| (lemma, count as f64 / total))
                    .collect();
                (probs, None)
            }
            Smoothing::AddOne => {
                let denominator = total_count as f64 + vocabulary as f64;
                let probs = counts
                    .into_iter()
                    .map(|(lemma, count)| (lemma, (count as f64 + 1.0) / denominator))
                    .collect();
                (probs, Some(1.0 / denominator))
            }
        };

        debug!(
            "language model trained: {vocabulary} lemmas, {total_count} tokens, smoothing {smoothing}"
        );
        Ok(Self {
            smoothing,
            probabilities,
            unseen,
            total_count,
        })
    }

    /// Prior of `lemma`; unseen lemmas get the smoothing fallback, or `None`
    /// when the model is unsmoothed.
    pub fn probability(&self, lemma: &str) -> Option<f64> {
        self.probabilities.get(lemma).copied().or(self.unseen)
    }

    /// Whether `lemma` occurred in the training corpus.
    pub fn contains(&self, lemma: &str) -> bool {
        self.probabilities.contains_key(lemma)
    }

    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    pub fn unseen_probability(&self) -> Option<f64> {
        self.unseen
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn vocabulary_size(&self) -> usize {
        self.probabilities.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.probabilities
            .iter()
            .map(|(lemma, prob)| (lemma.as_str(), *prob))
    }
}
