use std::collections::{BTreeSet, HashMap};

use lemma_types::{SuffixPair, TrainingRecord, suffix_pair};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ModelError;

/// `P(word_suffix | lemma_suffix)` estimated from corpus suffix substitutions.
///
/// Each lemma-suffix group is normalised once at training time and sums to
/// one over its word suffixes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelModel {
    groups: HashMap<String, HashMap<String, f64>>,
}

impl ChannelModel {
    /// Train with the standard suffix-pair extraction and `prefix_window`
    /// characters of context.
    pub fn train<'a>(
        records: impl IntoIterator<Item = &'a TrainingRecord>,
        prefix_window: usize,
        min_count: u64,
    ) -> Result<Self, ModelError> {
        Self::train_with(records, min_count, |lemma, word| {
            suffix_pair(lemma, word, prefix_window)
        })
    }

    /// Train with a caller-provided suffix extraction.
    ///
    /// Records whose count is below `min_count` are ignored. Groups whose
    /// counts sum to zero carry no distribution and are dropped. A group
    /// whose counts do not fit in a `u64` fails with
    /// [`ModelError::CountOverflow`].
    pub fn train_with<'a, F>(
        records: impl IntoIterator<Item = &'a TrainingRecord>,
        min_count: u64,
        extract: F,
    ) -> Result<Self, ModelError>
    where
        F: Fn(&str, &str) -> SuffixPair,
    {
        // Lemma suffix to (group total, word-suffix counts).
        let mut counts: HashMap<String, (u64, HashMap<String, u64>)> = HashMap::new();
        let mut used = 0usize;
        for record in records {
            if record.count < min_count {
                continue;
            }
            let pair = extract(&record.lemma, &record.word);
            let (total, word_counts) = counts.entry(pair.lemma_suffix).or_default();
            *total = total
                .checked_add(record.count)
                .ok_or_else(|| ModelError::CountOverflow(record.lemma.clone()))?;
            *word_counts.entry(pair.word_suffix).or_default() += record.count;
            used += 1;
        }

        let mut groups = HashMap::with_capacity(counts.len());
        for (lemma_suffix, (total, word_counts)) in counts {
            if total == 0 {
                debug!("dropping zero-count channel group {lemma_suffix:?}");
                continue;
            }
            let dist = word_counts
                .into_iter()
                .map(|(word_suffix, count)| (word_suffix, count as f64 / total as f64))
                .collect();
            groups.insert(lemma_suffix, dist);
        }

        debug!(
            "channel model trained on {used} records into {} lemma-suffix groups",
            groups.len()
        );
        Ok(Self { groups })
    }

    pub fn probability(&self, lemma_suffix: &str, word_suffix: &str) -> Option<f64> {
        self.groups.get(lemma_suffix)?.get(word_suffix).copied()
    }

    /// Word-suffix distribution of one lemma-suffix group.
    pub fn distribution(&self, lemma_suffix: &str) -> Option<&HashMap<String, f64>> {
        self.groups.get(lemma_suffix)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HashMap<String, f64>)> + '_ {
        self.groups
            .iter()
            .map(|(lemma_suffix, dist)| (lemma_suffix.as_str(), dist))
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn invert(&self) -> InverseChannelModel {
        InverseChannelModel::from_channel(self)
    }
}

/// Word suffix to every lemma suffix that can produce it.
///
/// Always derived from a [`ChannelModel`]; sets iterate in lexicographic
/// order so candidate generation is reproducible.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct InverseChannelModel {
    sources: HashMap<String, BTreeSet<String>>,
}

impl InverseChannelModel {
    pub fn from_channel(channel: &ChannelModel) -> Self {
        let mut sources: HashMap<String, BTreeSet<String>> = HashMap::new();
        for (lemma_suffix, dist) in channel.iter() {
            for word_suffix in dist.keys() {
                sources
                    .entry(word_suffix.clone())
                    .or_default()
                    .insert(lemma_suffix.to_string());
            }
        }
        Self { sources }
    }

    pub fn lemma_suffixes<'a>(&'a self, word_suffix: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.sources
            .get(word_suffix)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    pub fn contains(&self, word_suffix: &str, lemma_suffix: &str) -> bool {
        self.sources
            .get(word_suffix)
            .is_some_and(|set| set.contains(lemma_suffix))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> + '_ {
        self.sources
            .iter()
            .map(|(word_suffix, set)| (word_suffix.as_str(), set))
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
