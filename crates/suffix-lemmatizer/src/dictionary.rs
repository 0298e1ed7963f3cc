use std::collections::HashMap;

use lemma_types::{DictionaryEntry, TrainingRecord};
use serde::{Deserialize, Serialize};

use crate::char_boundaries;
use crate::config::LookupStrategy;

/// Stripped prefixes up to this many characters never need to be words.
const COMPOUND_MAX_FREE_PREFIX: usize = 2;

/// Inflected word to the lemmas observed for it, in insertion order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct DictionaryIndex {
    entries: HashMap<String, Vec<String>>,
}

/// Result of a dictionary lookup: `word == prefix + suffix` and `suffix` is
/// the dictionary key that produced `candidates`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SuffixMatch<'a> {
    pub prefix: &'a str,
    pub suffix: &'a str,
    pub candidates: &'a [String],
}

impl SuffixMatch<'_> {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl DictionaryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `word<TAB>lemma` rows, keeping duplicates as observed.
    pub fn from_entries(entries: impl IntoIterator<Item = DictionaryEntry>) -> Self {
        let mut index = Self::new();
        for entry in entries {
            index.insert(entry.word, entry.lemma);
        }
        index
    }

    /// Build from training pairs when no separate dictionary is available.
    /// Each distinct lemma is listed once per word.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a TrainingRecord>) -> Self {
        let mut index = Self::new();
        for record in records {
            let lemmas = index.entries.entry(record.word.clone()).or_default();
            if !lemmas.contains(&record.lemma) {
                lemmas.push(record.lemma.clone());
            }
        }
        index
    }

    /// Append `lemma` to the candidates of `word`.
    pub fn insert(&mut self, word: impl Into<String>, lemma: impl Into<String>) {
        self.entries
            .entry(word.into())
            .or_default()
            .push(lemma.into());
    }

    pub fn candidates(&self, word: &str) -> Option<&[String]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the most specific dictionary ending of `word`.
    ///
    /// Leading characters are stripped one at a time, starting with none, and
    /// the first remaining suffix present in the dictionary wins. Fewer than
    /// `len(word) - min_suf_len` characters are stripped, but the untrimmed
    /// word is always tried. A miss yields an empty prefix, the whole word
    /// as suffix and no candidates.
    pub fn lookup<'a>(
        &'a self,
        word: &'a str,
        strategy: LookupStrategy,
        min_suf_len: usize,
    ) -> SuffixMatch<'a> {
        let bounds = char_boundaries(word);
        let len = bounds.len() - 1;
        let limit = match strategy {
            LookupStrategy::Exact => 1,
            LookupStrategy::LongestSuffix | LookupStrategy::Compound => {
                len.saturating_sub(min_suf_len).max(1)
            }
        };

        for (stripped, &at) in bounds.iter().enumerate().take(limit) {
            let (prefix, suffix) = word.split_at(at);
            let Some(candidates) = self.entries.get(suffix) else {
                continue;
            };
            if strategy == LookupStrategy::Compound
                && stripped > COMPOUND_MAX_FREE_PREFIX
                && !self.entries.contains_key(prefix)
            {
                continue;
            }
            return SuffixMatch {
                prefix,
                suffix,
                candidates,
            };
        }

        SuffixMatch {
            prefix: "",
            suffix: word,
            candidates: &[],
        }
    }
}
