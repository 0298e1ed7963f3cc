use std::fmt;
use std::str::FromStr;

use lemma_types::DEFAULT_PREFIX_WINDOW;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

pub const DEFAULT_MIN_SUF_LEN: usize = 5;
pub const DEFAULT_MIN_COUNT: u64 = 1;

/// Smoothing applied to the unigram language model.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Smoothing {
    /// Raw relative frequency; unseen lemmas have no probability.
    #[default]
    None,
    /// Laplace smoothing; unseen lemmas get `1 / (total + vocabulary)`.
    AddOne,
}

impl FromStr for Smoothing {
    type Err = ModelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Smoothing::None),
            "add-one" => Ok(Smoothing::AddOne),
            _ => Err(ModelError::UnknownSmoothing(raw.to_string())),
        }
    }
}

impl fmt::Display for Smoothing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Smoothing::None => "none",
            Smoothing::AddOne => "add-one",
        })
    }
}

/// How the dictionary is searched for a query word.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LookupStrategy {
    /// Whole-word match only.
    Exact,
    /// First (longest) dictionary suffix, stripping fewer than
    /// `len - min_suf_len` leading characters.
    #[default]
    LongestSuffix,
    /// Like `LongestSuffix`, but a stripped prefix longer than two characters
    /// must itself be a dictionary word.
    Compound,
}

impl FromStr for LookupStrategy {
    type Err = ModelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(LookupStrategy::Exact),
            "longest-suffix" | "suffix" => Ok(LookupStrategy::LongestSuffix),
            "compound" => Ok(LookupStrategy::Compound),
            _ => Err(ModelError::UnknownStrategy(raw.to_string())),
        }
    }
}

impl fmt::Display for LookupStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LookupStrategy::Exact => "exact",
            LookupStrategy::LongestSuffix => "longest-suffix",
            LookupStrategy::Compound => "compound",
        })
    }
}

/// Training and lookup knobs, tuned per language.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LemmatizerConfig {
    /// Shortest dictionary suffix tried before giving up on prefix trims.
    pub min_suf_len: usize,
    /// Context characters kept in front of each suffix pair.
    pub prefix_window: usize,
    pub smoothing: Smoothing,
    /// Corpus records below this count are left out of the channel model.
    pub min_count: u64,
    pub strategy: LookupStrategy,
}

impl Default for LemmatizerConfig {
    fn default() -> Self {
        Self {
            min_suf_len: DEFAULT_MIN_SUF_LEN,
            prefix_window: DEFAULT_PREFIX_WINDOW,
            smoothing: Smoothing::default(),
            min_count: DEFAULT_MIN_COUNT,
            strategy: LookupStrategy::default(),
        }
    }
}
