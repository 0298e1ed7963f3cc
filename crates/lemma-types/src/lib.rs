//! Shared types for suffix-substitution lemmatization.
//!
//! A lemmatizer trained on `(lemma, word, count)` triples never looks at
//! whole words when estimating how inflection works: it looks at the pair of
//! endings where the lemma and the inflected word diverge. This crate holds
//! those plain data types ([`TrainingRecord`], [`DictionaryEntry`],
//! [`SuffixPair`]) and the extraction rule ([`suffix_pair`]) so that loaders,
//! trainers and servers agree on them without depending on each other.
//!
//! All positions are counted in `char`s, never bytes.
//!
//! ```rust
//! use lemma_types::{SuffixPair, suffix_pair};
//!
//! let pair = suffix_pair("kass", "kassi", 1);
//! assert_eq!(pair, SuffixPair::new("s", "si"));
//! ```

use std::fmt;

/// Context marker used when the suffix window reaches past the start of a word.
pub const BOUNDARY: char = '$';

/// Default number of context characters kept in front of a suffix pair.
pub const DEFAULT_PREFIX_WINDOW: usize = 1;

/// One `lemma<TAB>word<TAB>count` row of a training corpus.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TrainingRecord {
    pub lemma: String,
    pub word: String,
    pub count: u64,
}

impl TrainingRecord {
    pub fn new(lemma: impl Into<String>, word: impl Into<String>, count: u64) -> Self {
        Self {
            lemma: lemma.into(),
            word: word.into(),
            count,
        }
    }
}

/// One `word<TAB>lemma` row of a dictionary or exception list.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DictionaryEntry {
    pub word: String,
    pub lemma: String,
}

impl DictionaryEntry {
    pub fn new(word: impl Into<String>, lemma: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            lemma: lemma.into(),
        }
    }
}

/// The diverging endings of a lemma and one of its inflected forms.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct SuffixPair {
    pub lemma_suffix: String,
    pub word_suffix: String,
}

impl SuffixPair {
    pub fn new(lemma_suffix: impl Into<String>, word_suffix: impl Into<String>) -> Self {
        Self {
            lemma_suffix: lemma_suffix.into(),
            word_suffix: word_suffix.into(),
        }
    }
}

impl fmt::Display for SuffixPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-{} -> -{}", self.lemma_suffix, self.word_suffix)
    }
}

/// Length in chars of the longest common prefix of `a` and `b`.
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

/// Extract the suffix substitution turning `lemma` into `word`.
///
/// Both endings start where the two strings diverge and are then extended
/// backward by `window` characters of shared context. Context positions in
/// front of the word start are filled with [`BOUNDARY`].
pub fn suffix_pair(lemma: &str, word: &str, window: usize) -> SuffixPair {
    let shared = common_prefix_len(lemma, word);
    let lemma_chars: Vec<char> = lemma.chars().collect();

    let mut context = String::with_capacity(window);
    for j in shared as isize - window as isize..shared as isize {
        if j < 0 {
            context.push(BOUNDARY);
        } else {
            context.push(lemma_chars[j as usize]);
        }
    }

    let mut lemma_suffix = context.clone();
    lemma_suffix.extend(&lemma_chars[shared..]);
    let mut word_suffix = context;
    word_suffix.extend(word.chars().skip(shared));

    SuffixPair {
        lemma_suffix,
        word_suffix,
    }
}

/// Fold a raw token into the lowercase query convention.
pub fn normalize_word(raw: &str) -> String {
    raw.trim().to_lowercase()
}
