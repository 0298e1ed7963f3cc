//! Statistical suffix-substitution lemmatization.
//!
//! Instead of a full morphological analyzer, the lemmatizer learns how word
//! endings change between a lemma and its inflected forms and combines that
//! with how common each lemma is.
//!
//! # How it works
//! 1. Check the hand-curated [`ExceptionTable`].
//! 2. Look the word up in the [`DictionaryIndex`], stripping leading
//!    characters until a known ending is found. A single candidate gets the
//!    stripped prefix reattached. Several are scored with the
//!    [`ChannelModel`] (how likely the lemma ending becomes the word ending)
//!    times the [`LanguageModel`] prior of the bare or prefixed candidate,
//!    and the winner also gets the prefix back.
//! 3. Otherwise generate lemmas from every split of the word through the
//!    [`InverseChannelModel`], keep those the language model knows, and take
//!    the best scoring one.
//! 4. Otherwise return the word unchanged.
//!
//! Scoring ties are broken deterministically: the first dictionary candidate
//! wins, and out-of-vocabulary ties go to the lexicographically greatest
//! lemma.
//!
//! # Example
//! ```
//! use lemma_types::TrainingRecord;
//! use suffix_lemmatizer::{ExceptionTable, Lemmatizer, LemmatizerConfig};
//!
//! # fn main() -> Result<(), suffix_lemmatizer::ModelError> {
//! let corpus = vec![
//!     TrainingRecord::new("kass", "kassi", 10),
//!     TrainingRecord::new("kass", "kassid", 4),
//! ];
//! let lemmatizer = Lemmatizer::train_from_corpus(
//!     LemmatizerConfig::default(),
//!     &corpus,
//!     ExceptionTable::estonian(),
//! )?;
//!
//! assert_eq!(lemmatizer.lemmatize("kassid"), "kass");
//! assert_eq!(lemmatizer.lemmatize("on"), "olema");
//! assert_eq!(lemmatizer.lemmatize("tundmatu"), "tundmatu");
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p suffix-lemmatizer --example lookup -- <data-dir> <word>...`.

pub mod channel;
pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod exceptions;
pub mod language;
pub mod snapshot;

pub use channel::{ChannelModel, InverseChannelModel};
pub use config::{LemmatizerConfig, LookupStrategy, Smoothing};
pub use dictionary::{DictionaryIndex, SuffixMatch};
pub use engine::{Analysis, Evaluation, LemmaSource, Lemmatizer, ScoredCandidate};
pub use error::ModelError;
pub use exceptions::ExceptionTable;
pub use language::LanguageModel;
pub use snapshot::ModelSnapshot;

/// Byte offsets of every char boundary in `word`, including `word.len()`.
pub(crate) fn char_boundaries(word: &str) -> Vec<usize> {
    word.char_indices()
        .map(|(at, _)| at)
        .chain(std::iter::once(word.len()))
        .collect()
}
