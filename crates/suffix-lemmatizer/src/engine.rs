use lemma_types::{TrainingRecord, suffix_pair};
use serde::Serialize;
use tracing::info;

use crate::channel::{ChannelModel, InverseChannelModel};
use crate::char_boundaries;
use crate::config::LemmatizerConfig;
use crate::dictionary::DictionaryIndex;
use crate::error::ModelError;
use crate::exceptions::ExceptionTable;
use crate::language::LanguageModel;

/// Dictionary candidates scoring within this distance of the best are tied.
pub const TIE_EPSILON: f64 = 1e-6;

/// Exponent damping the language-model prior on out-of-vocabulary guesses.
pub const OOV_PRIOR_EXPONENT: f64 = 0.8;

/// Which stage of the lemmatizer produced the answer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LemmaSource {
    Exception,
    Dictionary { prefix: String, suffix: String },
    OutOfVocabulary { score: f64 },
    Identity,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub lemma: String,
    pub score: f64,
}

/// A lemma together with how it was found.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Analysis {
    pub word: String,
    pub lemma: String,
    pub source: LemmaSource,
    /// Scored alternatives, best first for out-of-vocabulary guesses and in
    /// dictionary order otherwise. Empty when no scoring was needed.
    pub candidates: Vec<ScoredCandidate>,
}

/// Accuracy of a lemmatizer over labelled pairs.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Evaluation {
    pub total: usize,
    pub correct: usize,
    pub accuracy: f64,
}

/// Trained lemmatizer: exception table, suffix dictionary, channel model and
/// language model, all read-only after construction.
///
/// Lookups never mutate state, so one instance can be shared across threads
/// (e.g. behind an `Arc`).
#[derive(Clone, Debug)]
pub struct Lemmatizer {
    config: LemmatizerConfig,
    exceptions: ExceptionTable,
    dictionary: DictionaryIndex,
    channel: ChannelModel,
    inverse: InverseChannelModel,
    language: LanguageModel,
}

impl Lemmatizer {
    /// Train the channel and language models from `corpus` and combine them
    /// with an existing dictionary and exception table.
    pub fn train(
        config: LemmatizerConfig,
        corpus: &[TrainingRecord],
        dictionary: DictionaryIndex,
        exceptions: ExceptionTable,
    ) -> Result<Self, ModelError> {
        let channel = ChannelModel::train(corpus, config.prefix_window, config.min_count)?;
        let language = LanguageModel::train(corpus, config.smoothing)?;
        Ok(Self::from_parts(config, exceptions, dictionary, channel, language))
    }

    /// Like [`Lemmatizer::train`], deriving the dictionary from the corpus pairs.
    pub fn train_from_corpus(
        config: LemmatizerConfig,
        corpus: &[TrainingRecord],
        exceptions: ExceptionTable,
    ) -> Result<Self, ModelError> {
        let dictionary = DictionaryIndex::from_records(corpus);
        Self::train(config, corpus, dictionary, exceptions)
    }

    /// Assemble a lemmatizer from pre-built models. The inverse channel index
    /// is always regenerated from `channel`.
    pub fn from_parts(
        config: LemmatizerConfig,
        exceptions: ExceptionTable,
        dictionary: DictionaryIndex,
        channel: ChannelModel,
        language: LanguageModel,
    ) -> Self {
        let inverse = channel.invert();
        info!(
            "lemmatizer ready: {} exceptions, {} dictionary words, {} channel groups, {} lemmas",
            exceptions.len(),
            dictionary.len(),
            channel.group_count(),
            language.vocabulary_size()
        );
        Self {
            config,
            exceptions,
            dictionary,
            channel,
            inverse,
            language,
        }
    }

    pub fn config(&self) -> &LemmatizerConfig {
        &self.config
    }

    pub fn exceptions(&self) -> &ExceptionTable {
        &self.exceptions
    }

    pub fn dictionary(&self) -> &DictionaryIndex {
        &self.dictionary
    }

    pub fn channel(&self) -> &ChannelModel {
        &self.channel
    }

    pub fn inverse(&self) -> &InverseChannelModel {
        &self.inverse
    }

    pub fn language(&self) -> &LanguageModel {
        &self.language
    }

    /// Lemma of `word`. Unknown words come back unchanged.
    pub fn lemmatize(&self, word: &str) -> String {
        self.analyze(word).lemma
    }

    /// Lemmatize with provenance: exception table, then dictionary, then the
    /// out-of-vocabulary search, then the word itself.
    pub fn analyze(&self, word: &str) -> Analysis {
        if let Some(lemma) = self.exceptions.get(word) {
            return Analysis {
                word: word.to_string(),
                lemma: lemma.to_string(),
                source: LemmaSource::Exception,
                candidates: Vec::new(),
            };
        }

        self.analyze_dictionary(word)
            .or_else(|| self.analyze_oov(word))
            .unwrap_or_else(|| Analysis {
                word: word.to_string(),
                lemma: word.to_string(),
                source: LemmaSource::Identity,
                candidates: Vec::new(),
            })
    }

    /// Lemmatize `(lemma, word)` records and count exact matches.
    pub fn evaluate<'a>(
        &self,
        records: impl IntoIterator<Item = &'a TrainingRecord>,
    ) -> Evaluation {
        let mut total = 0usize;
        let mut correct = 0usize;
        for record in records {
            total += 1;
            if self.lemmatize(&record.word) == record.lemma {
                correct += 1;
            }
        }
        let accuracy = if total == 0 {
            0.0
        } else {
            correct as f64 / total as f64
        };
        Evaluation {
            total,
            correct,
            accuracy,
        }
    }

    fn analyze_dictionary(&self, word: &str) -> Option<Analysis> {
        let found = self
            .dictionary
            .lookup(word, self.config.strategy, self.config.min_suf_len);
        if found.is_empty() {
            return None;
        }
        let source = LemmaSource::Dictionary {
            prefix: found.prefix.to_string(),
            suffix: found.suffix.to_string(),
        };

        match found.candidates {
            [only] => Some(Analysis {
                word: word.to_string(),
                lemma: format!("{}{}", found.prefix, only),
                source,
                candidates: Vec::new(),
            }),
            many => {
                let scored: Vec<ScoredCandidate> = many
                    .iter()
                    .map(|candidate| ScoredCandidate {
                        lemma: candidate.clone(),
                        score: self.dictionary_score(found.prefix, candidate, word),
                    })
                    .collect();
                let best = scored
                    .iter()
                    .map(|c| c.score)
                    .fold(f64::NEG_INFINITY, f64::max);
                // Ties go to the first candidate in dictionary order.
                let winner = scored
                    .iter()
                    .find(|c| (c.score - best).abs() < TIE_EPSILON)?;
                Some(Analysis {
                    word: word.to_string(),
                    lemma: format!("{}{}", found.prefix, winner.lemma),
                    source,
                    candidates: scored,
                })
            }
        }
    }

    /// `P(word_suffix | lemma_suffix) * max(P(candidate), P(prefix + candidate))`,
    /// with missing probabilities counted as zero.
    fn dictionary_score(&self, prefix: &str, candidate: &str, word: &str) -> f64 {
        let pair = suffix_pair(candidate, word, self.config.prefix_window);
        let channel = self
            .channel
            .probability(&pair.lemma_suffix, &pair.word_suffix)
            .unwrap_or(0.0);
        let bare = self.language.probability(candidate).unwrap_or(0.0);
        let prefixed = self
            .language
            .probability(&format!("{prefix}{candidate}"))
            .unwrap_or(0.0);
        channel * bare.max(prefixed)
    }

    fn analyze_oov(&self, word: &str) -> Option<Analysis> {
        let mut scored = Vec::new();
        for at in char_boundaries(word) {
            let (head, tail) = word.split_at(at);
            for lemma_suffix in self.inverse.lemma_suffixes(tail) {
                let lemma = format!("{head}{lemma_suffix}");
                if !self.language.contains(&lemma) {
                    continue;
                }
                let (Some(prior), Some(channel)) = (
                    self.language.probability(&lemma),
                    self.channel.probability(lemma_suffix, tail),
                ) else {
                    continue;
                };
                scored.push(ScoredCandidate {
                    lemma,
                    score: prior.powf(OOV_PRIOR_EXPONENT) * channel,
                });
            }
        }

        // Best score first; exact ties prefer the lexicographically greatest lemma.
        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| b.lemma.cmp(&a.lemma))
        });
        let best = scored.first()?;
        Some(Analysis {
            word: word.to_string(),
            lemma: best.lemma.clone(),
            source: LemmaSource::OutOfVocabulary { score: best.score },
            candidates: scored,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LookupStrategy, Smoothing};

    fn corpus() -> Vec<TrainingRecord> {
        vec![
            TrainingRecord::new("kass", "kassi", 10),
            TrainingRecord::new("kass", "kass", 5),
            TrainingRecord::new("mass", "massi", 4),
            TrainingRecord::new("tee", "teed", 6),
            TrainingRecord::new("tegema", "teed", 2),
            TrainingRecord::new("tegema", "teeme", 3),
            TrainingRecord::new("olema", "on", 30),
        ]
    }

    fn lemmatizer(exceptions: ExceptionTable) -> Lemmatizer {
        Lemmatizer::train_from_corpus(LemmatizerConfig::default(), &corpus(), exceptions)
            .expect("train")
    }

    #[test]
    fn exceptions_win_over_dictionary() {
        let mut exceptions = ExceptionTable::new();
        exceptions.insert("kassi", "kiisu");
        let lem = lemmatizer(exceptions);
        let analysis = lem.analyze("kassi");
        assert_eq!(analysis.lemma, "kiisu");
        assert_eq!(analysis.source, LemmaSource::Exception);
    }

    #[test]
    fn single_candidate_is_returned_without_scoring() {
        let lem = lemmatizer(ExceptionTable::new());
        let analysis = lem.analyze("kassi");
        assert_eq!(analysis.lemma, "kass");
        assert!(analysis.candidates.is_empty());
        assert!(matches!(analysis.source, LemmaSource::Dictionary { .. }));
    }

    #[test]
    fn scores_competing_candidates() {
        let lem = lemmatizer(ExceptionTable::new());
        let analysis = lem.analyze("teed");
        assert_eq!(analysis.candidates.len(), 2);
        // "tee" wins on both the channel (-e -> -ed seen 6 times) and the prior.
        assert_eq!(analysis.lemma, "tee");
    }

    #[test]
    fn words_matching_no_suffix_rule_come_back_unchanged() {
        let lem = lemmatizer(ExceptionTable::new());
        // No dictionary entry and no word suffix the channel model has seen.
        let analysis = lem.analyze("kassil");
        assert_eq!(analysis.lemma, "kassil");
        assert_eq!(analysis.source, LemmaSource::Identity);
    }

    #[test]
    fn oov_reconstructs_known_lemma_from_other_inflection() {
        let records = vec![
            TrainingRecord::new("kass", "kassi", 10),
            TrainingRecord::new("mass", "mass", 3),
        ];
        let lem = Lemmatizer::train(
            LemmatizerConfig::default(),
            &records,
            DictionaryIndex::new(),
            ExceptionTable::new(),
        )
        .unwrap();
        let analysis = lem.analyze("massi");
        assert_eq!(analysis.lemma, "mass");
        assert!(matches!(
            analysis.source,
            LemmaSource::OutOfVocabulary { score } if score > 0.0
        ));
    }

    #[test]
    fn unknown_words_and_empty_input_pass_through() {
        let lem = lemmatizer(ExceptionTable::new());
        assert_eq!(lem.lemmatize("xyzzy"), "xyzzy");
        assert_eq!(lem.lemmatize(""), "");
        assert_eq!(lem.lemmatize("1234"), "1234");
        assert_eq!(lem.lemmatize("?!"), "?!");
    }

    #[test]
    fn empty_corpus_fails_construction() {
        let err = Lemmatizer::train_from_corpus(
            LemmatizerConfig::default(),
            &[],
            ExceptionTable::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::EmptyCorpus));
    }

    #[test]
    fn overflowing_counts_fail_construction() {
        let records = [
            TrainingRecord::new("kass", "kassi", u64::MAX),
            TrainingRecord::new("mass", "massi", 1),
        ];
        let err = Lemmatizer::train_from_corpus(
            LemmatizerConfig::default(),
            &records,
            ExceptionTable::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::CountOverflow(ref lemma) if lemma == "mass"));
    }

    #[test]
    fn evaluation_counts_exact_matches() {
        let lem = lemmatizer(ExceptionTable::new());
        let gold = [
            TrainingRecord::new("kass", "kassi", 1),
            TrainingRecord::new("olema", "on", 1),
            TrainingRecord::new("koer", "koera", 1),
        ];
        let eval = lem.evaluate(&gold);
        assert_eq!(eval.total, 3);
        assert_eq!(eval.correct, 2);
        assert!((eval.accuracy - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(lem.evaluate(std::iter::empty::<&TrainingRecord>()).accuracy, 0.0);
    }

    #[test]
    fn exact_strategy_and_add_one_smoothing_are_honoured() {
        let config = LemmatizerConfig {
            smoothing: Smoothing::AddOne,
            strategy: LookupStrategy::Exact,
            ..LemmatizerConfig::default()
        };
        let lem = Lemmatizer::train_from_corpus(config, &corpus(), ExceptionTable::new()).unwrap();
        assert_eq!(lem.language().smoothing(), Smoothing::AddOne);
        assert_eq!(lem.lemmatize("teed"), "tee");
    }
}
