use std::sync::Arc;
use std::thread;

use lemma_types::{DictionaryEntry, TrainingRecord};
use suffix_lemmatizer::{
    ChannelModel, DictionaryIndex, ExceptionTable, LanguageModel, LemmaSource, Lemmatizer,
    LemmatizerConfig, Smoothing,
};

fn corpus() -> Vec<TrainingRecord> {
    vec![
        TrainingRecord::new("kass", "kassi", 10),
        TrainingRecord::new("kass", "kassid", 4),
        TrainingRecord::new("kass", "kass", 6),
        TrainingRecord::new("mass", "massi", 3),
        TrainingRecord::new("maja", "majas", 8),
        TrainingRecord::new("maja", "maja", 5),
        TrainingRecord::new("suvi", "suvi", 2),
        TrainingRecord::new("tee", "teed", 6),
        TrainingRecord::new("tegema", "teed", 2),
        TrainingRecord::new("olema", "on", 40),
        TrainingRecord::new("nurk", "nurgas", 3),
    ]
}

fn estonian() -> Lemmatizer {
    Lemmatizer::train_from_corpus(
        LemmatizerConfig::default(),
        &corpus(),
        ExceptionTable::estonian(),
    )
    .expect("train lemmatizer")
}

#[test]
fn exception_table_has_precedence_over_dictionary() {
    let mut dictionary = DictionaryIndex::from_records(&corpus());
    dictionary.insert("on", "onu");
    let lem = Lemmatizer::train(
        LemmatizerConfig::default(),
        &corpus(),
        dictionary,
        ExceptionTable::estonian(),
    )
    .unwrap();

    assert_eq!(lem.lemmatize("on"), "olema");
    for (word, lemma) in lem.exceptions().iter() {
        assert_eq!(lem.lemmatize(word), lemma);
    }
}

#[test]
fn kass_scenario_yields_certain_channel_probability() {
    let records = [TrainingRecord::new("kass", "kassi", 10)];
    let channel = ChannelModel::train(&records, 1, 1).unwrap();
    let p = channel.probability("s", "si").unwrap();
    assert!((p - 1.0).abs() < 1e-9);
}

#[test]
fn channel_groups_are_normalised_and_inverse_is_consistent() {
    let lem = estonian();
    for (lemma_suffix, dist) in lem.channel().iter() {
        let sum: f64 = dist.values().sum();
        assert!((sum - 1.0).abs() < 1e-9, "{lemma_suffix}: {sum}");
        for word_suffix in dist.keys() {
            assert!(lem.inverse().contains(word_suffix, lemma_suffix));
        }
    }
    for (word_suffix, lemma_suffixes) in lem.inverse().iter() {
        for lemma_suffix in lemma_suffixes {
            assert!(lem.channel().probability(lemma_suffix, word_suffix).is_some());
        }
    }
}

#[test]
fn single_candidate_reattaches_stripped_prefix() {
    let lem = estonian();
    let analysis = lem.analyze("tänavanurgas");
    assert_eq!(
        analysis.source,
        LemmaSource::Dictionary {
            prefix: "tänava".into(),
            suffix: "nurgas".into(),
        }
    );
    assert_eq!(analysis.lemma, "tänavanurk");
    assert!(analysis.candidates.is_empty());
}

#[test]
fn ambiguous_words_pick_the_best_scoring_candidate_every_time() {
    let lem = estonian();
    let first = lem.analyze("teed");
    assert_eq!(first.candidates.len(), 2);
    assert_eq!(first.lemma, "tee");
    for _ in 0..20 {
        assert_eq!(lem.lemmatize("teed"), "tee");
    }
}

#[test]
fn exact_ties_go_to_the_first_dictionary_candidate() {
    // Both readings of "tax" are equally frequent and equally regular.
    let corpus = [
        TrainingRecord::new("ta", "tax", 5),
        TrainingRecord::new("tay", "tax", 5),
    ];
    let dictionary = DictionaryIndex::from_entries([
        DictionaryEntry::new("tax", "tay"),
        DictionaryEntry::new("tax", "ta"),
    ]);
    let lem = Lemmatizer::train(
        LemmatizerConfig::default(),
        &corpus,
        dictionary,
        ExceptionTable::new(),
    )
    .unwrap();
    let analysis = lem.analyze("tax");
    assert_eq!(analysis.candidates[0].score, analysis.candidates[1].score);
    assert!(analysis.candidates[0].score > 0.0);
    assert_eq!(analysis.lemma, "tay");
}

#[test]
fn stripped_prefix_counts_toward_the_candidate_prior() {
    // Only "kakass" is a known lemma; the bare candidates "kass" and "kasse"
    // are not, but both have an observed suffix substitution into "kakassi".
    let corpus = [
        TrainingRecord::new("kakass", "kakassid", 3),
        TrainingRecord::new("mass", "makassi", 2),
        TrainingRecord::new("masse", "makassi", 2),
    ];
    let dictionary = DictionaryIndex::from_entries([
        DictionaryEntry::new("kassi", "kasse"),
        DictionaryEntry::new("kassi", "kass"),
    ]);
    let config = LemmatizerConfig {
        min_suf_len: 3,
        ..LemmatizerConfig::default()
    };
    let lem = Lemmatizer::train(config, &corpus, dictionary, ExceptionTable::new()).unwrap();
    assert!(!lem.language().contains("kass"));
    assert!(lem.channel().probability("ass", "akassi").is_some());

    let analysis = lem.analyze("kakassi");
    assert_eq!(
        analysis.source,
        LemmaSource::Dictionary {
            prefix: "ka".into(),
            suffix: "kassi".into(),
        }
    );
    assert_eq!(analysis.candidates.len(), 2);
    assert_eq!(analysis.candidates[0].score, 0.0);
    assert!((analysis.candidates[1].score - 3.0 / 7.0).abs() < 1e-12);
    assert_eq!(analysis.lemma, "kakass");
}

#[test]
fn out_of_vocabulary_words_use_known_lemmas_only() {
    let lem = estonian();
    // "rassi" is unknown; "rass" is not a known lemma so nothing is guessed.
    assert_eq!(lem.lemmatize("rassi"), "rassi");

    // With an empty dictionary the inflection of a known lemma is recovered.
    let lem = Lemmatizer::train(
        LemmatizerConfig::default(),
        &corpus(),
        DictionaryIndex::new(),
        ExceptionTable::new(),
    )
    .unwrap();
    let analysis = lem.analyze("massid");
    assert_eq!(analysis.lemma, "mass");
    assert!(matches!(analysis.source, LemmaSource::OutOfVocabulary { .. }));
    let scores: Vec<f64> = analysis.candidates.iter().map(|c| c.score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn lemmatize_is_total() {
    let lem = estonian();
    for word in ["", " ", "123", "§§", "tundmatusõna", "ä", "$"] {
        assert_eq!(lem.lemmatize(word), word);
    }
}

#[test]
fn known_lemmas_do_not_get_worse_than_identity() {
    let lem = estonian();
    for (lemma, _) in lem.language().iter() {
        if lem.exceptions().contains(lemma) {
            continue;
        }
        assert_eq!(lem.lemmatize(lemma), lemma);
    }
}

#[test]
fn prebuilt_models_can_be_assembled_directly() {
    let records = corpus();
    let lem = Lemmatizer::from_parts(
        LemmatizerConfig {
            smoothing: Smoothing::AddOne,
            ..LemmatizerConfig::default()
        },
        ExceptionTable::new(),
        DictionaryIndex::from_records(&records),
        ChannelModel::train(&records, 1, 1).unwrap(),
        LanguageModel::train(&records, Smoothing::AddOne).unwrap(),
    );
    assert_eq!(lem.lemmatize("kassid"), "kass");
    assert_eq!(lem.lemmatize("nurgas"), "nurk");
}

#[test]
fn shared_lemmatizer_answers_concurrently() {
    let lem = Arc::new(estonian());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let lem = Arc::clone(&lem);
            thread::spawn(move || {
                ["kassid", "teed", "on", "tundmatu"]
                    .iter()
                    .map(|w| lem.lemmatize(w))
                    .collect::<Vec<_>>()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(
            handle.join().unwrap(),
            vec!["kass", "tee", "olema", "tundmatu"]
        );
    }
}
