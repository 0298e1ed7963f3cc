use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use lemma_data::DataSet;
use lemma_types::normalize_word;
use suffix_lemmatizer::{
    DictionaryIndex, ExceptionTable, LemmaSource, Lemmatizer, LemmatizerConfig,
};

const USAGE: &str =
    "usage: cargo run -p suffix-lemmatizer --example lookup -- <data-dir> [--demo | <word>...]";

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let data_dir = args.next().map(PathBuf::from).context(USAGE)?;
    let rest: Vec<String> = args.collect();

    let words: Vec<String> = match rest.as_slice() {
        [] => bail!(USAGE),
        [flag] if flag == "--demo" => ["kassid", "teed", "on", "majas", "tundmatu"]
            .into_iter()
            .map(String::from)
            .collect(),
        words => words.to_vec(),
    };

    let data = DataSet::load(&data_dir)
        .with_context(|| format!("loading training data from {}", data_dir.display()))?;
    let dictionary = match data.dictionary {
        Some(entries) => DictionaryIndex::from_entries(entries),
        None => DictionaryIndex::from_records(&data.corpus),
    };
    let mut exceptions = ExceptionTable::estonian();
    if let Some(extra) = data.exceptions {
        exceptions.extend(extra);
    }
    let lemmatizer = Lemmatizer::train(
        LemmatizerConfig::default(),
        &data.corpus,
        dictionary,
        exceptions,
    )?;

    println!("Data: {}", data_dir.display());

    for word in words {
        let analysis = lemmatizer.analyze(&normalize_word(&word));
        println!("\nSurface: {}", analysis.word);
        let source = match &analysis.source {
            LemmaSource::Exception => "exception".to_string(),
            LemmaSource::Dictionary { prefix, suffix } => {
                format!("dictionary, prefix {prefix:?} suffix {suffix:?}")
            }
            LemmaSource::OutOfVocabulary { score } => format!("guess, score {score:.3e}"),
            LemmaSource::Identity => "unknown".to_string(),
        };
        println!("  lemma: {:<12} [{}]", analysis.lemma, source);
        for cand in &analysis.candidates {
            println!("    {:<12} {:.3e}", cand.lemma, cand.score);
        }
    }

    Ok(())
}
