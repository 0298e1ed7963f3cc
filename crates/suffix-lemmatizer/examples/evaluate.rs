use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use lemma_data::{DataSet, read_corpus};
use suffix_lemmatizer::{DictionaryIndex, ExceptionTable, Lemmatizer, LemmatizerConfig, Smoothing};

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let usage = "usage: cargo run -p suffix-lemmatizer --example evaluate -- <data-dir> <gold.tsv>";
    let data_dir = args.next().map(PathBuf::from).context(usage)?;
    let gold_path = args.next().map(PathBuf::from).context(usage)?;

    let data = DataSet::load(&data_dir)
        .with_context(|| format!("loading training data from {}", data_dir.display()))?;
    let gold = read_corpus(&gold_path)?;
    let dictionary = match &data.dictionary {
        Some(entries) => DictionaryIndex::from_entries(entries.iter().cloned()),
        None => DictionaryIndex::from_records(&data.corpus),
    };
    let mut exceptions = ExceptionTable::estonian();
    if let Some(extra) = &data.exceptions {
        exceptions.extend(extra.iter().cloned());
    }

    println!("{:<10} {:>8} {:>8} {:>9}", "smoothing", "total", "correct", "accuracy");
    for smoothing in [Smoothing::None, Smoothing::AddOne] {
        let config = LemmatizerConfig {
            smoothing,
            ..LemmatizerConfig::default()
        };
        let lemmatizer = Lemmatizer::train(
            config,
            &data.corpus,
            dictionary.clone(),
            exceptions.clone(),
        )?;
        let eval = lemmatizer.evaluate(&gold);
        println!(
            "{:<10} {:>8} {:>8} {:>8.2}%",
            smoothing.to_string(),
            eval.total,
            eval.correct,
            eval.accuracy * 100.0
        );
    }

    Ok(())
}
