use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use lemma_data::{read_corpus, read_dictionary};
use suffix_lemmatizer::{DictionaryIndex, ExceptionTable, Lemmatizer, LemmatizerConfig};
use tracing::info;

/// Where the server finds its training data and model snapshot.
#[derive(Debug, Clone)]
pub struct ModelPaths {
    pub corpus: PathBuf,
    pub dictionary: Option<PathBuf>,
    pub exceptions: Option<PathBuf>,
    /// Snapshot to load. When the file does not exist yet, the model is
    /// trained from `corpus` and written here.
    pub snapshot: Option<PathBuf>,
}

impl ModelPaths {
    pub fn new(corpus: impl Into<PathBuf>) -> Self {
        Self {
            corpus: corpus.into(),
            dictionary: None,
            exceptions: None,
            snapshot: None,
        }
    }
}

/// Load a snapshot if one exists, otherwise train from the corpus files.
///
/// `config` only applies when training; a snapshot carries its own.
pub fn load_lemmatizer(paths: &ModelPaths, config: LemmatizerConfig) -> Result<Lemmatizer> {
    if let Some(snapshot) = &paths.snapshot
        && snapshot.exists()
    {
        let start = Instant::now();
        let lemmatizer = Lemmatizer::load(snapshot)
            .with_context(|| format!("loading model snapshot {}", snapshot.display()))?;
        info!("snapshot loaded in {} ms", start.elapsed().as_millis());
        return Ok(lemmatizer);
    }

    let start = Instant::now();
    let corpus = read_corpus(&paths.corpus)?;
    let dictionary = match &paths.dictionary {
        Some(path) => DictionaryIndex::from_entries(read_dictionary(path)?),
        None => DictionaryIndex::from_records(&corpus),
    };
    let mut exceptions = ExceptionTable::estonian();
    if let Some(path) = &paths.exceptions {
        exceptions.extend(read_dictionary(path)?);
    }
    let lemmatizer = Lemmatizer::train(config, &corpus, dictionary, exceptions)
        .with_context(|| format!("training on {}", paths.corpus.display()))?;
    info!("model trained in {} ms", start.elapsed().as_millis());

    if let Some(snapshot) = &paths.snapshot {
        lemmatizer
            .save(snapshot)
            .with_context(|| format!("writing model snapshot {}", snapshot.display()))?;
    }
    Ok(lemmatizer)
}
