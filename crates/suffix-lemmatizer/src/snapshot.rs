use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::channel::ChannelModel;
use crate::config::LemmatizerConfig;
use crate::dictionary::DictionaryIndex;
use crate::engine::Lemmatizer;
use crate::error::ModelError;
use crate::exceptions::ExceptionTable;
use crate::language::LanguageModel;

/// Serializable form of a trained [`Lemmatizer`].
///
/// The inverse channel index is not stored; it is rebuilt on load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub config: LemmatizerConfig,
    pub exceptions: ExceptionTable,
    pub dictionary: DictionaryIndex,
    pub channel: ChannelModel,
    pub language: LanguageModel,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    config: &'a LemmatizerConfig,
    exceptions: &'a ExceptionTable,
    dictionary: &'a DictionaryIndex,
    channel: &'a ChannelModel,
    language: &'a LanguageModel,
}

impl Lemmatizer {
    pub fn to_snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            config: self.config().clone(),
            exceptions: self.exceptions().clone(),
            dictionary: self.dictionary().clone(),
            channel: self.channel().clone(),
            language: self.language().clone(),
        }
    }

    pub fn from_snapshot(snapshot: ModelSnapshot) -> Self {
        Self::from_parts(
            snapshot.config,
            snapshot.exceptions,
            snapshot.dictionary,
            snapshot.channel,
            snapshot.language,
        )
    }

    /// Write the trained models to `path` as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        let snapshot = SnapshotRef {
            config: self.config(),
            exceptions: self.exceptions(),
            dictionary: self.dictionary(),
            channel: self.channel(),
            language: self.language(),
        };
        serde_json::to_writer(&mut writer, &snapshot)?;
        writer.flush()?;
        info!("saved model snapshot to {}", path.display());
        Ok(())
    }

    /// Read a snapshot written by [`Lemmatizer::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let snapshot: ModelSnapshot = serde_json::from_reader(reader)?;
        info!("loaded model snapshot from {}", path.display());
        Ok(Self::from_snapshot(snapshot))
    }
}
