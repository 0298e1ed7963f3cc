//! Load lemmatizer training data from tab-separated text files.
//!
//! Three formats are understood, all UTF-8 with one record per line:
//!
//! - corpus: `lemma<TAB>word<TAB>count`
//! - dictionary: `word<TAB>lemma`
//! - exception list: `word<TAB>lemma`
//!
//! Files whose name ends in `.bz2` are decompressed on the fly (multi-stream
//! bzip2 is supported). Trailing whitespace and `\r` are ignored and blank
//! lines are skipped. Every other malformed line aborts loading with an
//! error naming the file and the 1-based line number.
//!
//! # Example
//! ```no_run
//! use lemma_data::DataSet;
//!
//! # fn main() -> anyhow::Result<()> {
//! let data = DataSet::load("/path/to/data")?;
//! println!("{} training records", data.corpus.len());
//! if let Some(dict) = &data.dictionary {
//!     println!("{} dictionary entries", dict.len());
//! }
//! # Ok(()) }
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use bzip2::read::MultiBzDecoder;
use lemma_types::{DictionaryEntry, TrainingRecord};
use tracing::{info, warn};

const CORPUS_FILES: [&str; 2] = ["corpus.bz2", "corpus.tsv"];
const DICTIONARY_FILES: [&str; 2] = ["dict.bz2", "dict.tsv"];
const EXCEPTION_FILES: [&str; 2] = ["exceptions.bz2", "exceptions.tsv"];

/// How a data file is stored on disk.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Compression {
    Plain,
    Bzip2,
}

impl Compression {
    /// Pick the compression from the file extension (`.bz2` or anything else).
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("bz2") => Compression::Bzip2,
            _ => Compression::Plain,
        }
    }
}

/// Everything needed to train a lemmatizer, read from one data directory.
#[derive(Clone, Debug, Default)]
pub struct DataSet {
    pub corpus: Vec<TrainingRecord>,
    pub dictionary: Option<Vec<DictionaryEntry>>,
    pub exceptions: Option<Vec<DictionaryEntry>>,
}

impl DataSet {
    /// Load `corpus.{bz2,tsv}` plus the optional `dict.*` and `exceptions.*`
    /// files from a directory.
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = data_dir.as_ref();
        let Some(corpus_path) = find_file(dir, &CORPUS_FILES) else {
            bail!(
                "missing required corpus file in {} (expected one of {:?})",
                dir.display(),
                CORPUS_FILES
            );
        };

        let corpus = read_corpus(&corpus_path)?;
        let dictionary = find_file(dir, &DICTIONARY_FILES)
            .map(|path| read_dictionary(&path))
            .transpose()?;
        let exceptions = find_file(dir, &EXCEPTION_FILES)
            .map(|path| read_dictionary(&path))
            .transpose()?;

        Ok(Self {
            corpus,
            dictionary,
            exceptions,
        })
    }
}

/// Read a `lemma<TAB>word<TAB>count` corpus file.
pub fn read_corpus(path: impl AsRef<Path>) -> Result<Vec<TrainingRecord>> {
    let path = path.as_ref();
    let reader = open_reader(path)?;
    let records = parse_corpus(reader, &path.display().to_string())?;
    if records.is_empty() {
        warn!("corpus {} contains no records", path.display());
    }
    info!("loaded {} training records from {}", records.len(), path.display());
    Ok(records)
}

/// Read a `word<TAB>lemma` file (dictionary or exception list).
pub fn read_dictionary(path: impl AsRef<Path>) -> Result<Vec<DictionaryEntry>> {
    let path = path.as_ref();
    let reader = open_reader(path)?;
    let entries = parse_dictionary(reader, &path.display().to_string())?;
    info!("loaded {} word/lemma pairs from {}", entries.len(), path.display());
    Ok(entries)
}

/// Parse corpus lines from any buffered reader; `source` names it in errors.
pub fn parse_corpus<R: BufRead>(reader: R, source: &str) -> Result<Vec<TrainingRecord>> {
    let mut records = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("read line {} in {}", lineno + 1, source))?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let [lemma, word, count] = fields.as_slice() else {
            bail!(
                "{}:{} malformed corpus line (expected 3 tab-separated fields, got {})",
                source,
                lineno + 1,
                fields.len()
            );
        };
        let count: u64 = count
            .trim()
            .parse()
            .with_context(|| format!("{}:{} invalid count {:?}", source, lineno + 1, count))?;
        records.push(TrainingRecord::new(*lemma, *word, count));
    }
    Ok(records)
}

/// Parse `word<TAB>lemma` lines from any buffered reader.
pub fn parse_dictionary<R: BufRead>(reader: R, source: &str) -> Result<Vec<DictionaryEntry>> {
    let mut entries = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("read line {} in {}", lineno + 1, source))?;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let [word, lemma] = fields.as_slice() else {
            bail!(
                "{}:{} malformed dictionary line (expected 2 tab-separated fields, got {})",
                source,
                lineno + 1,
                fields.len()
            );
        };
        entries.push(DictionaryEntry::new(*word, *lemma));
    }
    Ok(entries)
}

fn open_reader(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    Ok(match Compression::for_path(path) {
        Compression::Bzip2 => Box::new(BufReader::new(MultiBzDecoder::new(file))),
        Compression::Plain => Box::new(BufReader::new(file)),
    })
}

fn find_file(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_corpus_lines() {
        let input = "kass\tkassi\t10\r\n\nolema\ton\t3\n";
        let records = parse_corpus(input.as_bytes(), "mem").unwrap();
        assert_eq!(
            records,
            vec![
                TrainingRecord::new("kass", "kassi", 10),
                TrainingRecord::new("olema", "on", 3),
            ]
        );
    }

    #[test]
    fn rejects_wrong_field_count_with_line_number() {
        let input = "kass\tkassi\t10\nkass\tkassi\n";
        let err = parse_corpus(input.as_bytes(), "mem").unwrap_err();
        assert!(err.to_string().contains("mem:2"), "{err}");
    }

    #[test]
    fn rejects_non_numeric_count() {
        let input = "kass\tkassi\tmany\n";
        let err = parse_corpus(input.as_bytes(), "mem").unwrap_err();
        assert!(err.to_string().contains("mem:1 invalid count"), "{err}");

        let negative = "kass\tkassi\t-1\n";
        assert!(parse_corpus(negative.as_bytes(), "mem").is_err());
    }

    #[test]
    fn parses_dictionary_lines() {
        let input = "kassi\tkass\nkasse\tkass\n";
        let entries = parse_dictionary(input.as_bytes(), "mem").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], DictionaryEntry::new("kasse", "kass"));
        assert!(parse_dictionary("kassi\n".as_bytes(), "mem").is_err());
    }

    #[test]
    fn detects_compression_from_extension() {
        assert_eq!(
            Compression::for_path(Path::new("data/corpus.bz2")),
            Compression::Bzip2
        );
        assert_eq!(
            Compression::for_path(Path::new("data/corpus.tsv")),
            Compression::Plain
        );
        assert_eq!(Compression::for_path(Path::new("corpus")), Compression::Plain);
    }
}
