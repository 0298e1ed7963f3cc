use std::collections::HashMap;

use lemma_types::DictionaryEntry;
use serde::{Deserialize, Serialize};

/// Hand-curated Estonian forms the statistical models get wrong: pronouns,
/// auxiliaries, postpositions and frozen participles. Later entries override
/// earlier ones for the same word.
const ESTONIAN: &[(&str, &str)] = &[
    ("selle", "see"),
    ("seda", "see"),
    ("pärast", "pärast"),
    ("on", "olema"),
    ("või", "või"),
    ("&sect;", "&sect"),
    ("ta", "tema"),
    ("eest", "eest"),
    ("kõige", "kõige"),
    ("seal", "seal"),
    ("kokku", "kokku"),
    ("poole", "poole"),
    ("alati", "alati"),
    ("puhul", "puhul"),
    ("korras", "kord"),
    ("läks", "minema"),
    ("umbes", "umbes"),
    ("vastavalt", "vastavalt"),
    ("ajal", "ajal"),
    ("võiks", "võima"),
    ("neil", "tema"),
    ("neist", "see"),
    ("kehtestatud", "kehtestatud"),
    ("läinud", "minema"),
    ("meile", "mina"),
    ("siia", "siia"),
    ("poleks", "olema"),
    ("kõrvale", "kõrvale"),
    ("kohaselt", "kohaselt"),
    ("kohal", "kohal"),
    ("antud", "andma"),
    ("ringi", "ringi"),
    ("saanud", "saanud"),
    ("muutus", "muutuma"),
    ("lubatud", "lubatud"),
    ("teed", "tee"),
    ("pidevalt", "pidevalt"),
    ("esile", "esile"),
    ("kohta", "kohta"),
    ("ainult", "ainult"),
    ("sest", "sest"),
    ("meie", "mina"),
    ("nende", "see"),
    ("talle", "tema"),
    ("need", "see"),
    ("rt", "rt"),
    ("tal", "tema"),
    ("ikka", "ikka"),
    ("korral", "korral"),
    ("euroopa", "euroopa"),
    ("sellele", "see"),
    ("sellega", "see"),
    ("tavaliselt", "tavaliselt"),
    ("lubatud", "lubama"),
    ("käes", "käsi"),
    ("teid", "sina"),
    ("koondumise", "koondumine"),
    ("oluliselt", "oluliselt"),
    ("nimelt", "nimelt"),
    ("alates", "alates"),
    ("pähe", "pea"),
    ("püsti", "püsti"),
    ("lähedal", "lähedal"),
    ("inglise", "inglise"),
    ("ära", "ärama"),
    ("nimel", "nimel"),
    ("eestisse", "eesti"),
    ("sõlmitud", "sõlmitud"),
];

/// Fixed surface form to lemma overrides, consulted before any model.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExceptionTable {
    entries: HashMap<String, String>,
}

impl ExceptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in Estonian exception list.
    pub fn estonian() -> Self {
        let mut table = Self::new();
        for (word, lemma) in ESTONIAN {
            table.insert(*word, *lemma);
        }
        table
    }

    pub fn from_entries(entries: impl IntoIterator<Item = DictionaryEntry>) -> Self {
        let mut table = Self::new();
        table.extend(entries);
        table
    }

    /// Add or replace the override for `word`.
    pub fn insert(&mut self, word: impl Into<String>, lemma: impl Into<String>) {
        self.entries.insert(word.into(), lemma.into());
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(String::as_str)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(word, lemma)| (word.as_str(), lemma.as_str()))
    }
}

impl Extend<DictionaryEntry> for ExceptionTable {
    fn extend<I: IntoIterator<Item = DictionaryEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.entries.insert(entry.word, entry.lemma);
        }
    }
}
