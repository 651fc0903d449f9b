//! Synonym lookup over a static lexical table.
//!
//! The resolver flattens every sense of a headword into a single candidate
//! set and removes the query word itself under case-insensitive comparison.
//! Unknown words yield an empty set; there are no error conditions at
//! lookup time.
//!
//! A small built-in table ships with the crate (see `data/default_lexicon.tsv`);
//! custom tables load from the same TSV format:
//!
//! ```text
//! headword<TAB>lemma, lemma, ...
//! ```
//!
//! One sense per line, repeated headwords accumulate senses, `#` starts a
//! comment. The table is read-only after construction.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

/// Source of synonym candidates for a word.
///
/// Implementations must be read-only: repeated lookups of the same word
/// return the same set. Candidate sets are ordered (`BTreeSet`) so that
/// choosing a replacement by index is reproducible under a fixed seed.
pub trait Lexicon {
    /// All synonyms of `word` across every sense, excluding `word` itself
    /// under case-insensitive comparison. Unknown words yield an empty set.
    fn synonyms(&self, word: &str) -> BTreeSet<String>;
}

/// In-memory lexicon backed by a TSV synonym table.
#[derive(Debug, Clone, Default)]
pub struct StaticLexicon {
    /// Lowercased headword -> senses, each sense a list of lemmas.
    senses: BTreeMap<String, Vec<Vec<String>>>,
}

static BUILTIN: Lazy<StaticLexicon> = Lazy::new(|| {
    StaticLexicon::from_tsv(include_str!("../data/default_lexicon.tsv"))
        .expect("embedded lexicon table is well-formed")
});

impl StaticLexicon {
    /// Create an empty lexicon. Useful with [`StaticLexicon::with_sense`]
    /// for building small fixtures.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table, parsed once per process.
    pub fn builtin() -> &'static StaticLexicon {
        &BUILTIN
    }

    /// Parse a lexicon from TSV text.
    ///
    /// Blank lines and lines starting with `#` are skipped. Every other
    /// line must contain a tab-separated headword and a comma-separated
    /// lemma list; anything else is a [`Error::DataLoad`] naming the
    /// 1-based line.
    pub fn from_tsv(raw: &str) -> Result<Self> {
        let mut lexicon = StaticLexicon::default();
        for (i, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (headword, lemmas) = line.split_once('\t').ok_or_else(|| {
                Error::data_load(format!("lexicon line {}: expected 'headword<TAB>lemmas'", i + 1))
            })?;
            let headword = headword.trim();
            if headword.is_empty() {
                return Err(Error::data_load(format!("lexicon line {}: empty headword", i + 1)));
            }
            let lemmas: Vec<String> = lemmas
                .split(',')
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect();
            if lemmas.is_empty() {
                return Err(Error::data_load(format!(
                    "lexicon line {}: no lemmas for '{}'",
                    i + 1,
                    headword
                )));
            }
            lexicon.push_sense(headword, lemmas);
        }
        Ok(lexicon)
    }

    /// Load a lexicon from a TSV file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::data_load(format!("{}: {}", path.display(), e)))?;
        let lexicon = Self::from_tsv(&raw)?;
        log::info!(
            "loaded lexicon from {} ({} headwords)",
            path.display(),
            lexicon.len()
        );
        Ok(lexicon)
    }

    /// Add one sense for `headword`. Builder form for tests and fixtures.
    pub fn with_sense(mut self, headword: &str, lemmas: &[&str]) -> Self {
        self.push_sense(headword, lemmas.iter().map(|l| l.to_string()).collect());
        self
    }

    /// Number of distinct headwords.
    pub fn len(&self) -> usize {
        self.senses.len()
    }

    /// Whether the lexicon has no headwords.
    pub fn is_empty(&self) -> bool {
        self.senses.is_empty()
    }

    fn push_sense(&mut self, headword: &str, lemmas: Vec<String>) {
        self.senses
            .entry(headword.to_lowercase())
            .or_default()
            .push(lemmas);
    }
}

impl Lexicon for StaticLexicon {
    fn synonyms(&self, word: &str) -> BTreeSet<String> {
        let key = word.to_lowercase();
        let mut candidates = BTreeSet::new();
        if let Some(senses) = self.senses.get(&key) {
            for sense in senses {
                for lemma in sense {
                    if lemma.to_lowercase() != key {
                        candidates.insert(lemma.clone());
                    }
                }
            }
        }
        candidates
    }
}
