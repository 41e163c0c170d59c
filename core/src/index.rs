//! Dictionary index: two prefix tries over one entry store.
//!
//! Every parsed entry is inserted into both tries, under its simplified form
//! in one and its traditional form in the other. Tries hold entry ids, so a
//! homograph line appears once per insertion and duplicate lines stay
//! distinct entries.
//!
//! The index is immutable after construction and is meant to be shared
//! behind an `Arc` by any number of concurrent segmentation calls.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::entry::{self, DictionaryEntry};
use crate::error::{Diagnostic, LoadError};
use crate::trie::PrefixTrie;

/// Which orthography a headword is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Simplified,
    Traditional,
}

/// Outcome of indexing dictionary text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Entries successfully parsed and inserted.
    pub parsed: usize,
    /// Non-blank, non-comment lines dropped for not matching the grammar.
    pub skipped: usize,
    /// Syllables whose tone number could not be rendered.
    pub invalid_tones: usize,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Default)]
pub struct DictionaryIndex {
    entries: Vec<DictionaryEntry>,
    simplified: PrefixTrie<usize>,
    traditional: PrefixTrie<usize>,
}

impl DictionaryIndex {
    /// Index newline-separated dictionary text.
    pub fn build(text: &str) -> Self {
        Self::build_with_report(text).0
    }

    /// Index dictionary text and describe what was dropped along the way.
    pub fn build_with_report(text: &str) -> (Self, BuildReport) {
        let mut report = BuildReport::default();
        let mut entries = Vec::new();

        for (idx, line) in text.split('\n').enumerate() {
            if entry::is_blank_or_comment(line) {
                continue;
            }

            let mut tone_diags = Vec::new();
            match entry::parse_line_reporting(line, &mut tone_diags) {
                Some(e) => {
                    report.invalid_tones += tone_diags.len();
                    report.diagnostics.extend(tone_diags);
                    entries.push(e);
                }
                None => {
                    tracing::debug!(line = idx + 1, "skipping malformed dictionary line");
                    report.skipped += 1;
                    report.diagnostics.push(Diagnostic::MalformedDictionaryLine {
                        line: idx + 1,
                        content: line.to_string(),
                    });
                }
            }
        }

        report.parsed = entries.len();
        tracing::info!(
            parsed = report.parsed,
            skipped = report.skipped,
            invalid_tones = report.invalid_tones,
            "dictionary indexed"
        );
        (Self::from_entries(entries), report)
    }

    /// Build both tries from already-parsed entries, in list order.
    pub fn from_entries(entries: Vec<DictionaryEntry>) -> Self {
        let mut simplified = PrefixTrie::new();
        let mut traditional = PrefixTrie::new();
        for (id, e) in entries.iter().enumerate() {
            simplified.insert(&e.simplified, id);
            traditional.insert(&e.traditional, id);
        }
        Self {
            entries,
            simplified,
            traditional,
        }
    }

    /// Read and index a dictionary file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::build(&text))
    }

    fn trie(&self, script: Script) -> &PrefixTrie<usize> {
        match script {
            Script::Simplified => &self.simplified,
            Script::Traditional => &self.traditional,
        }
    }

    /// Entries whose headword in `script` is exactly `word`, in load order.
    pub fn lookup(&self, word: &str, script: Script) -> Vec<&DictionaryEntry> {
        self.trie(script)
            .get(word)
            .iter()
            .map(|&id| &self.entries[id])
            .collect()
    }

    /// Entries whose headword in `script` equals or extends `word`.
    ///
    /// Order is the trie's pre-order walk: exact matches first, then longer
    /// headwords grouped by the order their next scalar was first seen.
    pub fn lookup_with_prefix(&self, word: &str, script: Script) -> Vec<&DictionaryEntry> {
        self.trie(script)
            .get_with_prefix(word)
            .into_iter()
            .map(|&id| &self.entries[id])
            .collect()
    }

    /// True if `word` is an exact headword in either script.
    pub fn contains_word(&self, word: &str) -> bool {
        self.simplified.contains_key(word) || self.traditional.contains_key(word)
    }

    /// All entries in load order.
    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Save the parsed entries with bincode for fast reloading.
    pub fn save_compiled<P: AsRef<Path>>(&self, path: P) -> Result<(), LoadError> {
        let mut writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(&mut writer, &self.entries)?;
        writer.flush()?;
        Ok(())
    }

    /// Load an index written by [`save_compiled`](Self::save_compiled).
    ///
    /// Tries are rebuilt in the saved entry order, so lookups and tie-breaks
    /// match the index that was saved.
    pub fn load_compiled<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let reader = BufReader::new(File::open(path)?);
        let entries: Vec<DictionaryEntry> = bincode::deserialize_from(reader)?;
        tracing::info!(entries = entries.len(), "compiled dictionary loaded");
        Ok(Self::from_entries(entries))
    }
}
