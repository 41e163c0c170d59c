//! cedict-core
//!
//! Dictionary-backed Chinese word segmentation for editor word completion.
//! A CC-CEDICT style dictionary is indexed once into two prefix tries
//! (simplified and traditional); text is then split into position-annotated
//! tokens carrying both script forms, pinyin and glosses.
//!
//! Public API:
//! - `PrefixTrie` - scalar-keyed trie with exact and prefix-subtree lookup
//! - `tone::render` - numeral-tone pinyin to diacritic pinyin
//! - `parse_line` / `DictionaryEntry` - one dictionary line
//! - `DictionaryIndex` - immutable index built from dictionary text
//! - `tokenize` / `Segmenter` - longest-match segmentation into `Token`s
//! - `Config` - host-facing settings, loadable from TOML
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod trie;
pub use trie::PrefixTrie;

pub mod tone;

pub mod entry;
pub use entry::{parse_line, DictionaryEntry};

pub mod error;
pub use error::{Diagnostic, LoadError};

pub mod index;
pub use index::{BuildReport, DictionaryIndex, Script};

pub mod punctuation;

pub mod segmenter;
pub use segmenter::{tokenize, Position, ScriptPreference, Segmenter, Token, TokenMatch};

pub mod completion;
pub use completion::{completion_words, meets_trigger, should_ignore};

/// Settings for the host's completion layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Dictionary file to index at startup.
    pub dictionary: Option<PathBuf>,

    /// Minimum scalars typed before completion triggers.
    pub trigger_threshold: usize,

    /// Offer punctuation tokens as completion words.
    pub keep_punctuation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary: None,
            trigger_threshold: 2,
            keep_punctuation: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), LoadError> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
