//! Diagnostics and load errors.
//!
//! Nothing inside dictionary indexing or segmentation fails a call. Bad
//! input is described by a [`Diagnostic`], logged through `tracing`, and
//! counted in the build report. [`LoadError`] is reserved for the I/O
//! helpers that read dictionaries, configs and compiled indexes from disk.

/// A recoverable problem found while indexing or rendering.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Diagnostic {
    /// Line did not match `TRAD SIMP [PINYIN] /GLOSS/`; it was dropped.
    #[error("malformed dictionary line {line}: {content:?}")]
    MalformedDictionaryLine { line: usize, content: String },

    /// Syllable whose trailing tone is missing or outside 1-5; passed through.
    #[error("invalid tone number {tone:?} in {syllable:?}")]
    InvalidToneNumber { syllable: String, tone: Option<char> },
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("config serialization: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("compiled index: {0}")]
    Compiled(#[from] bincode::Error),
}
