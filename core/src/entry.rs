//! CEDICT line parsing.
//!
//! Grammar: `TRADITIONAL SIMPLIFIED [PINYIN] /GLOSS/`. The gloss runs from
//! the first `/` after the pinyin to the last `/` on the line, so glosses
//! that contain slashes (`/hello/hi/`) are captured whole.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Diagnostic;
use crate::tone;

static LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\S+)\s(\S+)\s\[([^\]]+)\]\s/(.+)/").expect("static CEDICT line pattern")
});

/// One dictionary line. Several entries may share a headword (homographs).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub traditional: String,
    pub simplified: String,
    /// Numeral-tone pinyin as written, with `u:` already rewritten to `ü`.
    pub pinyin_raw: String,
    /// Diacritic pinyin rendered from `pinyin_raw`.
    pub pinyin_pretty: String,
    pub gloss: String,
}

impl DictionaryEntry {
    /// Headword in the requested script.
    pub fn word(&self, script: crate::Script) -> &str {
        match script {
            crate::Script::Simplified => &self.simplified,
            crate::Script::Traditional => &self.traditional,
        }
    }
}

/// True for lines that carry no entry and are skipped without a diagnostic.
pub fn is_blank_or_comment(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with('#')
}

/// Parse one dictionary line.
///
/// Returns `None` for blank lines, comments, and lines that do not match
/// the grammar.
///
/// ```
/// use cedict_core::entry::parse_line;
///
/// let e = parse_line("你好 你好 [ni3 hao3] /hello/hi/").unwrap();
/// assert_eq!(e.pinyin_pretty, "nǐ hǎo");
/// assert_eq!(e.gloss, "hello/hi");
/// assert!(parse_line("# CC-CEDICT").is_none());
/// ```
pub fn parse_line(line: &str) -> Option<DictionaryEntry> {
    parse_line_reporting(line, &mut Vec::new())
}

/// Parse one line, appending tone diagnostics for its pinyin to `diagnostics`.
pub(crate) fn parse_line_reporting(
    line: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<DictionaryEntry> {
    if is_blank_or_comment(line) {
        return None;
    }

    let caps = LINE_RE.captures(line)?;
    let pinyin_raw = caps[3].replace("u:", "ü");
    let (pinyin_pretty, tone_diags) = tone::render_with_diagnostics(&pinyin_raw);
    diagnostics.extend(tone_diags);

    Some(DictionaryEntry {
        traditional: caps[1].to_string(),
        simplified: caps[2].to_string(),
        pinyin_raw,
        pinyin_pretty,
        gloss: caps[4].to_string(),
    })
}
