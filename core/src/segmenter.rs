//! Longest-match segmentation over a [`DictionaryIndex`].
//!
//! One forward pass over the scalars of the input. At each cursor:
//!
//! 1. Probe: take the two scalars at the cursor, fetch every headword that
//!    starts with them from both tries, and keep the longest one that
//!    literally matches the input at the cursor. Traditional candidates are
//!    scanned first and the first candidate of a given length wins.
//! 2. Otherwise emit a single scalar if it is whitespace, fixed
//!    punctuation, or a dictionary headword on its own.
//! 3. Otherwise emit the run of unknown scalars up to the next whitespace or
//!    recognized scalar.
//!
//! The cursor advances on every iteration, so the pass always terminates,
//! and the emitted token texts concatenate back to the input exactly
//! (carriage returns are dropped before scanning).
//!
//! Offsets and columns count UTF-16 code units, which is what editor hosts
//! index their buffers by. Lines and columns start at 1.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::entry::DictionaryEntry;
use crate::index::{DictionaryIndex, Script};
use crate::punctuation::is_punctuation;
use crate::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// UTF-16 code units from the start of the input.
    pub offset: usize,
    pub line: usize,
    /// UTF-16 code units from the start of the line, plus one.
    pub column: usize,
}

impl Position {
    fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    fn advance(&mut self, word: &str) {
        let units: usize = word.chars().map(char::len_utf16).sum();
        self.offset += units;
        self.line += word.chars().filter(|&c| c == '\n').count();
        match word.rfind('\n') {
            Some(nl) => {
                let tail: usize = word[nl + 1..].chars().map(char::len_utf16).sum();
                self.column = tail + 1;
            }
            None => self.column += units,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

/// Reading and meaning of one dictionary entry attached to a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMatch {
    pub pinyin_raw: String,
    pub pinyin_pretty: String,
    pub gloss: String,
}

impl From<&DictionaryEntry> for TokenMatch {
    fn from(e: &DictionaryEntry) -> Self {
        Self {
            pinyin_raw: e.pinyin_raw.clone(),
            pinyin_pretty: e.pinyin_pretty.clone(),
            gloss: e.gloss.clone(),
        }
    }
}

/// A slice of the input with its resolved dictionary forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub traditional: String,
    pub simplified: String,
    /// Where `text` starts, captured before the cursor moved past it.
    pub position: Position,
    pub matches: Vec<TokenMatch>,
}

impl Token {
    /// True if the token is a single whitespace scalar.
    pub fn is_whitespace(&self) -> bool {
        let mut chars = self.text.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if is_whitespace(c))
    }

    /// True if the token is a single fixed punctuation scalar.
    pub fn is_punctuation(&self) -> bool {
        let mut chars = self.text.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if is_punctuation(c))
    }

    /// True if at least one dictionary entry resolved for the token.
    pub fn is_known(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// Per-call script bias.
///
/// Each script's counter grows when a word is found in that script only, or
/// when the multi-character probe picks a candidate from that script's trie.
/// A word present in both scripts resolves to the script with the lower
/// counter, balancing text that mixes orthographies; equal counters keep
/// both entry lists, simplified first, with shared entries listed once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptPreference {
    pub simplified: u32,
    pub traditional: u32,
}

impl ScriptPreference {
    pub fn bump(&mut self, script: Script) {
        match script {
            Script::Simplified => self.simplified += 1,
            Script::Traditional => self.traditional += 1,
        }
    }

    /// Pick the entries a word resolves to and reinforce a script seen alone.
    pub fn resolve<'a>(
        &mut self,
        simplified: Vec<&'a DictionaryEntry>,
        traditional: Vec<&'a DictionaryEntry>,
    ) -> Vec<&'a DictionaryEntry> {
        match (simplified.is_empty(), traditional.is_empty()) {
            (true, true) => Vec::new(),
            (true, false) => {
                self.bump(Script::Traditional);
                traditional
            }
            (false, true) => {
                self.bump(Script::Simplified);
                simplified
            }
            (false, false) => {
                if self.simplified < self.traditional {
                    simplified
                } else if self.traditional < self.simplified {
                    traditional
                } else {
                    // An entry whose forms coincide sits in both lists.
                    let mut both = simplified;
                    for e in traditional {
                        if !both.iter().any(|b| std::ptr::eq(*b, e)) {
                            both.push(e);
                        }
                    }
                    both
                }
            }
        }
    }
}

/// Whitespace as editors see it: byte order mark included, NEL excluded.
fn is_whitespace(ch: char) -> bool {
    (ch.is_whitespace() && ch != '\u{0085}') || ch == '\u{FEFF}'
}

/// Scalars that must stand alone as their own token.
fn is_boundary(ch: char) -> bool {
    is_whitespace(ch) || is_punctuation(ch)
}

struct Run<'a> {
    index: &'a DictionaryIndex,
    position: Position,
    preference: ScriptPreference,
    tokens: Vec<Token>,
}

impl<'a> Run<'a> {
    fn new(index: &'a DictionaryIndex) -> Self {
        Self {
            index,
            position: Position::start(),
            preference: ScriptPreference::default(),
            tokens: Vec::new(),
        }
    }

    fn is_recognized(&self, ch: char) -> bool {
        if is_punctuation(ch) {
            return true;
        }
        let mut buf = [0u8; 4];
        self.index.contains_word(ch.encode_utf8(&mut buf))
    }

    /// Longest headword of two or more scalars at `start`, with the script
    /// whose candidate list produced it.
    fn probe(&self, chars: &[char], start: usize) -> Option<(usize, Script)> {
        if chars.len() - start < 2 {
            return None;
        }
        let window: String = chars[start..start + 2].iter().collect();

        let mut best: Option<(usize, Script)> = None;
        for script in [Script::Traditional, Script::Simplified] {
            for entry in self.index.lookup_with_prefix(&window, script) {
                let form = entry.word(script);
                let len = form.chars().count();
                if best.is_some_and(|(best_len, _)| len <= best_len) {
                    continue;
                }
                let Some(input) = chars.get(start..start + len) else {
                    continue;
                };
                if form.chars().eq(input.iter().copied()) && !input.iter().any(|&c| is_boundary(c))
                {
                    best = Some((len, script));
                }
            }
        }
        best
    }

    fn emit(&mut self, word: String) {
        let simplified = self.index.lookup(&word, Script::Simplified);
        let traditional = self.index.lookup(&word, Script::Traditional);
        let entries = self.preference.resolve(simplified, traditional);

        let (trad, simp) = match entries.first() {
            Some(e) => (e.traditional.clone(), e.simplified.clone()),
            None => (word.clone(), word.clone()),
        };
        let position = self.position;
        self.position.advance(&word);

        tracing::trace!(
            text = %word,
            offset = position.offset,
            matches = entries.len(),
            "token"
        );
        self.tokens.push(Token {
            text: word,
            traditional: trad,
            simplified: simp,
            position,
            matches: entries.into_iter().map(TokenMatch::from).collect(),
        });
    }
}

/// Segment `text` into dictionary-backed tokens.
///
/// ```
/// use cedict_core::{tokenize, DictionaryIndex};
///
/// let index = DictionaryIndex::build("你好 你好 [ni3 hao3] /hello/");
/// let tokens = tokenize("你好!", &index);
/// assert_eq!(tokens[0].text, "你好");
/// assert_eq!(tokens[0].matches[0].pinyin_pretty, "nǐ hǎo");
/// assert_eq!(tokens[1].text, "!");
/// ```
pub fn tokenize(text: &str, index: &DictionaryIndex) -> Vec<Token> {
    let chars: Vec<char> = text.chars().filter(|&c| c != '\r').collect();
    let mut run = Run::new(index);

    let mut i = 0;
    while i < chars.len() {
        if let Some((len, script)) = run.probe(&chars, i) {
            run.emit(chars[i..i + len].iter().collect());
            run.preference.bump(script);
            i += len;
            continue;
        }

        let ch = chars[i];
        if is_whitespace(ch) || run.is_recognized(ch) {
            run.emit(ch.to_string());
            i += 1;
            continue;
        }

        let mut end = i + 1;
        while end < chars.len() && !is_whitespace(chars[end]) && !run.is_recognized(chars[end]) {
            end += 1;
        }
        run.emit(chars[i..end].iter().collect());
        i = end;
    }

    run.tokens
}

/// Segmenter bound to a shared index.
///
/// Cloning is cheap; every clone reads the same immutable index and each
/// call keeps its own counters.
#[derive(Debug, Clone)]
pub struct Segmenter {
    index: Arc<DictionaryIndex>,
    keep_punctuation: bool,
}

impl Segmenter {
    pub fn new(index: Arc<DictionaryIndex>) -> Self {
        Self {
            index,
            keep_punctuation: false,
        }
    }

    pub fn with_config(index: Arc<DictionaryIndex>, config: &Config) -> Self {
        Self {
            index,
            keep_punctuation: config.keep_punctuation,
        }
    }

    pub fn index(&self) -> &DictionaryIndex {
        &self.index
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        tokenize(text, &self.index)
    }

    /// Token texts worth offering as completions.
    pub fn words(&self, text: &str) -> Vec<String> {
        crate::completion::completion_words(&self.tokenize(text), self.keep_punctuation)
    }
}
