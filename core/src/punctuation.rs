//! Fixed set of Chinese punctuation marks.
//!
//! These scalars are always "recognized" by the segmenter even though the
//! dictionary carries no entry for them, so they close a run of unknown
//! text and are emitted as standalone tokens.

/// Full-width and typographic punctuation treated as recognized text.
pub const CHINESE_PUNCTUATION: [char; 23] = [
    '·', '×', '—', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '…', // inline marks
    '、', '。', '《', '》', '『', '』', '【', '】', // CJK symbols
    '！', '（', '）', '，', '：', '；', '？', // full-width forms
];

/// Check if a scalar belongs to the fixed punctuation set.
pub fn is_punctuation(ch: char) -> bool {
    CHINESE_PUNCTUATION.contains(&ch)
}
