//! Numeral-tone pinyin to diacritic rendering.
//!
//! `ni3 hao3` becomes `nǐ hǎo`. Each space-separated syllable ends in a tone
//! digit; tone 5 is neutral and carries no mark. The mark goes on the first
//! vowel, except when that vowel is a medial (i, u, ü) directly followed by
//! another vowel, in which case the nucleus after it is marked instead.
//!
//! Bad syllables never abort rendering. They come back undecorated and are
//! reported as [`Diagnostic::InvalidToneNumber`].

use crate::error::Diagnostic;

/// Tone 1-4 variants per base vowel.
const TONE_MARKS: &[(char, [char; 4])] = &[
    ('a', ['ā', 'á', 'ǎ', 'à']),
    ('e', ['ē', 'é', 'ě', 'è']),
    ('u', ['ū', 'ú', 'ǔ', 'ù']),
    ('i', ['ī', 'í', 'ǐ', 'ì']),
    ('o', ['ō', 'ó', 'ǒ', 'ò']),
    ('ü', ['ǖ', 'ǘ', 'ǚ', 'ǜ']),
    ('A', ['Ā', 'Á', 'Ǎ', 'À']),
    ('E', ['Ē', 'É', 'Ě', 'È']),
    ('U', ['Ū', 'Ú', 'Ǔ', 'Ù']),
    ('I', ['Ī', 'Í', 'Ǐ', 'Ì']),
    ('O', ['Ō', 'Ó', 'Ǒ', 'Ò']),
    ('Ü', ['Ǖ', 'Ǘ', 'Ǚ', 'Ǜ']),
];

fn marks_for(ch: char) -> Option<&'static [char; 4]> {
    TONE_MARKS
        .iter()
        .find(|(base, _)| *base == ch)
        .map(|(_, marks)| marks)
}

fn is_vowel(ch: char) -> bool {
    marks_for(ch).is_some()
}

fn is_medial(ch: char) -> bool {
    matches!(ch, 'i' | 'u' | 'ü' | 'I' | 'U' | 'Ü')
}

/// Render a space-separated numeral-tone syllable sequence with diacritics.
///
/// Diagnostics are logged and discarded; use
/// [`render_with_diagnostics`] to collect them.
///
/// ```
/// use cedict_core::tone::render;
///
/// assert_eq!(render("ni3 hao3"), "nǐ hǎo");
/// assert_eq!(render("liu2"), "liú");
/// assert_eq!(render("ma5"), "ma");
/// ```
pub fn render(syllables: &str) -> String {
    render_with_diagnostics(syllables).0
}

/// Like [`render`], also returning one diagnostic per malformed syllable.
pub fn render_with_diagnostics(syllables: &str) -> (String, Vec<Diagnostic>) {
    let normalized: String = syllables
        .chars()
        .map(|ch| match ch {
            'v' => 'ü',
            'V' => 'Ü',
            other => other,
        })
        .collect();

    let mut diagnostics = Vec::new();
    let rendered: Vec<String> = normalized
        .split(' ')
        .map(|syllable| match render_syllable(syllable) {
            Ok(s) => s,
            Err((s, diag)) => {
                diagnostics.push(diag);
                s
            }
        })
        .collect();

    (rendered.join(" "), diagnostics)
}

/// Render one syllable. On error the best-effort text rides along with the
/// diagnostic.
fn render_syllable(syllable: &str) -> Result<String, (String, Diagnostic)> {
    if syllable.is_empty() {
        return Ok(String::new());
    }

    let mut chars: Vec<char> = syllable.chars().collect();
    let last = chars[chars.len() - 1];
    let Some(tone) = last.to_digit(10) else {
        tracing::debug!(syllable, "syllable has no tone number");
        return Err((
            syllable.to_string(),
            Diagnostic::InvalidToneNumber {
                syllable: syllable.to_string(),
                tone: None,
            },
        ));
    };
    chars.pop();

    if !(1..=5).contains(&tone) {
        tracing::warn!(syllable, tone, "invalid tone number");
        return Err((
            chars.into_iter().collect(),
            Diagnostic::InvalidToneNumber {
                syllable: syllable.to_string(),
                tone: Some(last),
            },
        ));
    }

    if tone == 5 {
        return Ok(chars.into_iter().collect());
    }

    // Syllabic nasals (m2, ng4, hm5) have no vowel to mark.
    if let Some(first) = chars.iter().position(|&c| is_vowel(c)) {
        let target = match chars.get(first + 1) {
            Some(&next) if is_medial(chars[first]) && is_vowel(next) => first + 1,
            _ => first,
        };
        if let Some(marks) = marks_for(chars[target]) {
            chars[target] = marks[tone as usize - 1];
        }
    }

    Ok(chars.into_iter().collect())
}
