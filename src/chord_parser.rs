//! Chord symbol parsing
//!
//! Turns free text such as `"Bbm7"`, `"CΔ7"` or `"F#° (bar 3)"` into a
//! [`ParsedChord`]. Only the first whitespace-delimited token is read.

use serde::Serialize;

use crate::chord::Chord;
use crate::error::UkuleleError;
use crate::formulas::{resolve_alias, CHORD_FORMULAS};
use crate::pitch::{normalize, AccidentalPreference};

/// A chord recognized from user input
///
/// # Fields
/// - `chord`: The built chord
/// - `label`: The token as typed, e.g. `"Bbm7"`
/// - `suffix`: Quality text as typed, e.g. `"m7"`
/// - `preference_hint`: Spelling implied by the typed accidental, if any
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedChord {
    pub chord: Chord,
    pub label: String,
    pub suffix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preference_hint: Option<AccidentalPreference>,
}

/// Rewrite quality text into table spelling: symbols become words and the
/// result is lowercased.
///
/// ```
/// use ukulele::chord_parser::normalize_quality;
///
/// assert_eq!(normalize_quality("Δ7"), "maj7");
/// assert_eq!(normalize_quality("ø"), "m7b5");
/// assert_eq!(normalize_quality("°"), "dim");
/// assert_eq!(normalize_quality("+"), "aug");
/// ```
pub fn normalize_quality(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .replace(['Δ', '∆'], "maj")
        .replace('+', "aug")
        .replace('ø', "m7b5")
        .replace('°', "dim")
        .to_lowercase()
}

fn quality_key(text: &str) -> Option<&'static str> {
    resolve_alias(text).or_else(|| {
        CHORD_FORMULAS
            .iter()
            .map(|(key, _)| *key)
            .find(|key| *key == text)
    })
}

/// Resolve typed quality text to a formula key.
///
/// The symbol-normalized text is tried first. Synonyms that contain a symbol
/// themselves (`ø7`) are matched against the lowercased raw text afterwards.
pub fn resolve_quality(raw: &str) -> Option<&'static str> {
    quality_key(&normalize_quality(raw)).or_else(|| {
        let plain: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        resolve_alias(&plain.to_lowercase())
    })
}

/// Parse a chord symbol.
///
/// Grammar of the first token: `letter [accidental] [quality]`, where the
/// letter is A-G in either case and the accidental is one of `#` `♯` `b` `♭`.
/// Returns `None` for blank input, an unknown root letter or a quality that
/// resolves to nothing.
///
/// # Examples
/// ```
/// use ukulele::chord_parser::parse;
/// use ukulele::pitch::AccidentalPreference;
///
/// let parsed = parse("Bbm7").unwrap();
/// assert_eq!(parsed.chord.root.index(), 10);
/// assert_eq!(parsed.chord.formula_key, "m7");
/// assert_eq!(parsed.preference_hint, Some(AccidentalPreference::Flat));
///
/// assert_eq!(parse("C°").unwrap().chord.formula_key, "dim");
/// assert!(parse("H").is_none());
/// assert!(parse("   ").is_none());
/// ```
pub fn parse(input: &str) -> Option<ParsedChord> {
    let token = input.split_whitespace().next()?;
    let (root_text, suffix) = split_root(token)?;
    let root = normalize(root_text)?;
    let quality = resolve_quality(suffix)?;

    Some(ParsedChord {
        chord: Chord::new(root, quality),
        label: token.to_string(),
        suffix: suffix.to_string(),
        preference_hint: accidental_hint(root_text),
    })
}

/// Split `text` after its root: a letter A-G plus an optional `#` `♯` `b` `♭`.
///
/// ```
/// use ukulele::chord_parser::split_root;
///
/// assert_eq!(split_root("Bbm7"), Some(("Bb", "m7")));
/// assert_eq!(split_root("C♯"), Some(("C♯", "")));
/// assert_eq!(split_root("xm"), None);
/// ```
pub fn split_root(text: &str) -> Option<(&str, &str)> {
    let mut chars = text.char_indices();
    let (_, letter) = chars.next()?;
    if !matches!(letter.to_ascii_uppercase(), 'A'..='G') {
        return None;
    }
    let end = match chars.next() {
        Some((idx, c)) if matches!(c, '#' | '♯' | 'b' | '♭') => idx + c.len_utf8(),
        _ => letter.len_utf8(),
    };
    Some(text.split_at(end))
}

fn accidental_hint(root_text: &str) -> Option<AccidentalPreference> {
    match root_text.chars().nth(1) {
        Some('#') | Some('♯') => Some(AccidentalPreference::Sharp),
        Some('b') | Some('♭') => Some(AccidentalPreference::Flat),
        _ => None,
    }
}

/// [`parse`] with the failure reason spelled out.
///
/// Blank input is `EmptyInput`, so callers can show a prompt instead of an
/// error. Anything else that fails is `UnrecognizedChord`.
pub fn resolve_chord(input: &str) -> Result<ParsedChord, UkuleleError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UkuleleError::EmptyInput);
    }
    parse(trimmed).ok_or_else(|| UkuleleError::UnrecognizedChord(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::PitchClass;

    fn key(input: &str) -> Option<&'static str> {
        parse(input).map(|p| p.chord.formula_key)
    }

    #[test]
    fn test_chord_parsing() {
        let parsed = parse("Cm7b5").unwrap();
        assert_eq!(parsed.chord.root, PitchClass::C);
        assert_eq!(parsed.chord.formula_key, "m7b5");
        assert_eq!(parsed.label, "Cm7b5");
        assert_eq!(parsed.suffix, "m7b5");
        assert_eq!(parsed.preference_hint, None);

        assert_eq!(key("C"), Some(""));
        assert_eq!(key("Cmaj"), Some(""));
        assert_eq!(key("Cm"), Some("m"));
        assert_eq!(key("Cmin"), Some("m"));
        assert_eq!(key("C-"), Some("m"));
        assert_eq!(key("G7"), Some("7"));
        assert_eq!(key("Dmin7"), Some("m7"));
        assert_eq!(key("Ema7"), Some("maj7"));
        assert_eq!(key("Fsus2"), Some("sus2"));
        assert_eq!(key("A5"), Some("5"));
        assert_eq!(key("Cadd9"), Some("add9"));
        assert_eq!(key("Co7"), Some("dim7"));
        assert_eq!(key("Cmmaj7"), Some("mmaj7"));
    }

    #[test]
    fn test_symbol_normalization() {
        assert_eq!(key("C°"), Some("dim"));
        assert_eq!(key("C°7"), Some("dim7"));
        assert_eq!(key("C+"), Some("aug"));
        assert_eq!(key("CΔ7"), Some("maj7"));
        assert_eq!(key("C∆7"), Some("maj7"));
        assert_eq!(key("Cø"), Some("m7b5"));
        assert_eq!(key("Cø7"), Some("m7b5"));
        assert_eq!(key("CmΔ7"), Some("mmaj7"));
        assert_eq!(key("C+Δ7"), Some("augmaj7"));
    }

    #[test]
    fn test_quality_is_lowercased() {
        assert_eq!(key("CMAJ7"), Some("maj7"));
        // Matches the widgets: uppercase M reads as minor once lowercased
        assert_eq!(key("CM7"), Some("m7"));
    }

    #[test]
    fn test_accidentals_and_hints() {
        let sharp = parse("F#m").unwrap();
        assert_eq!(sharp.chord.root, PitchClass::new(6));
        assert_eq!(sharp.preference_hint, Some(AccidentalPreference::Sharp));

        let flat = parse("E♭7").unwrap();
        assert_eq!(flat.chord.root, PitchClass::new(3));
        assert_eq!(flat.preference_hint, Some(AccidentalPreference::Flat));

        let lower = parse("bb").unwrap();
        assert_eq!(lower.chord.root, PitchClass::new(10));
        assert_eq!(lower.chord.formula_key, "");

        let sharp_symbol = parse("C♯").unwrap();
        assert_eq!(sharp_symbol.chord.root, PitchClass::new(1));
        assert_eq!(sharp_symbol.suffix, "");
    }

    #[test]
    fn test_split_root() {
        assert_eq!(split_root("F#m7"), Some(("F#", "m7")));
        assert_eq!(split_root("e♭"), Some(("e♭", "")));
        assert_eq!(split_root("Dsus4"), Some(("D", "sus4")));
        assert_eq!(split_root(""), None);
        assert_eq!(split_root("Hm"), None);
    }

    #[test]
    fn test_only_first_token_is_read() {
        let parsed = parse("  Am7 / G  ").unwrap();
        assert_eq!(parsed.label, "Am7");
        assert_eq!(parsed.chord.formula_key, "m7");
    }

    #[test]
    fn test_failures() {
        assert!(parse("").is_none());
        assert!(parse("   ").is_none());
        assert!(parse("H").is_none());
        assert!(parse("Zx").is_none());
        assert!(parse("#C").is_none());
        assert!(parse("Cxyz").is_none());
        assert!(parse("Cm13").is_none());
    }

    #[test]
    fn test_resolve_chord_distinguishes_empty() {
        assert_eq!(resolve_chord("  "), Err(UkuleleError::EmptyInput));
        assert_eq!(
            resolve_chord(" Zx "),
            Err(UkuleleError::UnrecognizedChord("Zx".to_string()))
        );
        assert_eq!(resolve_chord("Dm").unwrap().chord.formula_key, "m");
    }
}
