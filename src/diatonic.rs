//! # Diatonic Harmony
//!
//! One chord per scale degree, named both by chord symbol (`Dm`) and by
//! Nashville-style degree (`2m`, `♭3`, `7°`).
//!
//! Degree numbers are always measured against the major scale, so the third
//! degree of natural minor reads `♭3`.

use serde::Serialize;

use crate::chord::{scale_notes, Chord};
use crate::formulas::{ChordKind, ScaleKind, MAJOR_STEPS};
use crate::pitch::{format_note, normalize, stylize, AccidentalPreference};

/// A chord built on one scale degree
///
/// # Fields
/// - `degree`: 1-7
/// - `degree_label`: Nashville label with quality glyph, e.g. `♭3m`
/// - `chord`: The chord itself
/// - `chord_label`: Formatted chord name, e.g. `E♭`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiatonicEntry {
    pub degree: usize,
    pub degree_label: String,
    pub chord: Chord,
    pub chord_label: String,
}

/// Degree number relative to the major scale.
///
/// Exact matches come first, then a flat of a major step, then a sharp.
/// Steps that match nothing come back as the bare semitone number.
pub fn degree_number_label(semitone: i32) -> String {
    let normalized = semitone.rem_euclid(12);
    if let Some(i) = MAJOR_STEPS.iter().position(|&s| s == normalized) {
        return format!("{}", i + 1);
    }
    if let Some(i) = MAJOR_STEPS.iter().position(|&s| (s + 11) % 12 == normalized) {
        return format!("♭{}", i + 1);
    }
    if let Some(i) = MAJOR_STEPS.iter().position(|&s| (s + 1) % 12 == normalized) {
        return format!("#{}", i + 1);
    }
    format!("{}", normalized)
}

/// Glyph appended to a degree number for a quality key.
pub fn quality_glyph(key: &str) -> &str {
    match key {
        "m" => "m",
        "dim" | "m7b5" => "°",
        "dim7" => "°7",
        "aug" => "+",
        "augmaj7" => "+Δ",
        "mmaj7" => "mΔ",
        "maj7" => "Δ7",
        other => other,
    }
}

/// Every diatonic chord of a key, in degree order.
///
/// Returns an empty list when `key` is not a note name.
///
/// # Example
/// ```
/// use ukulele::diatonic::diatonic_chords;
/// use ukulele::formulas::{ChordKind, ScaleKind};
/// use ukulele::pitch::AccidentalPreference;
///
/// let entries = diatonic_chords("C", ScaleKind::Major, ChordKind::Triad, AccidentalPreference::Sharp);
/// let labels: Vec<_> = entries.iter().map(|e| e.degree_label.as_str()).collect();
/// assert_eq!(labels, ["1", "2m", "3m", "4", "5", "6m", "7°"]);
/// assert_eq!(entries[1].chord_label, "Dm");
/// ```
pub fn diatonic_chords(
    key: &str,
    scale: ScaleKind,
    kind: ChordKind,
    preference: AccidentalPreference,
) -> Vec<DiatonicEntry> {
    let Some(root) = normalize(key) else {
        return Vec::new();
    };
    let pattern = scale.pattern(kind);
    let steps = scale.offsets();

    scale_notes(root, scale)
        .into_iter()
        .enumerate()
        .map(|(idx, note)| {
            let quality = pattern[idx];
            DiatonicEntry {
                degree: idx + 1,
                degree_label: format!("{}{}", degree_number_label(steps[idx]), quality_glyph(quality)),
                chord: Chord::new(note, quality),
                chord_label: format!("{}{}", format_note(note, preference), stylize(quality)),
            }
        })
        .collect()
}
