//! # Chord/Scale Builder
//!
//! Expands a root plus a formula into concrete pitch classes.
//!
//! ## Degree Map
//! `Chord::degrees` maps each sounding pitch class to the interval that
//! produced it. When two offsets land on the same pitch class the larger raw
//! offset wins, so in `add9` the note a ninth above the root is labeled `9`
//! rather than `2`.
//!
//! ## Example
//! ```rust
//! use ukulele::chord::build_chord;
//! use ukulele::pitch::AccidentalPreference;
//!
//! let chord = build_chord("D", "m7").unwrap();
//! let names: Vec<_> = chord.notes.iter().map(|p| p.name()).collect();
//! assert_eq!(names, ["D", "F", "A", "C"]);
//! assert_eq!(chord.name(AccidentalPreference::Sharp), "Dm7");
//! ```

use serde::Serialize;
use std::collections::BTreeMap;

use crate::formulas::{interval_label, ScaleKind, CHORD_FORMULAS};
use crate::pitch::{format_note, normalize, stylize, AccidentalPreference, PitchClass};

/// Interval that produced a chord tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DegreeInfo {
    /// Raw semitone offset from the root, not reduced mod 12
    pub offset: i32,
    pub label: &'static str,
}

/// A root plus a resolved chord formula
///
/// # Fields
/// - `root`: Root pitch class
/// - `formula_key`: Quality key from the formula table (`""`, `"m7"`, ...)
/// - `notes`: One pitch class per formula offset, in formula order
/// - `degrees`: Pitch class → interval label, largest offset wins
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chord {
    pub root: PitchClass,
    pub formula_key: &'static str,
    pub notes: Vec<PitchClass>,
    pub degrees: BTreeMap<PitchClass, DegreeInfo>,
}

impl Chord {
    /// Build a chord on a known root. Unknown quality keys give a major triad.
    pub fn new(root: PitchClass, quality_key: &str) -> Self {
        let (formula_key, offsets) = CHORD_FORMULAS
            .iter()
            .find(|(key, _)| *key == quality_key)
            .copied()
            .unwrap_or(CHORD_FORMULAS[0]);

        let notes = offsets.iter().map(|&step| root.transpose(step)).collect();

        let mut ascending = offsets.to_vec();
        ascending.sort_unstable();
        let mut degrees: BTreeMap<PitchClass, DegreeInfo> = BTreeMap::new();
        for step in ascending {
            let pitch = root.transpose(step);
            let replace = degrees
                .get(&pitch)
                .map_or(true, |existing| existing.offset <= step);
            if replace {
                degrees.insert(
                    pitch,
                    DegreeInfo {
                        offset: step,
                        label: interval_label(step),
                    },
                );
            }
        }

        Self {
            root,
            formula_key,
            notes,
            degrees,
        }
    }

    pub fn contains(&self, pitch: PitchClass) -> bool {
        self.notes.contains(&pitch)
    }

    pub fn degree_of(&self, pitch: PitchClass) -> Option<&DegreeInfo> {
        self.degrees.get(&pitch)
    }

    /// Chord tones without repeats, in formula order.
    pub fn unique_notes(&self) -> Vec<PitchClass> {
        let mut seen = Vec::with_capacity(self.notes.len());
        for &pitch in &self.notes {
            if !seen.contains(&pitch) {
                seen.push(pitch);
            }
        }
        seen
    }

    /// Display name such as `B♭Δ7`.
    pub fn name(&self, preference: AccidentalPreference) -> String {
        format!("{}{}", format_note(self.root, preference), stylize(self.formula_key))
    }
}

/// Build a chord from root text and a quality key.
///
/// Returns `None` when the root is not a note name. An unknown quality key
/// falls back to the major triad.
pub fn build_chord(root: &str, quality_key: &str) -> Option<Chord> {
    normalize(root).map(|pitch| Chord::new(pitch, quality_key))
}

/// Scale tones on a known root, in scale-degree order.
pub fn scale_notes(root: PitchClass, scale: ScaleKind) -> Vec<PitchClass> {
    scale.offsets().iter().map(|&step| root.transpose(step)).collect()
}

/// Scale tones for root text, or an empty list when the root is not a note.
///
/// ```
/// use ukulele::chord::build_scale;
/// use ukulele::formulas::ScaleKind;
///
/// let names: Vec<_> = build_scale("A", ScaleKind::NaturalMinor)
///     .iter()
///     .map(|p| p.name())
///     .collect();
/// assert_eq!(names, ["A", "B", "C", "D", "E", "F", "G"]);
/// ```
pub fn build_scale(root: &str, scale: ScaleKind) -> Vec<PitchClass> {
    normalize(root)
        .map(|pitch| scale_notes(pitch, scale))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(notes: &[PitchClass]) -> Vec<&'static str> {
        notes.iter().map(|p| p.name()).collect()
    }

    #[test]
    fn test_half_diminished_degrees() {
        let chord = build_chord("C", "m7b5").unwrap();
        assert_eq!(names(&chord.notes), ["C", "D#", "F#", "A#"]);
        assert_eq!(chord.degree_of(PitchClass::new(6)).unwrap().label, "b5");
        assert_eq!(chord.degree_of(PitchClass::new(10)).unwrap().label, "b7");
        assert_eq!(chord.degree_of(PitchClass::C).unwrap().label, "R");
    }

    #[test]
    fn test_add9_keeps_ninth_label() {
        let chord = build_chord("C", "add9").unwrap();
        assert_eq!(names(&chord.notes), ["C", "E", "G", "D"]);
        let ninth = chord.degree_of(PitchClass::new(2)).unwrap();
        assert_eq!(ninth.offset, 14);
        assert_eq!(ninth.label, "9");
    }

    #[test]
    fn test_unknown_quality_falls_back_to_major() {
        let chord = build_chord("G", "lydian").unwrap();
        assert_eq!(chord.formula_key, "");
        assert_eq!(names(&chord.notes), ["G", "B", "D"]);
    }

    #[test]
    fn test_unknown_root_is_none() {
        assert!(build_chord("H", "m").is_none());
        assert!(build_chord("", "").is_none());
    }

    #[test]
    fn test_notes_wrap_past_b() {
        let chord = build_chord("A", "7").unwrap();
        assert_eq!(names(&chord.notes), ["A", "C#", "E", "G"]);
        assert_eq!(chord.degree_of(PitchClass::G).unwrap().label, "b7");
    }

    #[test]
    fn test_power_chord_has_two_notes() {
        let chord = build_chord("E", "5").unwrap();
        assert_eq!(names(&chord.notes), ["E", "B"]);
        assert_eq!(chord.degrees.len(), 2);
    }

    #[test]
    fn test_chord_name_uses_preference() {
        let chord = build_chord("A#", "maj7").unwrap();
        assert_eq!(chord.name(AccidentalPreference::Flat), "B♭Δ7");
        assert_eq!(chord.name(AccidentalPreference::Sharp), "A#Δ7");
    }

    #[test]
    fn test_unique_notes_keeps_formula_order() {
        let chord = build_chord("F", "9").unwrap();
        assert_eq!(names(&chord.unique_notes()), ["F", "A", "C", "D#", "G"]);
    }

    #[test]
    fn test_build_scale() {
        assert_eq!(
            names(&build_scale("D", ScaleKind::Major)),
            ["D", "E", "F#", "G", "A", "B", "C#"]
        );
        assert_eq!(
            names(&build_scale("A", ScaleKind::HarmonicMinor)),
            ["A", "B", "C", "D", "E", "F", "G#"]
        );
        assert!(build_scale("X", ScaleKind::Major).is_empty());
    }
}
