//! # Formula Tables
//!
//! Static interval data: chord qualities, scales, the diatonic quality
//! patterns and degree labels. Everything in here is a constant.
//!
//! Chord offsets are semitones above the root. They may go past 11 to keep
//! an explicit octave for labeling (`add9` uses 14), and are reduced mod 12
//! only when turned into pitch classes.
//!
//! There is one table for every widget. Each widget exposes a subset of it
//! through [`FRETBOARD_QUALITIES`] or [`DIATONIC_QUALITIES`].

use serde::{Deserialize, Serialize};

use crate::pitch::stylize;

/// Chord quality key → semitone offsets, in formula order.
pub const CHORD_FORMULAS: &[(&str, &[i32])] = &[
    ("", &[0, 4, 7]),
    ("maj", &[0, 4, 7]),
    ("m", &[0, 3, 7]),
    ("dim", &[0, 3, 6]),
    ("aug", &[0, 4, 8]),
    ("maj7", &[0, 4, 7, 11]),
    ("m7", &[0, 3, 7, 10]),
    ("7", &[0, 4, 7, 10]),
    ("m7b5", &[0, 3, 6, 10]),
    ("mmaj7", &[0, 3, 7, 11]),
    ("augmaj7", &[0, 4, 8, 11]),
    ("6", &[0, 4, 7, 9]),
    ("m6", &[0, 3, 7, 9]),
    ("dim7", &[0, 3, 6, 9]),
    ("sus2", &[0, 2, 7]),
    ("sus4", &[0, 5, 7]),
    ("5", &[0, 7]),
    ("add9", &[0, 4, 7, 14]),
    ("9", &[0, 4, 7, 10, 14]),
];

/// Synonyms accepted by the chord parser, all lowercase.
/// Keys missing from this table accept only themselves.
pub const QUALITY_ALIASES: &[(&str, &[&str])] = &[
    ("", &["", "maj"]),
    ("m", &["m", "min", "-"]),
    ("m7", &["m7", "min7"]),
    ("maj7", &["maj7", "ma7"]),
    ("dim", &["dim", "o"]),
    ("dim7", &["dim7", "o7"]),
    ("aug", &["aug", "+"]),
    ("m7b5", &["m7b5", "ø7"]),
];

/// Suffix buttons on the fretboard widget, in display order.
pub const FRETBOARD_QUALITIES: &[&str] = &[
    "", "m", "m7", "mmaj7", "maj7", "7", "6", "m6", "dim", "dim7", "aug", "sus2", "sus4", "5",
    "add9", "9", "m7b5",
];

/// Qualities the diatonic explorer can produce.
pub const DIATONIC_QUALITIES: &[&str] = &[
    "", "maj", "m", "dim", "aug", "maj7", "m7", "7", "m7b5", "mmaj7", "augmaj7",
];

/// Steps of the major scale, used to name degrees of every other scale.
pub const MAJOR_STEPS: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

const INTERVAL_LABELS: [&str; 15] = [
    "R", "b2", "2", "b3", "3", "4", "b5", "5", "#5", "6", "b7", "7", "R", "b9", "9",
];

/// Offsets for a quality key, if the key is known.
pub fn chord_formula(key: &str) -> Option<&'static [i32]> {
    CHORD_FORMULAS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, offsets)| *offsets)
}

pub fn is_quality(key: &str) -> bool {
    chord_formula(key).is_some()
}

/// Quality key for an accepted synonym.
pub fn resolve_alias(text: &str) -> Option<&'static str> {
    QUALITY_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.contains(&text))
        .map(|(key, _)| *key)
}

/// Degree label for a raw offset. Offsets past the table wrap to their
/// pitch-class label.
///
/// ```
/// use ukulele::formulas::interval_label;
///
/// assert_eq!(interval_label(10), "b7");
/// assert_eq!(interval_label(14), "9");
/// assert_eq!(interval_label(17), "4");
/// ```
pub fn interval_label(offset: i32) -> &'static str {
    match usize::try_from(offset) {
        Ok(i) if i < INTERVAL_LABELS.len() => INTERVAL_LABELS[i],
        _ => INTERVAL_LABELS[offset.rem_euclid(12) as usize],
    }
}

/// Text on a quality button. The plain major triad shows as `M`.
pub fn quality_button_label(key: &str) -> String {
    if key.is_empty() {
        "M".to_string()
    } else {
        stylize(key)
    }
}

/// Scale types for the diatonic explorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleKind {
    #[default]
    Major,
    NaturalMinor,
    HarmonicMinor,
    MelodicMinor,
}

impl ScaleKind {
    pub const ALL: [ScaleKind; 4] = [
        ScaleKind::Major,
        ScaleKind::NaturalMinor,
        ScaleKind::HarmonicMinor,
        ScaleKind::MelodicMinor,
    ];

    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            "major" => Some(Self::Major),
            "naturalMinor" => Some(Self::NaturalMinor),
            "harmonicMinor" => Some(Self::HarmonicMinor),
            "melodicMinor" => Some(Self::MelodicMinor),
            _ => None,
        }
    }

    /// Like [`ScaleKind::from_key`], falling back to major.
    pub fn from_key_or_default(key: &str) -> Self {
        Self::from_key(key).unwrap_or_default()
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::NaturalMinor => "naturalMinor",
            Self::HarmonicMinor => "harmonicMinor",
            Self::MelodicMinor => "melodicMinor",
        }
    }

    pub fn offsets(self) -> &'static [i32; 7] {
        match self {
            Self::Major => &MAJOR_STEPS,
            Self::NaturalMinor => &[0, 2, 3, 5, 7, 8, 10],
            Self::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
            Self::MelodicMinor => &[0, 2, 3, 5, 7, 9, 11],
        }
    }

    /// Quality key for each scale degree.
    pub fn pattern(self, kind: ChordKind) -> &'static [&'static str; 7] {
        match (self, kind) {
            (Self::Major, ChordKind::Triad) => &["", "m", "m", "", "", "m", "dim"],
            (Self::Major, ChordKind::Seventh) => &["maj7", "m7", "m7", "maj7", "7", "m7", "m7b5"],
            (Self::NaturalMinor, ChordKind::Triad) => &["m", "dim", "", "m", "m", "", ""],
            (Self::NaturalMinor, ChordKind::Seventh) => {
                &["m7", "m7b5", "maj7", "m7", "m7", "maj7", "7"]
            }
            (Self::HarmonicMinor, ChordKind::Triad) => &["m", "dim", "aug", "m", "", "", "dim"],
            (Self::HarmonicMinor, ChordKind::Seventh) => {
                &["mmaj7", "m7b5", "augmaj7", "m7", "7", "maj7", "dim7"]
            }
            (Self::MelodicMinor, ChordKind::Triad) => &["m", "m", "aug", "", "", "dim", "dim"],
            (Self::MelodicMinor, ChordKind::Seventh) => {
                &["mmaj7", "7", "augmaj7", "7", "7", "m7b5", "m7b5"]
            }
        }
    }
}

/// Three-note or four-note diatonic chords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordKind {
    #[default]
    Triad,
    Seventh,
}

impl ChordKind {
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            "triad" => Some(Self::Triad),
            "seventh" => Some(Self::Seventh),
            _ => None,
        }
    }

    /// Anything other than `seventh` is a triad.
    pub fn from_key_or_default(key: &str) -> Self {
        Self::from_key(key).unwrap_or_default()
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Triad => "triad",
            Self::Seventh => "seventh",
        }
    }
}
