//! # Pitch-Class Model
//!
//! Twelve-tone pitch classes, note-name parsing and sharp/flat spelling.
//!
//! ## Key Concepts
//!
//! ### Pitch Class
//! A `PitchClass` is one of the 12 equal-tempered steps, `0 = C` through `11 = B`.
//! It is always reduced mod 12, so the octave is never part of its identity.
//!
//! ### Spelling
//! `AccidentalPreference` only changes how a pitch class is *displayed*
//! (`C#` vs `Db`). Two notes spelled differently are the same pitch class.
//!
//! ### Stylized Text
//! Display strings swap `maj` for `Δ` and `b` for `♭`. Parsing never sees
//! stylized text; `stylize` is applied on the way out only.
//!
//! ## Example
//! ```rust
//! use ukulele::pitch::{format, normalize, AccidentalPreference};
//!
//! let bb = normalize("Bb").unwrap();
//! assert_eq!(bb.index(), 10);
//! assert_eq!(format(bb, AccidentalPreference::Sharp), "A#");
//! assert_eq!(format(bb, AccidentalPreference::Flat), "Bb");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical (sharp) names, indexed by pitch class.
pub const CHROMATIC: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// A chromatic step 0-11
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);
    pub const E: PitchClass = PitchClass(4);
    pub const G: PitchClass = PitchClass(7);
    pub const A: PitchClass = PitchClass(9);

    /// Build a pitch class from any semitone count, reducing it mod 12.
    pub fn new(semitone: i32) -> Self {
        PitchClass(semitone.rem_euclid(12) as u8)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    /// Move up (or down, for negative values) by a number of semitones.
    pub fn transpose(self, semitones: i32) -> Self {
        Self::new(self.0 as i32 + semitones)
    }

    /// Canonical sharp name from [`CHROMATIC`].
    pub fn name(self) -> &'static str {
        CHROMATIC[self.0 as usize]
    }

    /// All twelve pitch classes in chromatic order.
    pub fn all() -> impl Iterator<Item = PitchClass> {
        (0..12).map(PitchClass)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sharp or flat spelling for accidentals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccidentalPreference {
    #[default]
    Sharp,
    Flat,
}

impl AccidentalPreference {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "sharp" => Some(Self::Sharp),
            "flat" => Some(Self::Flat),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sharp => "sharp",
            Self::Flat => "flat",
        }
    }
}

fn letter_semitone(letter: char) -> Option<i32> {
    match letter.to_ascii_uppercase() {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Parse a note name into a pitch class.
///
/// Accepts a letter A-G in either case, optionally followed by one
/// accidental: `#`/`♯` raise, `b`/`B`/`♭` lower. Anything after that is
/// ignored, so `"C#m7"` yields C#. Returns `None` when the text does not
/// start with a note letter.
///
/// # Examples
/// ```
/// use ukulele::pitch::normalize;
///
/// assert_eq!(normalize("c").map(|p| p.index()), Some(0));
/// assert_eq!(normalize("E♭").map(|p| p.index()), Some(3));
/// assert_eq!(normalize("Cb").map(|p| p.index()), Some(11));
/// assert_eq!(normalize("H"), None);
/// ```
pub fn normalize(note: &str) -> Option<PitchClass> {
    let mut chars = note.trim().chars();
    let base = letter_semitone(chars.next()?)?;
    let accidental = match chars.next() {
        Some('#') | Some('♯') => 1,
        Some('b') | Some('B') | Some('♭') => -1,
        _ => 0,
    };
    Some(PitchClass::new(base + accidental))
}

/// Plain spelling of a pitch class, e.g. `"A#"` or `"Bb"`.
pub fn format(pitch: PitchClass, preference: AccidentalPreference) -> &'static str {
    match preference {
        AccidentalPreference::Sharp => CHROMATIC[pitch.index() as usize],
        AccidentalPreference::Flat => FLAT_NAMES[pitch.index() as usize],
    }
}

/// Display spelling of a pitch class, e.g. `"B♭"`.
pub fn format_note(pitch: PitchClass, preference: AccidentalPreference) -> String {
    stylize(format(pitch, preference))
}

/// Display transform: `maj` becomes `Δ`, every `b` becomes `♭`.
///
/// ```
/// use ukulele::pitch::stylize;
///
/// assert_eq!(stylize("Cmaj7"), "CΔ7");
/// assert_eq!(stylize("Bbm7b5"), "B♭m7♭5");
/// ```
pub fn stylize(text: &str) -> String {
    text.replace("maj", "Δ").replace('b', "♭")
}

/// Reduce note text to the value a helper button carries (`C`, `C#`, `Db`).
pub fn canonical_button_note(note: &str) -> String {
    let trimmed = note.trim();
    let mut chars = trimmed.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let letter = first.to_uppercase().to_string();
    match chars.next() {
        Some('#') | Some('♯') => format!("{}#", letter),
        Some('b') | Some('B') | Some('♭') => format!("{}b", letter),
        _ => letter,
    }
}

/// Flat spelling for keys typed with a flat, sharp otherwise.
pub fn guess_preference(key: &str) -> AccidentalPreference {
    if key.contains('b') || key.contains('♭') {
        AccidentalPreference::Flat
    } else {
        AccidentalPreference::Sharp
    }
}

/// One column of the note helper buttons: a natural with its accidentals.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NoteButtonRow {
    pub natural: &'static str,
    pub accidentals: &'static [&'static str],
}

pub const NOTE_LAYOUT: [NoteButtonRow; 7] = [
    NoteButtonRow { natural: "C", accidentals: &["C#", "Db"] },
    NoteButtonRow { natural: "D", accidentals: &["D#", "Eb"] },
    NoteButtonRow { natural: "E", accidentals: &[] },
    NoteButtonRow { natural: "F", accidentals: &["F#", "Gb"] },
    NoteButtonRow { natural: "G", accidentals: &["G#", "Ab"] },
    NoteButtonRow { natural: "A", accidentals: &["A#", "Bb"] },
    NoteButtonRow { natural: "B", accidentals: &[] },
];
