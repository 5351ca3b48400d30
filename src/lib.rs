//! Chord, scale and fretboard engine for the ukulele learning widgets.
//!
//! The pure music core (pitch spelling, chord formulas, parsing, diatonic
//! harmony and fretboard projection) is independent of any page. The
//! [`widget`] state machines and the [`consent`] controller sit on top of it
//! and are driven by a thin shell such as the wasm bindings.
//!
//! ```
//! use ukulele::{describe_chord, AccidentalPreference};
//!
//! assert_eq!(describe_chord("Bbm7", None).unwrap(), "B♭m7 → Tones: B♭, D♭, F, A♭");
//! assert_eq!(describe_chord("C", Some(AccidentalPreference::Flat)).unwrap(), "C → Tones: C, E, G");
//! ```

pub mod chord;
pub mod chord_parser;
pub mod config;
pub mod consent;
pub mod diatonic;
pub mod error;
pub mod formulas;
pub mod fretboard;
pub mod pitch;
pub mod render;
pub mod widget;

pub use chord::{build_chord, build_scale, Chord};
pub use chord_parser::{parse, resolve_chord, ParsedChord};
pub use config::WidgetConfig;
pub use diatonic::{diatonic_chords, DiatonicEntry};
pub use error::*;
pub use formulas::{ChordKind, ScaleKind};
pub use fretboard::{project, DisplayMode, FretGrid, FretRange, Projection};
pub use pitch::{format, normalize, AccidentalPreference, PitchClass};
pub use render::render_board;

/// One-line summary of a typed chord: its styled name and its tones.
///
/// The typed accidental decides the spelling unless `preference` overrides it.
pub fn describe_chord(
    input: &str,
    preference: Option<AccidentalPreference>,
) -> Result<String, UkuleleError> {
    let parsed = resolve_chord(input)?;
    let preference = preference
        .or(parsed.preference_hint)
        .unwrap_or_default();
    let tones: Vec<String> = parsed
        .chord
        .unique_notes()
        .into_iter()
        .map(|note| pitch::format_note(note, preference))
        .collect();
    Ok(format!(
        "{} → Tones: {}",
        pitch::stylize(&parsed.label),
        tones.join(", ")
    ))
}

/// Draw a typed chord on a fret range.
pub fn chord_board(
    input: &str,
    range: FretRange,
    mode: DisplayMode,
    preference: Option<AccidentalPreference>,
) -> Result<String, UkuleleError> {
    let parsed = resolve_chord(input)?;
    let preference = preference
        .or(parsed.preference_hint)
        .unwrap_or_default();
    let projection = FretGrid::new(range).project(Some(&parsed.chord), mode, preference);
    Ok(render_board(&projection))
}
