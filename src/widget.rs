//! # Widget State
//!
//! Per-instance state behind the two page widgets. A presentation shell
//! forwards user actions to these structs and draws what they report back;
//! nothing in here touches a DOM.
//!
//! - [`FretboardWidget`] - chord text entry, helper buttons, snapshots
//! - [`DiatonicWidget`] - key/scale/chord-kind selection and one board per degree
//!
//! Each action replaces the affected piece of state wholesale and refreshes
//! the derived values (current chord, status, entries) before returning.

use serde::Serialize;

use crate::chord_parser::{resolve_chord, split_root, ParsedChord};
use crate::config::WidgetConfig;
use crate::diatonic::{diatonic_chords, DiatonicEntry};
use crate::error::UkuleleError;
use crate::formulas::{ChordKind, ScaleKind};
use crate::fretboard::{DisplayMode, FretGrid, FretRange, Projection};
use crate::pitch::{canonical_button_note, format_note, guess_preference, stylize, AccidentalPreference};

/// What the status line of the fretboard widget says
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ChordStatus {
    /// Nothing to show yet. `error` is set when an action needed a chord.
    Prompt { error: bool },
    /// Input that did not parse, as typed
    Invalid { input: String },
    /// A recognized chord and its distinct tones
    Chord { label: String, tones: Vec<String> },
}

impl ChordStatus {
    pub fn is_error(&self) -> bool {
        match self {
            Self::Prompt { error } => *error,
            Self::Invalid { .. } => true,
            Self::Chord { .. } => false,
        }
    }

    /// English status text.
    pub fn message(&self) -> String {
        match self {
            Self::Prompt { .. } => UkuleleError::EmptyInput.to_string(),
            Self::Invalid { input } => UkuleleError::UnrecognizedChord(stylize(input)).to_string(),
            Self::Chord { label, tones } => format!("{} → Tones: {}", label, tones.join(", ")),
        }
    }
}

/// A saved chord, drawn with the spelling it was saved with
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub chord: ParsedChord,
    pub chord_label: String,
    pub preference: AccidentalPreference,
}

/// State of the interactive fretboard
#[derive(Debug, Clone)]
pub struct FretboardWidget {
    chord_text: String,
    display_mode: DisplayMode,
    preference: AccidentalPreference,
    current: Option<ParsedChord>,
    status: ChordStatus,
    selected_root: String,
    selected_suffix: String,
    qualities: Vec<String>,
    snapshots: Vec<Snapshot>,
    grid: FretGrid,
}

impl FretboardWidget {
    pub fn new(config: &WidgetConfig) -> Self {
        let mut widget = Self {
            chord_text: String::new(),
            display_mode: config.display_mode,
            preference: config.preference,
            current: None,
            status: ChordStatus::Prompt { error: false },
            selected_root: String::new(),
            selected_suffix: String::new(),
            qualities: config.qualities.clone(),
            snapshots: Vec::new(),
            grid: FretGrid::new(config.fret_range.unwrap_or_default()),
        };
        widget.set_chord_text(&config.chord);
        widget
    }

    /// Replace the typed chord text and re-sync the button selection from it.
    pub fn set_chord_text(&mut self, text: &str) {
        self.apply_text(text);
        self.sync_selection();
    }

    /// A note button was pressed: start a new chord on that root.
    pub fn press_note(&mut self, note: &str) {
        if note.contains('b') {
            self.preference = AccidentalPreference::Flat;
        } else if note.contains('#') {
            self.preference = AccidentalPreference::Sharp;
        }
        self.selected_root = canonical_button_note(note);
        self.selected_suffix = String::new();
        self.apply_text(note);
    }

    /// A quality button was pressed: swap the suffix after the current root.
    pub fn append_suffix(&mut self, suffix: &str) {
        let current = self.chord_text.trim();
        let next = if current.is_empty() {
            if suffix.is_empty() {
                return;
            }
            suffix.to_string()
        } else {
            match split_root(current) {
                Some((root, _)) => format!("{}{}", root, suffix),
                None => suffix.to_string(),
            }
        };
        self.selected_suffix = suffix.to_string();
        self.apply_text(&next);
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }

    pub fn set_preference(&mut self, preference: AccidentalPreference) {
        self.preference = preference;
        self.refresh_status();
    }

    /// Save the current chord. Without one, the status turns into an error
    /// prompt and nothing is saved.
    pub fn add_snapshot(&mut self) -> Option<&Snapshot> {
        let Some(chord) = self.current.clone() else {
            self.status = ChordStatus::Prompt { error: true };
            return None;
        };
        let label = stylize(&self.chord_text);
        let label = match label.trim() {
            "" => "—".to_string(),
            trimmed => trimmed.to_string(),
        };
        self.snapshots.push(Snapshot {
            chord,
            chord_label: label,
            preference: self.preference,
        });
        self.snapshots.last()
    }

    /// Drop the newest snapshot. Empty lists are left alone.
    pub fn pop_snapshot(&mut self) -> Option<Snapshot> {
        self.snapshots.pop()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn chord_text(&self) -> &str {
        &self.chord_text
    }

    /// Stylized chord text for the big display, or a dash when blank.
    pub fn chord_display(&self) -> String {
        let styled = stylize(&self.chord_text);
        if styled.is_empty() {
            "—".to_string()
        } else {
            styled
        }
    }

    pub fn current(&self) -> Option<&ParsedChord> {
        self.current.as_ref()
    }

    pub fn status(&self) -> &ChordStatus {
        &self.status
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn preference(&self) -> AccidentalPreference {
        self.preference
    }

    pub fn qualities(&self) -> &[String] {
        &self.qualities
    }

    pub fn frets(&self) -> Vec<u8> {
        self.grid.frets()
    }

    pub fn is_note_selected(&self, button_note: &str) -> bool {
        !self.selected_root.is_empty() && canonical_button_note(button_note) == self.selected_root
    }

    pub fn is_suffix_selected(&self, suffix: &str) -> bool {
        suffix == self.selected_suffix
    }

    /// The main board for the current chord.
    pub fn projection(&self) -> Projection {
        self.grid.project(
            self.current.as_ref().map(|p| &p.chord),
            self.display_mode,
            self.preference,
        )
    }

    /// A saved board, in the current display mode but its own spelling.
    pub fn snapshot_projection(&self, index: usize) -> Option<Projection> {
        self.snapshots.get(index).map(|snapshot| {
            self.grid
                .project(Some(&snapshot.chord.chord), self.display_mode, snapshot.preference)
        })
    }

    fn apply_text(&mut self, text: &str) {
        self.chord_text = text.to_string();
        match resolve_chord(text) {
            Ok(parsed) => {
                if let Some(hint) = parsed.preference_hint {
                    self.preference = hint;
                }
                self.current = Some(parsed);
                self.refresh_status();
            }
            Err(UkuleleError::EmptyInput) => {
                self.current = None;
                self.status = ChordStatus::Prompt { error: false };
            }
            Err(_) => {
                self.current = None;
                self.status = ChordStatus::Invalid {
                    input: text.to_string(),
                };
            }
        }
    }

    fn refresh_status(&mut self) {
        if let Some(parsed) = &self.current {
            self.status = ChordStatus::Chord {
                label: stylize(&parsed.label),
                tones: parsed
                    .chord
                    .unique_notes()
                    .into_iter()
                    .map(|note| format_note(note, self.preference))
                    .collect(),
            };
        }
    }

    fn sync_selection(&mut self) {
        match split_root(self.chord_text.trim()) {
            Some((root, suffix)) => {
                self.selected_root = canonical_button_note(root);
                self.selected_suffix = suffix.trim().to_string();
            }
            None => {
                self.selected_root = String::new();
                self.selected_suffix = String::new();
            }
        }
    }
}

impl Default for FretboardWidget {
    fn default() -> Self {
        Self::new(&WidgetConfig::default())
    }
}

/// Status-line facts for the diatonic widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiatonicStatus {
    pub key_label: String,
    pub scale: ScaleKind,
    pub chord_kind: ChordKind,
    pub fret_start: u8,
    pub fret_end: u8,
}

impl DiatonicStatus {
    /// English status text, e.g. `B♭ Major / Triads (3 notes) / Frets 0–3`.
    pub fn message(&self) -> String {
        let scale = match self.scale {
            ScaleKind::Major => "Major",
            ScaleKind::NaturalMinor => "Natural minor",
            ScaleKind::HarmonicMinor => "Harmonic minor",
            ScaleKind::MelodicMinor => "Melodic minor",
        };
        let kind = match self.chord_kind {
            ChordKind::Triad => "Triads (3 notes)",
            ChordKind::Seventh => "7th chords (4 notes)",
        };
        format!(
            "{} {} / {} / Frets {}–{}",
            self.key_label, scale, kind, self.fret_start, self.fret_end
        )
    }
}

/// State of the diatonic chord explorer
#[derive(Debug, Clone)]
pub struct DiatonicWidget {
    key: String,
    scale: ScaleKind,
    chord_kind: ChordKind,
    display_mode: DisplayMode,
    preference: AccidentalPreference,
    grid: FretGrid,
    entries: Vec<DiatonicEntry>,
}

impl DiatonicWidget {
    /// First four frets unless the config says otherwise.
    pub const DEFAULT_RANGE: (i32, i32) = (0, 3);

    pub fn new(config: &WidgetConfig) -> Self {
        let range = config
            .fret_range
            .unwrap_or_else(|| FretRange::new(Self::DEFAULT_RANGE.0, Self::DEFAULT_RANGE.1));
        let mut widget = Self {
            key: config.key.clone(),
            scale: config.scale,
            chord_kind: config.chord_kind,
            display_mode: config.display_mode,
            preference: guess_preference(&config.key),
            grid: FretGrid::new(range),
            entries: Vec::new(),
        };
        widget.refresh();
        widget
    }

    pub fn select_key(&mut self, note: &str) {
        self.key = note.trim().to_string();
        self.refresh();
    }

    pub fn set_scale(&mut self, scale: ScaleKind) {
        self.scale = scale;
        self.refresh();
    }

    /// Select a scale by key; unknown keys select major.
    pub fn set_scale_key(&mut self, key: &str) {
        self.set_scale(ScaleKind::from_key_or_default(key));
    }

    pub fn set_chord_kind(&mut self, kind: ChordKind) {
        self.chord_kind = kind;
        self.refresh();
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }

    /// Change the visible frets. The grid is only rebuilt for a new range.
    pub fn set_range(&mut self, start: i32, end: i32) {
        let range = FretRange::new(start, end);
        if range != self.grid.range() {
            self.grid = FretGrid::new(range);
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_key_selected(&self, note: &str) -> bool {
        note == self.key
    }

    pub fn range(&self) -> FretRange {
        self.grid.range()
    }

    pub fn frets(&self) -> Vec<u8> {
        self.grid.frets()
    }

    pub fn preference(&self) -> AccidentalPreference {
        self.preference
    }

    pub fn entries(&self) -> &[DiatonicEntry] {
        &self.entries
    }

    pub fn status(&self) -> DiatonicStatus {
        let key_label = crate::pitch::normalize(&self.key)
            .map(|pitch| format_note(pitch, self.preference))
            .unwrap_or_default();
        DiatonicStatus {
            key_label,
            scale: self.scale,
            chord_kind: self.chord_kind,
            fret_start: self.grid.range().start(),
            fret_end: self.grid.range().end(),
        }
    }

    /// One board per diatonic chord, in degree order.
    pub fn boards(&self) -> Vec<(&DiatonicEntry, Projection)> {
        self.entries
            .iter()
            .map(|entry| {
                let board = self
                    .grid
                    .project(Some(&entry.chord), self.display_mode, self.preference);
                (entry, board)
            })
            .collect()
    }

    fn refresh(&mut self) {
        self.preference = guess_preference(&self.key);
        self.entries = diatonic_chords(&self.key, self.scale, self.chord_kind, self.preference);
    }
}

impl Default for DiatonicWidget {
    fn default() -> Self {
        Self::new(&WidgetConfig::default())
    }
}
