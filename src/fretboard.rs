//! # Fretboard Projection
//!
//! Maps a chord onto the ukulele neck and says, cell by cell, what to draw.
//!
//! ## Layout
//! ```text
//!           fret: 0   1   2   3  ...  19
//! string 0 (A):   A   A#  B   C
//! string 1 (E):   E   F   F#  G
//! string 2 (C):   C   C#  D   D#
//! string 3 (G):   G   G#  A   A#
//! ```
//! Strings are listed top to bottom as the widget draws them (first string
//! first). A cell's pitch class is the open string transposed by its fret.
//!
//! ## Rendering
//! [`FretGrid`] is built once per fret range. [`FretGrid::project`] is pure:
//! calling it again with a different chord, mode or spelling yields a fresh
//! [`Projection`] and leaves the grid untouched. The projection carries the
//! visual state (`active`, `is_root`) and the label text; drawing it is left
//! to the caller (DOM, terminal, tests).

use serde::{Deserialize, Serialize};

use crate::chord::Chord;
use crate::pitch::{format_note, stylize, AccidentalPreference, PitchClass};

/// Highest fret on the board.
pub const TOTAL_FRETS: u8 = 19;

/// An open string of the instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpenString {
    pub label: &'static str,
    pub open: PitchClass,
}

/// Standard re-entrant tuning, first string first.
pub const STRINGS: [OpenString; 4] = [
    OpenString { label: "A", open: PitchClass::A },
    OpenString { label: "E", open: PitchClass::E },
    OpenString { label: "C", open: PitchClass::C },
    OpenString { label: "G", open: PitchClass::G },
];

/// What an active cell shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    /// Visual state only, no text
    #[default]
    Dots,
    /// Interval label (R, 3, ♭7, ...) on chord tones
    Degrees,
    /// Note name on every cell
    NoteNames,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [DisplayMode::Dots, DisplayMode::Degrees, DisplayMode::NoteNames];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "dots" => Some(Self::Dots),
            "degrees" => Some(Self::Degrees),
            "note-names" => Some(Self::NoteNames),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dots => "dots",
            Self::Degrees => "degrees",
            Self::NoteNames => "note-names",
        }
    }
}

/// Inclusive fret range, always within `0..=TOTAL_FRETS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FretRange {
    start: u8,
    end: u8,
}

impl FretRange {
    /// Clamp both bounds onto the board. `end` is raised to `start` if needed.
    ///
    /// ```
    /// use ukulele::fretboard::FretRange;
    ///
    /// let range = FretRange::new(-3, 40);
    /// assert_eq!((range.start(), range.end()), (0, 19));
    /// let range = FretRange::new(10, 2);
    /// assert_eq!((range.start(), range.end()), (10, 10));
    /// ```
    pub fn new(start: i32, end: i32) -> Self {
        let max = TOTAL_FRETS as i32;
        let start = start.clamp(0, max);
        let end = end.clamp(start, max);
        Self {
            start: start as u8,
            end: end as u8,
        }
    }

    /// The whole neck, 0 through 19.
    pub fn full() -> Self {
        Self {
            start: 0,
            end: TOTAL_FRETS,
        }
    }

    pub fn start(&self) -> u8 {
        self.start
    }

    pub fn end(&self) -> u8 {
        self.end
    }

    /// Number of frets covered, never zero.
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    pub fn frets(&self) -> std::ops::RangeInclusive<u8> {
        self.start..=self.end
    }
}

impl Default for FretRange {
    fn default() -> Self {
        Self::full()
    }
}

/// One position on the neck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FretCell {
    pub string_index: usize,
    pub fret: u8,
    pub pitch: PitchClass,
}

/// Render instructions for one cell
///
/// # Fields
/// - `active`: The cell's pitch class is a chord tone
/// - `is_root`: Active and equal to the chord root
/// - `label`: Text to show (may be empty)
/// - `has_label`: `label` is non-empty
/// - `empty`: Neither active nor labeled
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRender {
    pub string_index: usize,
    pub string_label: &'static str,
    pub fret: u8,
    pub pitch: PitchClass,
    pub active: bool,
    pub is_root: bool,
    pub label: String,
    pub has_label: bool,
    pub empty: bool,
}

/// The static grid for a fret range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FretGrid {
    range: FretRange,
    cells: Vec<FretCell>,
}

impl FretGrid {
    pub fn new(range: FretRange) -> Self {
        let cells = STRINGS
            .iter()
            .enumerate()
            .flat_map(|(string_index, string)| {
                range.frets().map(move |fret| FretCell {
                    string_index,
                    fret,
                    pitch: string.open.transpose(fret as i32),
                })
            })
            .collect();
        Self { range, cells }
    }

    pub fn range(&self) -> FretRange {
        self.range
    }

    /// Cells string by string, frets ascending.
    pub fn cells(&self) -> &[FretCell] {
        &self.cells
    }

    /// Fret numbers for the header row.
    pub fn frets(&self) -> Vec<u8> {
        self.range.frets().collect()
    }

    /// Decide what every cell shows for `chord` (or no chord).
    pub fn project(
        &self,
        chord: Option<&Chord>,
        mode: DisplayMode,
        preference: AccidentalPreference,
    ) -> Projection {
        let cells = self
            .cells
            .iter()
            .map(|cell| render_cell(cell, chord, mode, preference))
            .collect();
        Projection {
            range: self.range,
            cells,
        }
    }
}

fn render_cell(
    cell: &FretCell,
    chord: Option<&Chord>,
    mode: DisplayMode,
    preference: AccidentalPreference,
) -> CellRender {
    let active = chord.is_some_and(|c| c.contains(cell.pitch));
    let is_root = active && chord.is_some_and(|c| c.root == cell.pitch);

    let label = match (active, mode) {
        (_, DisplayMode::NoteNames) => format_note(cell.pitch, preference),
        (true, DisplayMode::Degrees) => chord
            .and_then(|c| c.degree_of(cell.pitch))
            .map(|degree| stylize(degree.label))
            .unwrap_or_default(),
        _ => String::new(),
    };

    let has_label = !label.is_empty();
    CellRender {
        string_index: cell.string_index,
        string_label: STRINGS[cell.string_index].label,
        fret: cell.fret,
        pitch: cell.pitch,
        active,
        is_root,
        label,
        has_label,
        empty: !active && !has_label,
    }
}

/// Render instructions for a whole grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Projection {
    pub range: FretRange,
    pub cells: Vec<CellRender>,
}

impl Projection {
    /// Cells grouped per string, in string order.
    pub fn rows(&self) -> impl Iterator<Item = (&OpenString, &[CellRender])> {
        STRINGS.iter().zip(self.cells.chunks(self.range.len()))
    }

    pub fn cell(&self, string_index: usize, fret: u8) -> Option<&CellRender> {
        if !self.range.frets().contains(&fret) {
            return None;
        }
        let offset = (fret - self.range.start()) as usize;
        self.cells.get(string_index * self.range.len() + offset)
    }

    pub fn active_cells(&self) -> impl Iterator<Item = &CellRender> {
        self.cells.iter().filter(|cell| cell.active)
    }
}

/// Project onto the full neck without keeping the grid around.
pub fn project(
    chord: Option<&Chord>,
    mode: DisplayMode,
    preference: AccidentalPreference,
) -> Projection {
    FretGrid::new(FretRange::full()).project(chord, mode, preference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::build_chord;

    #[test]
    fn test_grid_shape() {
        let grid = FretGrid::new(FretRange::full());
        assert_eq!(grid.cells().len(), 4 * 20);
        assert_eq!(grid.frets().first(), Some(&0));
        assert_eq!(grid.frets().last(), Some(&19));

        let first = grid.cells()[0];
        assert_eq!((first.string_index, first.fret, first.pitch), (0, 0, PitchClass::A));
        // A string, 3rd fret is C
        assert_eq!(grid.cells()[3].pitch, PitchClass::C);
        // Second row starts at open E
        assert_eq!(grid.cells()[20].pitch, PitchClass::E);
    }

    #[test]
    fn test_partial_range_pitches() {
        let grid = FretGrid::new(FretRange::new(5, 7));
        assert_eq!(grid.cells().len(), 12);
        let pitches: Vec<_> = grid.cells()[..3].iter().map(|c| c.pitch.name()).collect();
        assert_eq!(pitches, ["D", "D#", "E"]);
        assert_eq!(grid.cells()[9].fret, 5);
        assert_eq!(grid.cells()[9].pitch, PitchClass::C);
    }

    #[test]
    fn test_dots_mode_marks_chord_tones() {
        let chord = build_chord("C", "").unwrap();
        let projection = project(Some(&chord), DisplayMode::Dots, AccidentalPreference::Sharp);
        let tones = [PitchClass::C, PitchClass::E, PitchClass::G];

        for cell in &projection.cells {
            assert_eq!(cell.active, tones.contains(&cell.pitch));
            assert_eq!(cell.is_root, cell.pitch == PitchClass::C);
            assert!(cell.label.is_empty());
            assert_eq!(cell.empty, !cell.active);
        }
        assert!(projection.active_cells().count() > 0);
    }

    #[test]
    fn test_degrees_mode_labels() {
        let chord = build_chord("C", "").unwrap();
        let projection = project(Some(&chord), DisplayMode::Degrees, AccidentalPreference::Sharp);
        for cell in &projection.cells {
            let expected = match cell.pitch.index() {
                0 => "R",
                4 => "3",
                7 => "5",
                _ => "",
            };
            assert_eq!(cell.label, expected);
            assert_eq!(cell.has_label, !expected.is_empty());
        }
    }

    #[test]
    fn test_degree_labels_are_stylized() {
        let chord = build_chord("G", "7").unwrap();
        let projection = project(Some(&chord), DisplayMode::Degrees, AccidentalPreference::Sharp);
        // C string, 5th fret is F, the minor seventh of G
        let cell = projection.cell(2, 5).unwrap();
        assert_eq!(cell.pitch.name(), "F");
        assert_eq!(cell.label, "♭7");
    }

    #[test]
    fn test_note_names_label_every_cell() {
        let chord = build_chord("A#", "").unwrap();
        let projection = project(Some(&chord), DisplayMode::NoteNames, AccidentalPreference::Flat);
        assert!(projection.cells.iter().all(|c| c.has_label && !c.empty));
        let open_a_sharp = projection.cell(0, 1).unwrap();
        assert_eq!(open_a_sharp.label, "B♭");
        assert!(open_a_sharp.is_root);
        let off_chord = projection.cell(0, 2).unwrap();
        assert_eq!(off_chord.label, "B");
        assert!(!off_chord.active);
    }

    #[test]
    fn test_no_chord_is_inactive() {
        let projection = project(None, DisplayMode::Degrees, AccidentalPreference::Sharp);
        assert!(projection.cells.iter().all(|c| !c.active && !c.is_root && c.empty));

        let names = project(None, DisplayMode::NoteNames, AccidentalPreference::Sharp);
        assert!(names.cells.iter().all(|c| !c.active && c.has_label));
    }

    #[test]
    fn test_projection_is_repeatable() {
        let grid = FretGrid::new(FretRange::new(0, 4));
        let before = grid.clone();
        let chord = build_chord("F", "m").unwrap();
        let first = grid.project(Some(&chord), DisplayMode::Degrees, AccidentalPreference::Flat);
        grid.project(None, DisplayMode::NoteNames, AccidentalPreference::Sharp);
        let again = grid.project(Some(&chord), DisplayMode::Degrees, AccidentalPreference::Flat);
        assert_eq!(first, again);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_rows_and_cell_lookup() {
        let projection = FretGrid::new(FretRange::new(2, 4)).project(None, DisplayMode::Dots, AccidentalPreference::Sharp);
        let labels: Vec<_> = projection.rows().map(|(s, cells)| (s.label, cells.len())).collect();
        assert_eq!(labels, [("A", 3), ("E", 3), ("C", 3), ("G", 3)]);
        assert!(projection.cell(0, 1).is_none());
        assert!(projection.cell(4, 2).is_none());
        assert_eq!(projection.cell(3, 4).unwrap().pitch.name(), "B");
    }

    #[test]
    fn test_fret_range_clamps() {
        assert_eq!(FretRange::new(-3, 40), FretRange::full());
        let collapsed = FretRange::new(25, 3);
        assert_eq!((collapsed.start(), collapsed.end()), (19, 19));
        assert_eq!(collapsed.len(), 1);
    }

    #[test]
    fn test_display_mode_keys() {
        for mode in DisplayMode::ALL {
            assert_eq!(DisplayMode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(DisplayMode::from_str("stars"), None);
    }
}
