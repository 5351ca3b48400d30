//! Integration tests for the ukulele engine
//!
//! Exercises the public API end to end: parsing, chord and scale building,
//! diatonic harmony, fretboard projection, widget state and cookie consent.

use std::collections::HashMap;

use ukulele::consent::{ConsentController, ConsentHost, ConsentRecord, ConsentSettings, ScriptKind, ScriptRequest};
use ukulele::widget::{ChordStatus, FretboardWidget};
use ukulele::{
    build_chord, build_scale, diatonic_chords, format, normalize, parse, project,
    AccidentalPreference, ChordKind, DisplayMode, FretRange, PitchClass, ScaleKind,
};

const PREFS: [AccidentalPreference; 2] = [AccidentalPreference::Sharp, AccidentalPreference::Flat];

fn pcs(indices: &[i32]) -> Vec<PitchClass> {
    indices.iter().map(|&i| PitchClass::new(i)).collect()
}

#[test]
fn test_normalize_is_stable_through_format() {
    for letter in ["A", "B", "C", "D", "E", "F", "G", "a", "c", "f"] {
        for accidental in ["", "#", "b", "♯", "♭"] {
            let text = format!("{}{}", letter, accidental);
            let pitch = normalize(&text).unwrap();
            for pref in PREFS {
                assert_eq!(normalize(format(pitch, pref)), Some(pitch), "{} as {:?}", text, pref);
            }
        }
    }
}

#[test]
fn test_every_pitch_class_round_trips() {
    for pitch in PitchClass::all() {
        for pref in PREFS {
            assert_eq!(normalize(format(pitch, pref)), Some(pitch));
        }
    }
}

#[test]
fn test_half_diminished_on_c() {
    let chord = build_chord("C", "m7b5").unwrap();
    assert_eq!(chord.notes, pcs(&[0, 3, 6, 10]));
    assert_eq!(chord.degree_of(PitchClass::new(6)).unwrap().label, "b5");
    assert_eq!(chord.degree_of(PitchClass::new(10)).unwrap().label, "b7");
    assert!(build_chord("H", "m7b5").is_none());
}

#[test]
fn test_a_natural_minor_scale() {
    assert_eq!(
        build_scale("A", ScaleKind::NaturalMinor),
        pcs(&[9, 11, 0, 2, 4, 5, 7])
    );
    assert!(build_scale("", ScaleKind::Major).is_empty());
}

#[test]
fn test_c_major_diatonic_triads() {
    let entries = diatonic_chords("C", ScaleKind::Major, ChordKind::Triad, AccidentalPreference::Sharp);
    assert_eq!(entries.len(), 7);

    assert_eq!(entries[0].degree_label, "1");
    assert_eq!(entries[0].chord.root, PitchClass::C);
    assert_eq!(entries[0].chord.notes, pcs(&[0, 4, 7]));

    assert_eq!(entries[1].degree_label, "2m");
    assert_eq!(entries[1].chord.notes, pcs(&[2, 5, 9]));

    assert_eq!(entries[6].degree_label, "7°");
    assert_eq!(entries[6].chord.notes, pcs(&[11, 2, 5]));
}

#[test]
fn test_parse_properties() {
    let parsed = parse("Cm7b5").unwrap();
    assert_eq!(parsed.chord.root, PitchClass::C);
    assert_eq!(parsed.chord.formula_key, "m7b5");

    assert_eq!(parse("C°").unwrap().chord.formula_key, "dim");
    assert!(parse("H").is_none());
    assert!(parse("").is_none());
    assert!(parse("   ").is_none());
    assert!(parse("Zx").is_none());
}

#[test]
fn test_full_neck_projection_of_c_major() {
    let chord = build_chord("C", "").unwrap();
    let tones = pcs(&[0, 4, 7]);

    let dots = project(Some(&chord), DisplayMode::Dots, AccidentalPreference::Sharp);
    assert_eq!(dots.cells.len(), 4 * 20);
    for cell in &dots.cells {
        assert_eq!(cell.active, tones.contains(&cell.pitch), "{:?}", cell);
        assert_eq!(cell.is_root, cell.pitch == PitchClass::C);
        assert!(!cell.has_label);
    }

    let degrees = project(Some(&chord), DisplayMode::Degrees, AccidentalPreference::Sharp);
    for cell in degrees.active_cells() {
        let expected = match cell.pitch.index() {
            0 => "R",
            4 => "3",
            7 => "5",
            other => panic!("unexpected active pitch {}", other),
        };
        assert_eq!(cell.label, expected);
    }
    assert!(degrees.cells.iter().filter(|c| !c.active).all(|c| c.empty));
}

#[test]
fn test_fret_range_clamping() {
    let range = FretRange::new(-3, 40);
    assert_eq!(range.frets(), 0..=19);
    let range = FretRange::new(10, 2);
    assert_eq!(range.frets(), 10..=10);
}

#[test]
fn test_snapshots_are_lifo() {
    let mut widget = FretboardWidget::default();
    widget.set_chord_text("Am");
    widget.add_snapshot();
    let before = widget.snapshots().to_vec();

    widget.set_chord_text("F");
    assert!(widget.add_snapshot().is_some());
    assert_eq!(widget.snapshots().len(), before.len() + 1);
    assert_eq!(widget.pop_snapshot().unwrap().chord_label, "F");
    assert_eq!(widget.snapshots(), before.as_slice());

    widget.pop_snapshot();
    assert!(widget.pop_snapshot().is_none());
    assert!(widget.snapshots().is_empty());
}

#[test]
fn test_widget_behaviour() {
    let mut widget = FretboardWidget::default();
    widget.set_chord_text("Bb");
    assert_eq!(widget.preference(), AccidentalPreference::Flat);

    widget.set_chord_text("");
    assert!(widget.add_snapshot().is_none());
    assert_eq!(widget.status(), &ChordStatus::Prompt { error: true });
    assert!(widget.status().is_error());

    widget.set_chord_text("Dm7");
    widget.append_suffix("sus4");
    assert_eq!(widget.chord_text(), "Dsus4");
    assert_eq!(widget.current().unwrap().chord.formula_key, "sus4");
}

#[derive(Default)]
struct MemoryHost {
    storage: HashMap<String, String>,
    scripts: Vec<ScriptRequest>,
    warnings: Vec<String>,
}

impl ConsentHost for MemoryHost {
    fn read_storage(&self, key: &str) -> Option<String> {
        self.storage.get(key).cloned()
    }

    fn write_storage(&mut self, key: &str, value: &str) -> Result<(), String> {
        self.storage.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_storage(&mut self, key: &str) {
        self.storage.remove(key);
    }

    fn load_script(&mut self, request: ScriptRequest) {
        self.scripts.push(request);
    }

    fn set_analytics_disabled(&mut self, _measurement_id: &str, _disabled: bool) {}

    fn configure_analytics(&mut self, _measurement_id: &str) {}

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}

#[test]
fn test_consent_record_json() {
    let record = ConsentRecord::new(false, true, "2026-10-14T12:30:00.000Z");
    let json = record.to_json().unwrap();
    assert_eq!(ConsentRecord::from_json(&json).unwrap(), record);
}

#[test]
fn test_consent_scripts() {
    let mut consent = ConsentController::new(MemoryHost::default(), ConsentSettings::default());
    assert!(consent.start().is_none());
    consent.accept_all("2026-10-14T12:30:00.000Z");
    consent.accept_all("2026-10-14T12:31:00.000Z");

    let scripts = &consent.host().scripts;
    assert_eq!(scripts.len(), 1);
    assert_eq!(scripts[0].kind, ScriptKind::Analytics);
    assert!(scripts.iter().all(|s| s.kind != ScriptKind::Ads));
}

#[test]
fn test_consent_survives_reload() {
    let mut consent = ConsentController::new(MemoryHost::default(), ConsentSettings::default());
    consent.save_selected(true, false, "2026-10-14T12:30:00.000Z");
    let host = MemoryHost {
        storage: consent.host().storage.clone(),
        ..MemoryHost::default()
    };

    let mut reloaded = ConsentController::new(host, ConsentSettings::default());
    let record = reloaded.start().unwrap();
    assert!(record.analytics);
    assert!(!record.ads);
    assert!(!reloaded.banner_visible());
}

#[test]
fn test_corrupt_consent_shows_banner() {
    let mut host = MemoryHost::default();
    host.storage.insert(ukulele::consent::STORAGE_KEY.to_string(), "[]".to_string());
    let mut consent = ConsentController::new(host, ConsentSettings::default());
    assert!(consent.start().is_none());
    assert!(consent.banner_visible());
    assert_eq!(consent.host().warnings.len(), 1);
}
