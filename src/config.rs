//! # Widget Configuration
//!
//! YAML settings for a widget instance. Every field is optional:
//!
//! ```yaml
//! display-mode: degrees     # dots | degrees | note-names
//! accidental: flat          # sharp | flat
//! fret-start: 0
//! fret-end: 7
//! qualities: ["", m, "7"]   # suffix buttons on the fretboard widget
//! chord: Am                 # initial fretboard chord
//! key: Bb                   # initial diatonic key
//! scale: naturalMinor       # major | naturalMinor | harmonicMinor | melodicMinor
//! chord-kind: seventh       # triad | seventh
//! ```
//!
//! Enumerated values are checked and reported as `ConfigError`. Fret bounds
//! are clamped onto the neck instead.

use serde::Deserialize;
use std::path::Path;

use crate::error::UkuleleError;
use crate::formulas::{is_quality, ChordKind, ScaleKind, FRETBOARD_QUALITIES};
use crate::fretboard::{DisplayMode, FretRange};
use crate::pitch::{normalize, AccidentalPreference};

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
pub struct RawConfig {
    pub display_mode: Option<String>,
    pub accidental: Option<String>,
    pub fret_start: Option<i32>,
    pub fret_end: Option<i32>,
    pub qualities: Option<Vec<String>>,
    pub chord: Option<String>,
    pub key: Option<String>,
    pub scale: Option<String>,
    pub chord_kind: Option<String>,
}

/// Validated widget settings
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    pub display_mode: DisplayMode,
    pub preference: AccidentalPreference,
    /// `None` lets each widget use its own default range
    pub fret_range: Option<FretRange>,
    pub qualities: Vec<String>,
    pub chord: String,
    pub key: String,
    pub scale: ScaleKind,
    pub chord_kind: ChordKind,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            display_mode: DisplayMode::default(),
            preference: AccidentalPreference::default(),
            fret_range: None,
            qualities: FRETBOARD_QUALITIES.iter().map(|q| q.to_string()).collect(),
            chord: "C".to_string(),
            key: "C".to_string(),
            scale: ScaleKind::default(),
            chord_kind: ChordKind::default(),
        }
    }
}

impl WidgetConfig {
    pub fn from_yaml(content: &str) -> Result<Self, UkuleleError> {
        let raw: Option<RawConfig> =
            serde_yaml::from_str(content).map_err(|e| UkuleleError::ConfigError(e.to_string()))?;
        Self::from_raw(raw.unwrap_or_default())
    }

    pub fn load(path: &Path) -> Result<Self, UkuleleError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            UkuleleError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_raw(raw: RawConfig) -> Result<Self, UkuleleError> {
        let defaults = Self::default();

        let display_mode = match &raw.display_mode {
            Some(mode) => DisplayMode::from_str(mode).ok_or_else(|| {
                UkuleleError::ConfigError(format!("unknown display mode: {}", mode))
            })?,
            None => defaults.display_mode,
        };

        let preference = match &raw.accidental {
            Some(acc) => AccidentalPreference::from_str(acc).ok_or_else(|| {
                UkuleleError::ConfigError(format!("unknown accidental preference: {}", acc))
            })?,
            None => defaults.preference,
        };

        let fret_range = match (raw.fret_start, raw.fret_end) {
            (None, None) => None,
            (start, end) => Some(FretRange::new(
                start.unwrap_or(0),
                end.unwrap_or(crate::fretboard::TOTAL_FRETS as i32),
            )),
        };

        let qualities = match raw.qualities {
            Some(list) => {
                if let Some(bad) = list.iter().find(|q| !is_quality(q)) {
                    return Err(UkuleleError::ConfigError(format!("unknown chord quality: {}", bad)));
                }
                list
            }
            None => defaults.qualities,
        };

        let key = match raw.key {
            Some(key) => {
                if normalize(&key).is_none() {
                    return Err(UkuleleError::ConfigError(format!("invalid key: {}", key)));
                }
                key.trim().to_string()
            }
            None => defaults.key,
        };

        let scale = match &raw.scale {
            Some(scale) => ScaleKind::from_key(scale)
                .ok_or_else(|| UkuleleError::ConfigError(format!("unknown scale: {}", scale)))?,
            None => defaults.scale,
        };

        let chord_kind = match &raw.chord_kind {
            Some(kind) => ChordKind::from_key(kind)
                .ok_or_else(|| UkuleleError::ConfigError(format!("unknown chord kind: {}", kind)))?,
            None => defaults.chord_kind,
        };

        Ok(Self {
            display_mode,
            preference,
            fret_range,
            qualities,
            chord: raw.chord.unwrap_or(defaults.chord),
            key,
            scale,
            chord_kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(WidgetConfig::from_yaml("").unwrap(), WidgetConfig::default());
        assert_eq!(WidgetConfig::from_yaml("{}").unwrap(), WidgetConfig::default());
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
display-mode: note-names
accidental: flat
fret-start: 2
fret-end: 9
qualities: ["", m, "7"]
chord: Gm7
key: Eb
scale: harmonicMinor
chord-kind: seventh
"#;
        let config = WidgetConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.display_mode, DisplayMode::NoteNames);
        assert_eq!(config.preference, AccidentalPreference::Flat);
        assert_eq!(config.fret_range, Some(FretRange::new(2, 9)));
        assert_eq!(config.qualities, ["", "m", "7"]);
        assert_eq!(config.chord, "Gm7");
        assert_eq!(config.key, "Eb");
        assert_eq!(config.scale, ScaleKind::HarmonicMinor);
        assert_eq!(config.chord_kind, ChordKind::Seventh);
    }

    #[test]
    fn test_fret_bounds_are_clamped() {
        let config = WidgetConfig::from_yaml("fret-start: -4\nfret-end: 99\n").unwrap();
        assert_eq!(config.fret_range, Some(FretRange::full()));

        let config = WidgetConfig::from_yaml("fret-end: 5\n").unwrap();
        assert_eq!(config.fret_range, Some(FretRange::new(0, 5)));
    }

    #[test]
    fn test_invalid_values() {
        for yaml in [
            "display-mode: stars",
            "accidental: natural",
            "scale: lydian",
            "chord-kind: ninth",
            "key: H",
            "qualities: [m, m13]",
        ] {
            match WidgetConfig::from_yaml(yaml) {
                Err(UkuleleError::ConfigError(_)) => {}
                other => panic!("expected config error for {:?}, got {:?}", yaml, other),
            }
        }
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(matches!(
            WidgetConfig::from_yaml("fret-start: [1, 2"),
            Err(UkuleleError::ConfigError(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "display-mode: degrees").unwrap();
        writeln!(file, "chord: F").unwrap();
        let config = WidgetConfig::load(file.path()).unwrap();
        assert_eq!(config.display_mode, DisplayMode::Degrees);
        assert_eq!(config.chord, "F");
    }

    #[test]
    fn test_load_missing_file() {
        let result = WidgetConfig::load(Path::new("/nonexistent/ukulele.yaml"));
        assert!(matches!(result, Err(UkuleleError::ConfigError(_))));
    }
}
