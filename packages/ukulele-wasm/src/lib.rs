use serde::Serialize;
use wasm_bindgen::prelude::*;

use ukulele::consent::{
    BannerView, ConsentController, ConsentHost, ConsentSettings, ScriptKind, ScriptRequest,
};
use ukulele::formulas::quality_button_label;
use ukulele::pitch::NOTE_LAYOUT;
use ukulele::widget::{DiatonicWidget, FretboardWidget};
use ukulele::{
    diatonic_chords, project, resolve_chord, AccidentalPreference, ChordKind, DiatonicEntry,
    DisplayMode, Projection, ScaleKind, UkuleleError, WidgetConfig,
};

#[wasm_bindgen(module = "/js/host.js")]
extern "C" {
    #[wasm_bindgen(js_name = readStorage)]
    fn host_read_storage(key: &str) -> Option<String>;

    #[wasm_bindgen(js_name = writeStorage, catch)]
    fn host_write_storage(key: &str, value: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(js_name = removeStorage)]
    fn host_remove_storage(key: &str);

    #[wasm_bindgen(js_name = loadScript)]
    fn host_load_script(
        src: &str,
        is_async: bool,
        crossorigin: Option<String>,
        measurement_id: Option<String>,
    );

    #[wasm_bindgen(js_name = setAnalyticsDisabled)]
    fn host_set_analytics_disabled(measurement_id: &str, disabled: bool);

    #[wasm_bindgen(js_name = gtagConfig)]
    fn host_gtag_config(measurement_id: &str);

    #[wasm_bindgen(js_name = nowIso)]
    fn now_iso() -> String;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    fn console_warn(message: &str);
}

#[derive(Serialize)]
struct BindingError {
    kind: &'static str,
    message: String,
}

fn to_binding_error(e: UkuleleError) -> BindingError {
    let kind = match &e {
        UkuleleError::UnknownNote(_) => "unknownNote",
        UkuleleError::UnrecognizedChord(_) => "unrecognizedChord",
        UkuleleError::EmptyInput => "emptyInput",
        UkuleleError::ConfigError(_) => "config",
        UkuleleError::ConsentError(_) => "consent",
    };
    BindingError {
        kind,
        message: e.to_string(),
    }
}

fn js_error(e: UkuleleError) -> JsValue {
    let fallback = e.to_string();
    let payload = serde_json::to_string(&to_binding_error(e)).unwrap_or(fallback);
    JsValue::from_str(&payload)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn load_config(yaml: Option<String>) -> Result<WidgetConfig, JsValue> {
    match yaml {
        Some(yaml) => WidgetConfig::from_yaml(&yaml).map_err(js_error),
        None => Ok(WidgetConfig::default()),
    }
}

fn display_mode(mode: &str) -> Result<DisplayMode, JsValue> {
    DisplayMode::from_str(mode).ok_or_else(|| {
        js_error(UkuleleError::ConfigError(format!("unknown display mode: {}", mode)))
    })
}

fn preference(value: &str) -> Result<AccidentalPreference, JsValue> {
    AccidentalPreference::from_str(value).ok_or_else(|| {
        js_error(UkuleleError::ConfigError(format!(
            "unknown accidental preference: {}",
            value
        )))
    })
}

/// Parse a chord symbol and return the parsed chord as a JS object
#[wasm_bindgen]
pub fn parse_chord(input: &str) -> Result<JsValue, JsValue> {
    let parsed = resolve_chord(input).map_err(js_error)?;
    to_js(&parsed)
}

/// Render instructions for a chord over the whole neck
#[wasm_bindgen]
pub fn project_chord(input: &str, mode: &str, accidental: &str) -> Result<JsValue, JsValue> {
    let parsed = resolve_chord(input).map_err(js_error)?;
    let projection = project(Some(&parsed.chord), display_mode(mode)?, preference(accidental)?);
    to_js(&projection)
}

/// Diatonic chords of a key; unknown scale or chord-kind keys fall back to major triads
#[wasm_bindgen]
pub fn diatonic(key: &str, scale: &str, chord_kind: &str) -> Result<JsValue, JsValue> {
    let preference = ukulele::pitch::guess_preference(key);
    let entries = diatonic_chords(
        key,
        ScaleKind::from_key_or_default(scale),
        ChordKind::from_key_or_default(chord_kind),
        preference,
    );
    to_js(&entries)
}

/// Note helper buttons, one column per natural
#[wasm_bindgen]
pub fn note_layout() -> Result<JsValue, JsValue> {
    to_js(&NOTE_LAYOUT)
}

#[derive(Serialize)]
struct QualityButton<'a> {
    key: &'a str,
    label: String,
}

#[derive(Serialize)]
struct DiatonicBoard<'a> {
    entry: &'a DiatonicEntry,
    board: Projection,
}

/// Chord-entry fretboard widget
#[wasm_bindgen]
pub struct FretboardApp {
    widget: FretboardWidget,
}

#[wasm_bindgen]
impl FretboardApp {
    #[wasm_bindgen(constructor)]
    pub fn new(config_yaml: Option<String>) -> Result<FretboardApp, JsValue> {
        let config = load_config(config_yaml)?;
        Ok(FretboardApp {
            widget: FretboardWidget::new(&config),
        })
    }

    pub fn set_chord_text(&mut self, text: &str) {
        self.widget.set_chord_text(text);
    }

    pub fn press_note(&mut self, note: &str) {
        self.widget.press_note(note);
    }

    pub fn append_suffix(&mut self, suffix: &str) {
        self.widget.append_suffix(suffix);
    }

    pub fn set_display_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        self.widget.set_display_mode(display_mode(mode)?);
        Ok(())
    }

    pub fn set_preference(&mut self, accidental: &str) -> Result<(), JsValue> {
        self.widget.set_preference(preference(accidental)?);
        Ok(())
    }

    /// Returns false when there was no chord to save
    pub fn add_snapshot(&mut self) -> bool {
        self.widget.add_snapshot().is_some()
    }

    pub fn pop_snapshot(&mut self) -> bool {
        self.widget.pop_snapshot().is_some()
    }

    pub fn snapshots(&self) -> Result<JsValue, JsValue> {
        to_js(self.widget.snapshots())
    }

    pub fn snapshot_projection(&self, index: usize) -> Result<JsValue, JsValue> {
        match self.widget.snapshot_projection(index) {
            Some(projection) => to_js(&projection),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn chord_text(&self) -> String {
        self.widget.chord_text().to_string()
    }

    pub fn chord_display(&self) -> String {
        self.widget.chord_display()
    }

    pub fn status(&self) -> Result<JsValue, JsValue> {
        to_js(self.widget.status())
    }

    pub fn status_message(&self) -> String {
        self.widget.status().message()
    }

    pub fn status_is_error(&self) -> bool {
        self.widget.status().is_error()
    }

    pub fn display_mode(&self) -> String {
        self.widget.display_mode().as_str().to_string()
    }

    pub fn preference(&self) -> String {
        self.widget.preference().as_str().to_string()
    }

    pub fn qualities(&self) -> Result<JsValue, JsValue> {
        let buttons: Vec<QualityButton> = self
            .widget
            .qualities()
            .iter()
            .map(|key| QualityButton {
                key,
                label: quality_button_label(key),
            })
            .collect();
        to_js(&buttons)
    }

    pub fn is_note_selected(&self, note: &str) -> bool {
        self.widget.is_note_selected(note)
    }

    pub fn is_suffix_selected(&self, suffix: &str) -> bool {
        self.widget.is_suffix_selected(suffix)
    }

    pub fn frets(&self) -> Vec<u8> {
        self.widget.frets()
    }

    pub fn projection(&self) -> Result<JsValue, JsValue> {
        to_js(&self.widget.projection())
    }
}

/// Diatonic chord explorer widget
#[wasm_bindgen]
pub struct DiatonicApp {
    widget: DiatonicWidget,
}

#[wasm_bindgen]
impl DiatonicApp {
    #[wasm_bindgen(constructor)]
    pub fn new(config_yaml: Option<String>) -> Result<DiatonicApp, JsValue> {
        let config = load_config(config_yaml)?;
        Ok(DiatonicApp {
            widget: DiatonicWidget::new(&config),
        })
    }

    pub fn select_key(&mut self, note: &str) {
        self.widget.select_key(note);
    }

    pub fn set_scale(&mut self, scale: &str) {
        self.widget.set_scale_key(scale);
    }

    pub fn set_chord_kind(&mut self, kind: &str) {
        self.widget.set_chord_kind(ChordKind::from_key_or_default(kind));
    }

    pub fn set_display_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        self.widget.set_display_mode(display_mode(mode)?);
        Ok(())
    }

    pub fn set_range(&mut self, start: i32, end: i32) {
        self.widget.set_range(start, end);
    }

    pub fn key(&self) -> String {
        self.widget.key().to_string()
    }

    pub fn is_key_selected(&self, note: &str) -> bool {
        self.widget.is_key_selected(note)
    }

    pub fn frets(&self) -> Vec<u8> {
        self.widget.frets()
    }

    pub fn status(&self) -> Result<JsValue, JsValue> {
        to_js(&self.widget.status())
    }

    pub fn status_message(&self) -> String {
        self.widget.status().message()
    }

    pub fn boards(&self) -> Result<JsValue, JsValue> {
        let boards: Vec<DiatonicBoard> = self
            .widget
            .boards()
            .into_iter()
            .map(|(entry, board)| DiatonicBoard { entry, board })
            .collect();
        to_js(&boards)
    }
}

/// `ConsentHost` backed by localStorage, script tags and `console.warn`
struct BrowserHost {
    measurement_id: String,
}

impl ConsentHost for BrowserHost {
    fn read_storage(&self, key: &str) -> Option<String> {
        host_read_storage(key)
    }

    fn write_storage(&mut self, key: &str, value: &str) -> Result<(), String> {
        host_write_storage(key, value)
            .map_err(|e| e.as_string().unwrap_or_else(|| format!("{:?}", e)))
    }

    fn remove_storage(&mut self, key: &str) {
        host_remove_storage(key);
    }

    // The analytics tag is configured from JS once the script has loaded
    fn load_script(&mut self, request: ScriptRequest) {
        let measurement_id = match request.kind {
            ScriptKind::Analytics => Some(self.measurement_id.clone()),
            ScriptKind::Ads => None,
        };
        host_load_script(
            &request.src,
            request.is_async,
            request.crossorigin,
            measurement_id,
        );
    }

    fn set_analytics_disabled(&mut self, measurement_id: &str, disabled: bool) {
        host_set_analytics_disabled(measurement_id, disabled);
    }

    fn configure_analytics(&mut self, measurement_id: &str) {
        host_gtag_config(measurement_id);
    }

    fn warn(&mut self, message: &str) {
        console_warn(message);
    }
}

/// Cookie banner controller for one page
#[wasm_bindgen]
pub struct CookieConsent {
    controller: ConsentController<BrowserHost>,
}

#[wasm_bindgen]
impl CookieConsent {
    /// Uses the site defaults; pass an AdSense client ID to allow ads.
    #[wasm_bindgen(constructor)]
    pub fn new(ads_client_id: Option<String>) -> CookieConsent {
        let settings = ConsentSettings {
            ads_client_id: ads_client_id.unwrap_or_default(),
            ..ConsentSettings::default()
        };
        let host = BrowserHost {
            measurement_id: settings.measurement_id.clone(),
        };
        CookieConsent {
            controller: ConsentController::new(host, settings),
        }
    }

    /// Returns true when a stored choice was applied
    pub fn start(&mut self) -> bool {
        self.controller.start().is_some()
    }

    pub fn accept_all(&mut self) {
        self.controller.accept_all(&now_iso());
    }

    pub fn reject_all(&mut self) {
        self.controller.reject_all(&now_iso());
    }

    pub fn save_selected(&mut self, analytics: bool, ads: bool) {
        self.controller.save_selected(analytics, ads, &now_iso());
    }

    pub fn show_preferences(&mut self) {
        self.controller.show_preferences();
    }

    pub fn open_preferences(&mut self) {
        self.controller.open_preferences();
    }

    pub fn back_to_quick(&mut self) {
        self.controller.back_to_quick();
    }

    pub fn reset(&mut self) {
        self.controller.reset();
    }

    pub fn banner_visible(&self) -> bool {
        self.controller.banner_visible()
    }

    /// "quick" or "preferences"
    pub fn view(&self) -> String {
        match self.controller.view() {
            BannerView::Quick => "quick".to_string(),
            BannerView::Preferences => "preferences".to_string(),
        }
    }

    pub fn analytics_toggle(&self) -> bool {
        self.controller.toggles().analytics
    }

    pub fn ads_toggle(&self) -> bool {
        self.controller.toggles().ads
    }
}
