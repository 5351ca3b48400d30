//! # Cookie Consent
//!
//! Decision logic for the consent banner. The browser side effects (storage,
//! script tags, the analytics disable flag, console output) go through
//! [`ConsentHost`], so the controller can run in tests and in the wasm shell
//! alike.
//!
//! ## Stored Record
//! One storage key holds the JSON form of [`ConsentRecord`]:
//! ```text
//! {"analytics":true,"ads":false,"timestamp":"2026-10-14T08:00:00.000Z"}
//! ```
//! A record that fails to parse is reported through [`ConsentHost::warn`] and
//! treated as "no consent recorded".
//!
//! ## Scripts
//! Each controller requests the analytics tag and the ads tag at most once.
//! IDs that are blank or still contain a `XXXXX` placeholder are never loaded.

use serde::{Deserialize, Serialize};

use crate::error::UkuleleError;

pub const STORAGE_KEY: &str = "ukulele-tools:cookie-consent";
pub const GA_MEASUREMENT_ID: &str = "G-F3TLQM3DW2";

const ANALYTICS_SCRIPT: &str = "https://www.googletagmanager.com/gtag/js?id=";
const ADS_SCRIPT: &str = "https://pagead2.googlesyndication.com/pagead/js/adsbygoogle.js?client=";

/// The persisted consent choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub analytics: bool,
    pub ads: bool,
    /// ISO-8601 time of the choice
    pub timestamp: String,
}

impl ConsentRecord {
    pub fn new(analytics: bool, ads: bool, timestamp: &str) -> Self {
        Self {
            analytics,
            ads,
            timestamp: timestamp.to_string(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, UkuleleError> {
        serde_json::from_str(raw).map_err(|e| UkuleleError::ConsentError(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, UkuleleError> {
        serde_json::to_string(self).map_err(|e| UkuleleError::ConsentError(e.to_string()))
    }
}

/// Which tag a script request is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptKind {
    Analytics,
    Ads,
}

/// An external script the host should append to the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptRequest {
    pub kind: ScriptKind,
    pub src: String,
    pub is_async: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crossorigin: Option<String>,
}

/// Side effects the controller needs from its environment.
///
/// For analytics, the host is expected to run the tag's own setup (`gtag("js")`
/// and `gtag("config")`) once the requested script has loaded.
/// `configure_analytics` is only called when analytics is re-enabled after
/// the script is already on the page.
pub trait ConsentHost {
    fn read_storage(&self, key: &str) -> Option<String>;
    fn write_storage(&mut self, key: &str, value: &str) -> Result<(), String>;
    fn remove_storage(&mut self, key: &str);
    fn load_script(&mut self, request: ScriptRequest);
    fn set_analytics_disabled(&mut self, measurement_id: &str, disabled: bool);
    fn configure_analytics(&mut self, measurement_id: &str);
    fn warn(&mut self, message: &str);
}

/// IDs and storage key for one site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentSettings {
    pub storage_key: String,
    pub measurement_id: String,
    pub ads_client_id: String,
}

impl Default for ConsentSettings {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            measurement_id: GA_MEASUREMENT_ID.to_string(),
            ads_client_id: String::new(),
        }
    }
}

/// Which banner panel is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerView {
    #[default]
    Quick,
    Preferences,
}

/// Checkbox state in the preferences panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConsentToggles {
    pub analytics: bool,
    pub ads: bool,
}

impl Default for ConsentToggles {
    fn default() -> Self {
        Self {
            analytics: true,
            ads: false,
        }
    }
}

/// An ID is usable when it is non-blank and not a `XXXXX` placeholder.
pub fn is_valid_id(id: &str) -> bool {
    if id.trim().is_empty() {
        return false;
    }
    let mut run = 0;
    for c in id.chars() {
        if c.eq_ignore_ascii_case(&'x') {
            run += 1;
            if run >= 5 {
                return false;
            }
        } else {
            run = 0;
        }
    }
    true
}

/// Percent-encode everything except the characters `encodeURIComponent` keeps.
fn encode_uri_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Banner state plus the once-per-page script flags
pub struct ConsentController<H: ConsentHost> {
    host: H,
    settings: ConsentSettings,
    banner_visible: bool,
    view: BannerView,
    toggles: ConsentToggles,
    analytics_loaded: bool,
    ads_loaded: bool,
}

impl<H: ConsentHost> ConsentController<H> {
    pub fn new(host: H, settings: ConsentSettings) -> Self {
        Self {
            host,
            settings,
            banner_visible: false,
            view: BannerView::Quick,
            toggles: ConsentToggles::default(),
            analytics_loaded: false,
            ads_loaded: false,
        }
    }

    /// Page load: apply a stored choice, or show the banner when there is none.
    pub fn start(&mut self) -> Option<ConsentRecord> {
        match self.read_consent() {
            Some(record) => {
                self.sync_toggles(&record);
                self.apply(&record);
                Some(record)
            }
            None => {
                self.banner_visible = true;
                self.view = BannerView::Quick;
                None
            }
        }
    }

    pub fn accept_all(&mut self, timestamp: &str) -> ConsentRecord {
        let record = ConsentRecord::new(true, true, timestamp);
        self.sync_toggles(&record);
        self.persist(&record);
        self.hide_banner();
        self.apply(&record);
        record
    }

    pub fn reject_all(&mut self, timestamp: &str) -> ConsentRecord {
        let record = ConsentRecord::new(false, false, timestamp);
        self.sync_toggles(&record);
        self.persist(&record);
        self.disable_analytics();
        self.hide_banner();
        record
    }

    /// Save the choices from the preferences panel.
    pub fn save_selected(&mut self, analytics: bool, ads: bool, timestamp: &str) -> ConsentRecord {
        let record = ConsentRecord::new(analytics, ads, timestamp);
        self.sync_toggles(&record);
        self.persist(&record);
        self.hide_banner();
        self.apply(&record);
        record
    }

    /// The global "cookie settings" hook.
    pub fn show_preferences(&mut self) {
        self.banner_visible = true;
        if let Some(record) = self.read_consent() {
            self.sync_toggles(&record);
        }
        self.view = BannerView::Preferences;
    }

    /// Forget the stored choice and ask again.
    pub fn reset(&mut self) {
        let key = self.settings.storage_key.clone();
        self.host.remove_storage(&key);
        self.toggles = ConsentToggles::default();
        self.view = BannerView::Quick;
        self.banner_visible = true;
    }

    pub fn open_preferences(&mut self) {
        self.view = BannerView::Preferences;
    }

    pub fn back_to_quick(&mut self) {
        self.view = BannerView::Quick;
    }

    pub fn read_consent(&mut self) -> Option<ConsentRecord> {
        let raw = self
            .host
            .read_storage(&self.settings.storage_key)
            .filter(|raw| !raw.is_empty())?;
        match ConsentRecord::from_json(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                self.host
                    .warn(&format!("Failed to parse cookie consent: {}", e));
                None
            }
        }
    }

    pub fn banner_visible(&self) -> bool {
        self.banner_visible
    }

    pub fn view(&self) -> BannerView {
        self.view
    }

    pub fn toggles(&self) -> ConsentToggles {
        self.toggles
    }

    pub fn analytics_loaded(&self) -> bool {
        self.analytics_loaded
    }

    pub fn ads_loaded(&self) -> bool {
        self.ads_loaded
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn persist(&mut self, record: &ConsentRecord) {
        let stored = record
            .to_json()
            .and_then(|json| {
                self.host
                    .write_storage(&self.settings.storage_key, &json)
                    .map_err(UkuleleError::ConsentError)
            });
        if let Err(e) = stored {
            self.host
                .warn(&format!("Failed to persist cookie consent: {}", e));
        }
    }

    fn sync_toggles(&mut self, record: &ConsentRecord) {
        self.toggles = ConsentToggles {
            analytics: record.analytics,
            ads: record.ads,
        };
    }

    fn hide_banner(&mut self) {
        self.banner_visible = false;
        self.view = BannerView::Quick;
    }

    fn apply(&mut self, record: &ConsentRecord) {
        if record.analytics {
            self.enable_analytics();
        } else {
            self.disable_analytics();
        }
        if record.ads {
            self.enable_ads();
        }
    }

    fn enable_analytics(&mut self) {
        let id = &self.settings.measurement_id;
        if !is_valid_id(id) {
            return;
        }
        self.host.set_analytics_disabled(id, false);
        if self.analytics_loaded {
            self.host.configure_analytics(id);
            return;
        }
        self.analytics_loaded = true;
        self.host.load_script(ScriptRequest {
            kind: ScriptKind::Analytics,
            src: format!("{}{}", ANALYTICS_SCRIPT, id),
            is_async: true,
            crossorigin: None,
        });
    }

    fn disable_analytics(&mut self) {
        let id = &self.settings.measurement_id;
        if is_valid_id(id) {
            self.host.set_analytics_disabled(id, true);
        }
    }

    fn enable_ads(&mut self) {
        let id = &self.settings.ads_client_id;
        if self.ads_loaded || !is_valid_id(id) {
            return;
        }
        self.ads_loaded = true;
        self.host.load_script(ScriptRequest {
            kind: ScriptKind::Ads,
            src: format!("{}{}", ADS_SCRIPT, encode_uri_component(id)),
            is_async: true,
            crossorigin: Some("anonymous".to_string()),
        });
    }
}
