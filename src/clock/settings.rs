// src/clock/settings.rs

//! Runtime settings and the property payloads the host pushes into them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::log_warn;

/// Default accent color (orange 700).
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#f57c00";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub is_paused: bool,
    /// Frame rate cap, 0 means unlimited.
    pub fps_cap: f64,
    pub is_light_theme: bool,
    pub highlight_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            is_paused: false,
            fps_cap: 0.0,
            is_light_theme: false,
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
        }
    }
}

/// Wrapper the host uses for user property values: `{"value": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyValue<T> {
    pub value: T,
}

impl<T> PropertyValue<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

/// Deserialize an optional field, turning a malformed entry into `None`
/// so one bad property does not reject its siblings.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    if raw.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(raw.clone()) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            log_warn!("Ignoring malformed property {}: {}", raw, e);
            Ok(None)
        }
    }
}

/// General (host level) properties. Missing fields mean no change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralProperties {
    #[serde(default, deserialize_with = "lenient")]
    pub fps: Option<f64>,
}

/// User-facing properties. Missing or malformed fields mean no change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProperties {
    #[serde(default, deserialize_with = "lenient")]
    pub islighttheme: Option<PropertyValue<bool>>,
    /// Normalised color triple, e.g. `"0.96 0.49 0"`.
    #[serde(default, deserialize_with = "lenient")]
    pub schemecolor: Option<PropertyValue<String>>,
}

/// Receiver of host property pushes.
pub trait ConfigSink {
    fn on_pause(&mut self, paused: bool);

    fn on_general_properties(&mut self, properties: &GeneralProperties);

    fn on_user_properties(&mut self, properties: &UserProperties);
}

/// One delivery from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyPush {
    Pause(bool),
    General(GeneralProperties),
    User(UserProperties),
}

impl PropertyPush {
    /// Hand this push to a sink.
    pub fn deliver<K: ConfigSink + ?Sized>(&self, sink: &mut K) {
        match self {
            PropertyPush::Pause(paused) => sink.on_pause(*paused),
            PropertyPush::General(properties) => sink.on_general_properties(properties),
            PropertyPush::User(properties) => sink.on_user_properties(properties),
        }
    }
}

/// Validate a pushed FPS cap. Negative, non-finite and caps too small to
/// have a finite frame interval are rejected.
pub fn fps_cap_from(fps: f64) -> Option<f64> {
    if fps == 0.0 || (fps.is_finite() && fps > 0.0 && (1.0 / fps).is_finite()) {
        Some(fps)
    } else {
        log_warn!("Ignoring invalid fps cap {}", fps);
        None
    }
}

/// Turn a normalised `"r g b"` triple into `rgb(r,g,b)`.
///
/// Each channel is scaled to 0-255 and rounded up.
pub fn scheme_color_to_css(triple: &str) -> Option<String> {
    let channels = triple
        .split_whitespace()
        .map(|c| c.parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect::<Option<Vec<_>>>();

    let channels = match channels {
        Some(channels) if channels.len() == 3 => channels,
        _ => {
            log_warn!("Ignoring malformed scheme color '{}'", triple);
            return None;
        }
    };

    let scaled: Vec<String> = channels
        .iter()
        .map(|c| ((c * 255.0).ceil().clamp(0.0, 255.0) as u8).to_string())
        .collect();
    Some(format!("rgb({})", scaled.join(",")))
}
