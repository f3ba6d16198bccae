// src/util/io/properties.rs
//! Property file host - reads wallpaper-style property pushes from a JSON
//! file and notices when it changes.
//!
//! ```json
//! {
//!   "paused": false,
//!   "general": { "fps": 30 },
//!   "user": {
//!     "islighttheme": { "value": true },
//!     "schemecolor": { "value": "0.96 0.49 0" }
//!   }
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::clock::settings::{lenient, GeneralProperties, PropertyPush, UserProperties};
use crate::error::Result;
use crate::{log_debug, log_warn};

/// On-disk shape. Every section is optional; absent or malformed means no
/// change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertiesFile {
    #[serde(default, deserialize_with = "lenient")]
    pub paused: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub general: Option<GeneralProperties>,
    #[serde(default, deserialize_with = "lenient")]
    pub user: Option<UserProperties>,
}

impl PropertiesFile {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn read(path: &Path) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// Pushes in delivery order: properties first, pause last so resuming
    /// renders with the new settings.
    pub fn into_pushes(self) -> Vec<PropertyPush> {
        let mut pushes = Vec::with_capacity(3);
        if let Some(general) = self.general {
            pushes.push(PropertyPush::General(general));
        }
        if let Some(user) = self.user {
            pushes.push(PropertyPush::User(user));
        }
        if let Some(paused) = self.paused {
            pushes.push(PropertyPush::Pause(paused));
        }
        pushes
    }
}

/// Polls a properties file and yields its pushes whenever it changes.
#[derive(Debug)]
pub struct PropertyWatcher {
    path: PathBuf,
    last_modified: Option<SystemTime>,
}

impl PropertyWatcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_modified: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pushes from the file if it changed since the last poll.
    ///
    /// A missing file is quiet. An unreadable or malformed file is logged and
    /// yields nothing; it is retried once it changes again.
    pub fn poll(&mut self) -> Option<Vec<PropertyPush>> {
        let modified = std::fs::metadata(&self.path).and_then(|m| m.modified()).ok()?;
        if self.last_modified == Some(modified) {
            return None;
        }
        self.last_modified = Some(modified);
        self.load()
    }

    /// Read the file regardless of whether it changed.
    pub fn load(&self) -> Option<Vec<PropertyPush>> {
        match PropertiesFile::read(&self.path) {
            Ok(file) => {
                log_debug!("Loaded properties from {}", self.path.display());
                Some(file.into_pushes())
            }
            Err(e) => {
                log_warn!("Ignoring properties file {}: {}", self.path.display(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::settings::PropertyValue;

    #[test]
    fn test_full_file() {
        let file = PropertiesFile::from_json(
            r#"{
                "paused": true,
                "general": {"fps": 30},
                "user": {"islighttheme": {"value": true}, "schemecolor": {"value": "1 0 0"}}
            }"#,
        )
        .unwrap();

        assert_eq!(
            file.into_pushes(),
            vec![
                PropertyPush::General(GeneralProperties { fps: Some(30.0) }),
                PropertyPush::User(UserProperties {
                    islighttheme: Some(PropertyValue::new(true)),
                    schemecolor: Some(PropertyValue::new("1 0 0".to_string())),
                }),
                PropertyPush::Pause(true),
            ]
        );
    }

    #[test]
    fn test_empty_file_pushes_nothing() {
        assert!(PropertiesFile::from_json("{}").unwrap().into_pushes().is_empty());
    }

    #[test]
    fn test_partial_user_property_keeps_general() {
        let file = PropertiesFile::from_json(
            r#"{"general": {"fps": 30}, "user": {"islighttheme": {}}}"#,
        )
        .unwrap();

        assert_eq!(
            file.into_pushes(),
            vec![
                PropertyPush::General(GeneralProperties { fps: Some(30.0) }),
                PropertyPush::User(UserProperties::default()),
            ]
        );
    }

    #[test]
    fn test_malformed_section_is_skipped() {
        let file = PropertiesFile::from_json(r#"{"paused": "no", "general": 5, "user": {}}"#)
            .unwrap();
        assert_eq!(file.into_pushes(), vec![PropertyPush::User(UserProperties::default())]);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(PropertiesFile::from_json("{\"general\": ").is_err());
    }

    #[test]
    fn test_watcher_reports_changes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("properties.json");
        let mut watcher = PropertyWatcher::new(&path);

        assert!(watcher.poll().is_none());

        std::fs::write(&path, r#"{"general": {"fps": 15}}"#).unwrap();
        let pushes = watcher.poll().unwrap();
        assert_eq!(pushes, vec![PropertyPush::General(GeneralProperties { fps: Some(15.0) })]);
        assert!(watcher.poll().is_none());

        assert_eq!(watcher.load().map(|p| p.len()), Some(1));
    }

    #[test]
    fn test_watcher_ignores_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("properties.json");
        std::fs::write(&path, "not json").unwrap();
        let mut watcher = PropertyWatcher::new(&path);
        assert!(watcher.poll().is_none());
    }
}
