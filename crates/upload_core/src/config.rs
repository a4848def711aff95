use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::validation::{DEFAULT_MAX_FILE_SIZE, SUPPORTED_FORMATS};

pub const DEFAULT_SETTINGS_FILE: &str = "upload_ui.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub max_file_size_bytes: u64,
    pub supported_mime_types: Vec<String>,
    pub alert_dismiss_ms: u64,
    pub toast_autohide_ms: u64,
    pub toast_transition_ms: u64,
    pub progress_tick_ms: u64,
    pub progress_ceiling: f64,
    pub progress_max_step: f64,
    pub processing_path_marker: String,
    pub submit_busy_label: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE,
            supported_mime_types: SUPPORTED_FORMATS.iter().map(|s| s.to_string()).collect(),
            alert_dismiss_ms: 5000,
            toast_autohide_ms: 5000,
            toast_transition_ms: 150,
            progress_tick_ms: 200,
            progress_ceiling: 90.0,
            progress_max_step: 10.0,
            processing_path_marker: "/process/".into(),
            submit_busy_label: "Starting…".into(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("progress ceiling must be within (0, 100), got {0}")]
    CeilingOutOfRange(f64),
    #[error("progress step must be positive and finite, got {0}")]
    NonPositiveStep(f64),
    #[error("progress tick interval must be non-zero")]
    ZeroTick,
}

impl UiSettings {
    pub fn alert_dismiss_after(&self) -> Duration {
        Duration::from_millis(self.alert_dismiss_ms)
    }

    pub fn toast_autohide_after(&self) -> Duration {
        Duration::from_millis(self.toast_autohide_ms)
    }

    pub fn toast_transition(&self) -> Duration {
        Duration::from_millis(self.toast_transition_ms)
    }

    pub fn progress_tick(&self) -> Duration {
        Duration::from_millis(self.progress_tick_ms)
    }

    pub fn check(&self) -> Result<(), SettingsError> {
        if !(self.progress_ceiling > 0.0 && self.progress_ceiling < 100.0) {
            return Err(SettingsError::CeilingOutOfRange(self.progress_ceiling));
        }
        if !(self.progress_max_step.is_finite() && self.progress_max_step > 0.0) {
            return Err(SettingsError::NonPositiveStep(self.progress_max_step));
        }
        if self.progress_tick_ms == 0 {
            return Err(SettingsError::ZeroTick);
        }
        Ok(())
    }
}

/// Defaults, then the TOML file (`upload_ui.toml` unless `path` is given),
/// then `APP__*` environment overrides. Bad input is logged and skipped.
pub fn load_settings(path: Option<&Path>) -> UiSettings {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_SETTINGS_FILE));
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => match toml::from_str::<UiSettings>(&raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(path = %path.display(), "ignoring unparseable settings file: {err}");
                UiSettings::default()
            }
        },
        Err(_) => UiSettings::default(),
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    if let Err(err) = settings.check() {
        warn!("falling back to default settings: {err}");
        return UiSettings::default();
    }
    settings
}

pub fn apply_env_overrides(settings: &mut UiSettings, lookup: impl Fn(&str) -> Option<String>) {
    fn parsed<T: std::str::FromStr>(key: &str, raw: Option<String>) -> Option<T> {
        let raw = raw?;
        match raw.trim().parse::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(key, value = %raw, "ignoring unparseable settings override");
                None
            }
        }
    }

    if let Some(v) = parsed("APP__MAX_FILE_SIZE_BYTES", lookup("APP__MAX_FILE_SIZE_BYTES")) {
        settings.max_file_size_bytes = v;
    }
    if let Some(v) = parsed("APP__ALERT_DISMISS_MS", lookup("APP__ALERT_DISMISS_MS")) {
        settings.alert_dismiss_ms = v;
    }
    if let Some(v) = parsed("APP__TOAST_AUTOHIDE_MS", lookup("APP__TOAST_AUTOHIDE_MS")) {
        settings.toast_autohide_ms = v;
    }
    if let Some(v) = parsed("APP__PROGRESS_TICK_MS", lookup("APP__PROGRESS_TICK_MS")) {
        settings.progress_tick_ms = v;
    }
    if let Some(v) = parsed("APP__PROGRESS_CEILING", lookup("APP__PROGRESS_CEILING")) {
        settings.progress_ceiling = v;
    }
    if let Some(v) = lookup("APP__PROCESSING_PATH_MARKER") {
        if !v.trim().is_empty() {
            settings.processing_path_marker = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        env,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::*;

    #[test]
    fn defaults_match_upload_form_limits() {
        let settings = UiSettings::default();
        assert_eq!(settings.max_file_size_bytes, 52_428_800);
        assert_eq!(settings.supported_mime_types.len(), 7);
        assert_eq!(settings.alert_dismiss_after(), Duration::from_millis(5000));
        assert_eq!(settings.progress_tick(), Duration::from_millis(200));
        assert_eq!(settings.progress_ceiling, 90.0);
        assert!(settings.check().is_ok());
    }

    #[test]
    fn env_overrides_replace_parsed_values_and_skip_garbage() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("APP__MAX_FILE_SIZE_BYTES", "1024"),
            ("APP__PROGRESS_TICK_MS", "fast"),
            ("APP__PROCESSING_PATH_MARKER", "/jobs/"),
        ]);
        let mut settings = UiSettings::default();
        apply_env_overrides(&mut settings, |key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(settings.max_file_size_bytes, 1024);
        assert_eq!(settings.progress_tick_ms, 200);
        assert_eq!(settings.processing_path_marker, "/jobs/");
    }

    #[test]
    fn check_rejects_ceiling_at_or_above_one_hundred() {
        let settings = UiSettings {
            progress_ceiling: 100.0,
            ..UiSettings::default()
        };
        assert_eq!(
            settings.check(),
            Err(SettingsError::CeilingOutOfRange(100.0))
        );

        let settings = UiSettings {
            progress_tick_ms: 0,
            ..UiSettings::default()
        };
        assert_eq!(settings.check(), Err(SettingsError::ZeroTick));
    }

    #[test]
    fn check_rejects_zero_nan_and_infinite_steps() {
        for step in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let settings = UiSettings {
                progress_max_step: step,
                ..UiSettings::default()
            };
            assert!(
                matches!(settings.check(), Err(SettingsError::NonPositiveStep(_))),
                "step {step} accepted"
            );
        }
    }

    #[test]
    fn infinite_step_in_toml_falls_back_to_defaults() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("upload_ui_step_{suffix}.toml"));
        fs::write(&path, "alert_dismiss_ms = 1500\nprogress_max_step = inf\n").expect("write");

        let settings = load_settings(Some(&path));
        assert_eq!(settings, UiSettings::default());

        fs::remove_file(path).expect("cleanup");
    }

    #[test]
    fn partial_toml_file_keeps_remaining_defaults() {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        let path = env::temp_dir().join(format!("upload_ui_settings_{suffix}.toml"));
        fs::write(&path, "alert_dismiss_ms = 1500\nprogress_ceiling = 80.0\n").expect("write");

        let settings = load_settings(Some(&path));
        assert_eq!(settings.alert_dismiss_ms, 1500);
        assert_eq!(settings.progress_ceiling, 80.0);
        assert_eq!(settings.toast_autohide_ms, 5000);

        fs::remove_file(path).expect("cleanup");
    }
}
