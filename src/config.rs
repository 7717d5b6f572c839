//! Persistent configuration handling for textgrab.
//!
//! Persists configuration in a JSON file:
//! `~/.config/textgrab/config.json`.

use std::fs;
use std::io;
use std::path::PathBuf;

use dirs::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::engine::OcrJobConfig;

const APP_CONFIG_DIR_NAME: &str = "textgrab";
const CONFIG_FILE_NAME: &str = "config.json";

/// Vendor prefix some imported configs carry on the language value.
const LEGACY_LANGUAGE_PREFIX: &str = "miLANG_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No config directory available on this platform")]
    NoConfigDir,
}

/// Global hotkey binding for the Region OCR action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyBinding {
    pub modifiers: String,
    pub key: String,
}

impl Default for HotkeyBinding {
    fn default() -> Self {
        #[cfg(target_os = "macos")]
        let modifiers = "command+shift".to_string();
        #[cfg(not(target_os = "macos"))]
        let modifiers = "control+shift".to_string();

        Self {
            modifiers,
            key: "o".to_string(),
        }
    }
}

impl HotkeyBinding {
    /// Human-readable shortcut string for the host's menu entry,
    /// e.g. `Ctrl+Shift+O`.
    pub fn label(&self) -> String {
        let mod_label = format_modifier_label(&self.modifiers);
        let upper_key = self.key.trim().to_uppercase();
        if mod_label.is_empty() {
            upper_key
        } else {
            format!("{mod_label}+{upper_key}")
        }
    }
}

fn format_modifier_label(raw: &str) -> String {
    raw.split(|c: char| c == '+' || c == ',' || c.is_whitespace())
        .filter_map(|token| {
            let normalized = token.trim().to_lowercase();
            if normalized.is_empty() {
                return None;
            }
            let label = match normalized.as_str() {
                "control" | "ctrl" => "Ctrl",
                "shift" => "Shift",
                "alt" | "option" => "Alt",
                "command" | "cmd" => "Cmd",
                "super" | "meta" => "Super",
                _ => token.trim(),
            };
            Some(label.to_string())
        })
        .collect::<Vec<_>>()
        .join("+")
}

/// Strips the legacy vendor prefix and turns underscores into spaces, so a
/// stored `miLANG_CHINESE_SIMPLIFIED` becomes the canonical
/// `CHINESE SIMPLIFIED` before it ever reaches the engine.
pub fn normalize_language(raw: &str) -> String {
    raw.replace(LEGACY_LANGUAGE_PREFIX, "").replace('_', " ")
}

/// Effective OCR settings for this installation, defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrSettings {
    /// Canonical engine language name.
    pub language: String,
    pub orient: bool,
    pub straighten: bool,
    pub hotkey: HotkeyBinding,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            language: "ENGLISH".to_string(),
            orient: true,
            straighten: true,
            hotkey: HotkeyBinding::default(),
        }
    }
}

impl OcrSettings {
    /// The per-invocation recognition parameters, passed by value into each
    /// pipeline invocation.
    pub fn job_config(&self) -> OcrJobConfig {
        OcrJobConfig {
            language: self.language.clone(),
            orient: self.orient,
            straighten: self.straighten,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    orient_image: Option<bool>,
    #[serde(default)]
    straighten_image: Option<bool>,
    #[serde(default)]
    hotkey_modifiers: Option<String>,
    #[serde(default)]
    hotkey_key: Option<String>,
}

fn config_path() -> Option<PathBuf> {
    let path = config_dir()?
        .join(APP_CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME);
    Some(path)
}

fn ensure_config_dir_exists(path: &std::path::Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn load_raw_config() -> Result<RawConfig, ConfigError> {
    let Some(path) = config_path() else {
        debug!("No config_dir available, using defaults only");
        return Ok(RawConfig::default());
    };

    if !path.exists() {
        debug!(?path, "Config file does not exist, using defaults");
        return Ok(RawConfig::default());
    }

    let data = fs::read_to_string(&path)?;
    let cfg = serde_json::from_str(&data)?;
    debug!(?path, "Config loaded");
    Ok(cfg)
}

fn save_raw_config(mut cfg: RawConfig) -> Result<(), ConfigError> {
    let Some(path) = config_path() else {
        warn!("No config_dir available, skipping save");
        return Ok(());
    };

    ensure_config_dir_exists(&path)?;
    cfg.language = cfg.language.filter(|s| !s.is_empty());
    cfg.hotkey_modifiers = cfg.hotkey_modifiers.filter(|s| !s.is_empty());
    cfg.hotkey_key = cfg.hotkey_key.filter(|s| !s.is_empty());

    let data = serde_json::to_string_pretty(&cfg)?;
    fs::write(&path, data)?;
    debug!(?path, "Config saved");
    Ok(())
}

fn load_or_default_config() -> RawConfig {
    match load_raw_config() {
        Ok(cfg) => cfg,
        Err(err) => {
            warn!(error = ?err, "Failed to load existing config, starting fresh");
            RawConfig::default()
        }
    }
}

fn settings_from_raw(raw: RawConfig) -> OcrSettings {
    let defaults = OcrSettings::default();
    let language = raw
        .language
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(normalize_language)
        .unwrap_or(defaults.language);
    let hotkey = HotkeyBinding {
        modifiers: raw
            .hotkey_modifiers
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.hotkey.modifiers),
        key: raw
            .hotkey_key
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.hotkey.key),
    };
    OcrSettings {
        language,
        orient: raw.orient_image.unwrap_or(defaults.orient),
        straighten: raw.straighten_image.unwrap_or(defaults.straighten),
        hotkey,
    }
}

/// Loads the persisted settings, normalizing the stored language value and
/// filling in defaults for anything missing.
pub fn load_settings() -> OcrSettings {
    settings_from_raw(load_or_default_config())
}

/// Persists the settings, keeping any fields a newer version might have
/// added to the file.
pub fn save_settings(settings: &OcrSettings) {
    debug!(?settings, "Saving OCR settings");
    let mut cfg = load_or_default_config();
    cfg.language = Some(settings.language.clone());
    cfg.orient_image = Some(settings.orient);
    cfg.straighten_image = Some(settings.straighten);
    cfg.hotkey_modifiers = Some(settings.hotkey.modifiers.clone());
    cfg.hotkey_key = Some(settings.hotkey.key.clone());
    if let Err(err) = save_raw_config(cfg) {
        error!(error = ?err, "Failed to save config");
    }
}
