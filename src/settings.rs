use crate::error::Result;
use crate::render::RenderOptions;
use serde::{Deserialize, Serialize};
use sgram_core::{LoadOptions, StftParams};
use std::path::Path;

/// Everything that shapes a rendered spectrogram. Every field is optional in
/// the JSON form; missing ones take their defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub stft: StftParams,
    pub load: LoadOptions,
    pub render: RenderOptions,
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&text)?;
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
