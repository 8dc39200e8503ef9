use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::WalkthroughResult;
use crate::program::camera::Camera;
use crate::walkthrough::phase::Phase;

/// Flat snapshot of the playback position, overwritten every frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SavedState {
    pub phase: Phase,
    pub phase_time: f64,
    pub camera: Camera,
}

impl SavedState {
    pub fn to_json(&self) -> WalkthroughResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(s: &str) -> WalkthroughResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn save_to_path(&self, path: &Path) -> WalkthroughResult<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("write snapshot '{}'", path.display()))?;
        Ok(())
    }

    pub fn load_from_path(path: &Path) -> WalkthroughResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read snapshot '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/program/saved.rs"]
mod tests;
