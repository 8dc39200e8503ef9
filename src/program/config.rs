use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{WalkthroughError, WalkthroughResult};
use crate::layout::model::{ModelData, ModelShape};
use crate::walkthrough::phase::Phase;

/// Reading speed of commentary, in characters per second.
pub const DEFAULT_CHARS_PER_SEC: f64 = 40.0;

fn default_chars_per_sec() -> f64 {
    DEFAULT_CHARS_PER_SEC
}

fn default_phase() -> Phase {
    Phase::IntroOverview
}

/// Host-side configuration for a walkthrough session.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WalkthroughConfig {
    #[serde(default)]
    pub shape: ModelShape,
    #[serde(default = "default_chars_per_sec")]
    pub chars_per_sec: f64,
    #[serde(default = "default_phase")]
    pub phase: Phase,
    /// Token ids standing in for a computed model. Without them the model stays absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<Vec<usize>>,
}

impl Default for WalkthroughConfig {
    fn default() -> Self {
        Self {
            shape: ModelShape::default(),
            chars_per_sec: DEFAULT_CHARS_PER_SEC,
            phase: default_phase(),
            input_tokens: None,
        }
    }
}

impl WalkthroughConfig {
    pub fn from_json_str(s: &str) -> WalkthroughResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> WalkthroughResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> WalkthroughResult<()> {
        self.shape.validate()?;
        if !(self.chars_per_sec.is_finite() && self.chars_per_sec > 0.0) {
            return Err(WalkthroughError::validation(format!(
                "chars_per_sec must be finite and > 0, got {}",
                self.chars_per_sec
            )));
        }
        if let Some(tokens) = &self.input_tokens {
            ModelData::new(&self.shape, tokens.clone())?;
        }
        Ok(())
    }

    /// The configured model data, if input tokens were supplied.
    pub fn model(&self) -> WalkthroughResult<Option<ModelData>> {
        self.input_tokens
            .as_ref()
            .map(|tokens| ModelData::new(&self.shape, tokens.clone()))
            .transpose()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/program/config.rs"]
mod tests;
