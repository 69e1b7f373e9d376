use std::{fs, path::Path};

use serde::Deserialize;

use crate::{FlowbranchError, Result, workflow::consts::DEFAULT_ARM_LABELS};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// layout of transferred steps
    pub layout: LayoutConfig,
    /// branch node defaults
    pub branch: BranchConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// vertical distance between transferred steps, defaults to 120
    pub vertical_spacing: f64,
    /// horizontal distance of Branch 1 from the branch node, defaults to 200
    pub horizontal_offset: f64,
    /// vertical distance of the first arm node below the branch node, defaults to 100
    pub anchor_offset_y: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BranchConfig {
    /// arm labels of newly inserted branch nodes
    pub labels: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            vertical_spacing: 120.0,
            horizontal_offset: 200.0,
            anchor_offset_y: 100.0,
        }
    }
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            labels: DEFAULT_ARM_LABELS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Config {
    pub fn create<T: AsRef<Path>>(path: T) -> Result<Self> {
        let data =
            fs::read_to_string(path.as_ref()).map_err(|e| FlowbranchError::Config(format!("failed to load config file {:?}: {}", path.as_ref(), e)))?;

        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        let config = toml::from_str::<Config>(toml_str)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if !(self.layout.vertical_spacing.is_finite() && self.layout.horizontal_offset.is_finite() && self.layout.anchor_offset_y.is_finite()) {
            return Err(FlowbranchError::Config("layout values must be finite numbers".to_string()));
        }
        if self.branch.labels.len() < 2 {
            return Err(FlowbranchError::Config(format!("a branch needs at least 2 arm labels, got {}", self.branch.labels.len())));
        }
        Ok(())
    }
}
