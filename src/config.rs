use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gitviz_layout::{ClassifyOptions, NoMainPolicy, PathOptions};
use serde::Deserialize;

/// Optional TOML configuration, layered under the CLI flags.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub lane_width: Option<f64>,
    pub dot_radius: Option<f64>,
    pub corner_radius: Option<f64>,
    pub row_height: Option<f64>,
    pub all_main_when_unrooted: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn path_options(&self) -> PathOptions {
        let mut options = PathOptions::default();
        if let Some(lane_width) = self.lane_width {
            options.lane_width = lane_width;
        }
        if let Some(dot_radius) = self.dot_radius {
            options.dot_radius = dot_radius;
        }
        if let Some(corner_radius) = self.corner_radius {
            options.corner_radius = corner_radius;
        }
        if let Some(row_height) = self.row_height {
            options.default_row_height = row_height;
        }
        options
    }

    pub fn classify_options(&self) -> ClassifyOptions {
        ClassifyOptions {
            no_main_policy: if self.all_main_when_unrooted.unwrap_or(false) {
                NoMainPolicy::AllMainLine
            } else {
                NoMainPolicy::NoForcedMain
            },
        }
    }
}
