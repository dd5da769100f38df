use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::frame::{AnimationConfig, Variant};
use crate::scene::SceneConfig;

pub const DEFAULT_WINDOW_WIDTH: u32 = 1280;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 720;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
            title: "Cube Field".to_string(),
        }
    }
}

/// Settings file layout; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub variant: Option<Variant>,
    pub cube_count: Option<usize>,
    pub spread: Option<f64>,
    pub rotation_step: Option<f64>,
    pub seed: Option<u64>,
    pub max_frames: Option<u64>,
    pub window: Option<WindowConfig>,
}

impl FileConfig {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("Invalid settings JSON")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// Resolved runtime settings: defaults, then file, then flags
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub scene: SceneConfig,
    pub animation: AnimationConfig,
    pub window: WindowConfig,
    pub seed: Option<u64>,
    pub max_frames: Option<u64>,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::default().merge_file(file).merge_cli(cli))
    }

    pub fn merge_file(mut self, file: FileConfig) -> Self {
        if let Some(variant) = file.variant {
            self.animation.variant = variant;
        }
        if let Some(step) = file.rotation_step {
            self.animation.rotation_step = step;
        }
        if let Some(count) = file.cube_count {
            self.scene.cube_count = count;
        }
        if let Some(spread) = file.spread {
            self.scene.spread = spread;
        }
        if let Some(window) = file.window {
            self.window = window;
        }
        self.seed = file.seed.or(self.seed);
        self.max_frames = file.max_frames.or(self.max_frames);
        self
    }

    pub fn merge_cli(mut self, cli: &Cli) -> Self {
        if let Some(variant) = cli.variant {
            self.animation.variant = variant;
        }
        if let Some(step) = cli.rotation_step {
            self.animation.rotation_step = step;
        }
        if let Some(count) = cli.cube_count {
            self.scene.cube_count = count;
        }
        self.seed = cli.seed.or(self.seed);
        self.max_frames = cli.max_frames.or(self.max_frames);
        self
    }
}
