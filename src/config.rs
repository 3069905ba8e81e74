use egui::{Vec2, vec2};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::renderer::MapFrame;
use crate::tools::ToolSettings;

/// Errors that can occur while loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Geographic extent of a template, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f32,
    pub south: f32,
    pub west: f32,
    pub east: f32,
}

/// Preset region with its canvas size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapTemplate {
    #[default]
    SouthAmerica,
    Europe,
    Africa,
    Asia,
    NorthAmerica,
}

impl MapTemplate {
    pub const ALL: [MapTemplate; 5] = [
        MapTemplate::SouthAmerica,
        MapTemplate::Europe,
        MapTemplate::Africa,
        MapTemplate::Asia,
        MapTemplate::NorthAmerica,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::SouthAmerica => "South America",
            Self::Europe => "Europe",
            Self::Africa => "Africa",
            Self::Asia => "Asia",
            Self::NorthAmerica => "North America",
        }
    }

    /// Canvas size in pixels
    pub fn size(self) -> Vec2 {
        match self {
            Self::SouthAmerica => vec2(800.0, 900.0),
            Self::Europe => vec2(900.0, 700.0),
            Self::Africa => vec2(700.0, 850.0),
            Self::Asia => vec2(1000.0, 700.0),
            Self::NorthAmerica => vec2(800.0, 700.0),
        }
    }

    pub fn bounds(self) -> Bounds {
        let (north, south, west, east) = match self {
            Self::SouthAmerica => (12.0, -56.0, -82.0, -34.0),
            Self::Europe => (71.0, 35.0, -10.0, 40.0),
            Self::Africa => (37.0, -35.0, -18.0, 52.0),
            Self::Asia => (77.0, -10.0, 26.0, 150.0),
            Self::NorthAmerica => (83.0, 15.0, -170.0, -52.0),
        };
        Bounds {
            north,
            south,
            west,
            east,
        }
    }
}

/// Editor settings, persisted between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct EditorConfig {
    pub template: MapTemplate,
    pub title: String,
    pub show_legend: bool,
    /// Maximum number of undo snapshots kept
    pub history_limit: usize,
    /// Directory used for saved maps and exported images
    pub save_dir: PathBuf,
    pub tools: ToolSettings,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            template: MapTemplate::default(),
            title: "Physical Map".to_owned(),
            show_legend: true,
            history_limit: 100,
            save_dir: PathBuf::from("maps"),
            tools: ToolSettings::default(),
        }
    }
}

impl EditorConfig {
    /// Load a JSON config file; missing fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn map_frame(&self) -> MapFrame {
        MapFrame::new(self.template.size(), self.title.clone(), self.show_legend)
    }
}
