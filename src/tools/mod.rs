use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::element::{CITY_RADIUS, ElementKind, FONT_SIZE, MIN_GESTURE_SIZE, RIVER_WIDTH};

/// How a tool turns a pointer gesture into an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureStyle {
    /// Press, drag out a box, release
    Box,
    /// Press and release; only the press position matters
    Point,
    /// Every pointer move adds a vertex
    Polyline,
    /// Single click followed by a text prompt
    Prompt,
}

impl GestureStyle {
    pub fn of(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Mountain | ElementKind::Lake | ElementKind::Forest | ElementKind::Desert => {
                Self::Box
            }
            ElementKind::City => Self::Point,
            ElementKind::River => Self::Polyline,
            ElementKind::Text => Self::Prompt,
        }
    }
}

/// Per-tool style parameters used when creating elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Fill color per kind, in [`ElementKind::ALL`] order
    pub colors: [Color32; 7],
    pub river_width: f32,
    pub font_size: f32,
    pub city_radius: f32,
    /// Box gestures must exceed this in both dimensions
    pub min_gesture_size: f32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            colors: ElementKind::ALL.map(ElementKind::default_color),
            river_width: RIVER_WIDTH,
            font_size: FONT_SIZE,
            city_radius: CITY_RADIUS,
            min_gesture_size: MIN_GESTURE_SIZE,
        }
    }
}

impl ToolSettings {
    pub fn color(&self, kind: ElementKind) -> Color32 {
        self.colors[kind_index(kind)]
    }

    pub fn set_color(&mut self, kind: ElementKind, color: Color32) {
        self.colors[kind_index(kind)] = color;
    }
}

fn kind_index(kind: ElementKind) -> usize {
    ElementKind::ALL
        .iter()
        .position(|k| *k == kind)
        .unwrap_or_default()
}
