use egui::{Color32, Pos2, Rect, pos2, vec2};
use serde::{Deserialize, Serialize};

use super::{Element, ElementId};
use crate::element::common;

/// City marker: a filled dot of fixed radius.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct City {
    id: ElementId,
    center: Pos2,
    radius: f32,
    color: Color32,
}

impl City {
    pub fn new(center: Pos2, radius: f32, color: Color32) -> Self {
        Self {
            id: ElementId::new(),
            center,
            radius,
            color,
        }
    }

    pub fn center(&self) -> Pos2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub(crate) fn set_id(&mut self, id: ElementId) {
        self.id = id;
    }
}

impl Element for City {
    fn id(&self) -> ElementId {
        self.id
    }

    fn color(&self) -> Color32 {
        self.color
    }

    fn rect(&self) -> Rect {
        Rect::from_center_size(self.center, vec2(self.radius, self.radius) * 2.0)
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        self.center.distance(pos) <= self.radius + common::HIT_TOLERANCE
    }
}

/// Free text placed on the map. The anchor is the left end of the baseline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Label {
    id: ElementId,
    anchor: Pos2,
    content: String,
    font_size: f32,
    color: Color32,
}

impl Label {
    pub fn new(anchor: Pos2, content: impl Into<String>, font_size: f32, color: Color32) -> Self {
        Self {
            id: ElementId::new(),
            anchor,
            content: content.into(),
            font_size,
            color,
        }
    }

    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub(crate) fn set_id(&mut self, id: ElementId) {
        self.id = id;
    }
}

impl Element for Label {
    fn id(&self) -> ElementId {
        self.id
    }

    fn color(&self) -> Color32 {
        self.color
    }

    fn rect(&self) -> Rect {
        let width = self.content.chars().count() as f32 * self.font_size * common::GLYPH_WIDTH_FACTOR;
        Rect::from_min_size(
            pos2(self.anchor.x, self.anchor.y - self.font_size),
            vec2(width, self.font_size),
        )
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        self.rect().expand(common::HIT_TOLERANCE).contains(pos)
    }

    fn is_drawable(&self) -> bool {
        !self.content.is_empty()
    }
}
