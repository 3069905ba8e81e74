use egui::{Color32, Pos2, Rect};
use serde::{Deserialize, Serialize};

use super::{Element, ElementId};
use crate::element::common;

/// River element: a polyline grown point by point while the pointer moves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct River {
    id: ElementId,
    points: Vec<Pos2>,
    width: f32,
    color: Color32,
}

impl River {
    /// Start a river at its first vertex
    pub fn new(start: Pos2, width: f32, color: Color32) -> Self {
        Self::from_points(ElementId::new(), vec![start], width, color)
    }

    pub fn from_points(id: ElementId, points: Vec<Pos2>, width: f32, color: Color32) -> Self {
        Self {
            id,
            points,
            width,
            color,
        }
    }

    /// Get the vertices of this river
    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub(crate) fn set_id(&mut self, id: ElementId) {
        self.id = id;
    }
}

impl Element for River {
    fn id(&self) -> ElementId {
        self.id
    }

    fn color(&self) -> Color32 {
        self.color
    }

    fn rect(&self) -> Rect {
        common::calculate_bounds(&self.points, self.width / 2.0)
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        let reach = self.width / 2.0 + common::HIT_TOLERANCE;
        match self.points.as_slice() {
            [] => false,
            [only] => only.distance(pos) <= reach,
            points => points
                .windows(2)
                .any(|w| common::distance_to_line_segment(pos, w[0], w[1]) <= reach),
        }
    }

    fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }
}
