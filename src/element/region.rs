use egui::{Color32, Pos2, Rect};
use serde::{Deserialize, Serialize};

use super::{Element, ElementId};

/// Box-shaped terrain feature: mountains, lakes, forests and deserts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    id: ElementId,
    rect: Rect,
    color: Color32,
}

impl Region {
    pub fn new(rect: Rect, color: Color32) -> Self {
        Self::with_id(ElementId::new(), rect, color)
    }

    pub fn with_id(id: ElementId, rect: Rect, color: Color32) -> Self {
        Self { id, rect, color }
    }

    pub(crate) fn set_id(&mut self, id: ElementId) {
        self.id = id;
    }
}

impl Element for Region {
    fn id(&self) -> ElementId {
        self.id
    }

    fn color(&self) -> Color32 {
        self.color
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        self.rect.contains(pos)
    }
}
