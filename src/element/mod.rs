use egui::{Color32, Pos2, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod common;
pub(crate) mod marker;
pub(crate) mod region;
pub(crate) mod river;

pub use common::{
    CITY_RADIUS, FONT_SIZE, HIT_TOLERANCE, MIN_GESTURE_SIZE, RIVER_WIDTH, exceeds_min_size,
};
pub use marker::{City, Label};
pub use region::Region;
pub use river::River;

/// Stable identity of an element within a document
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(Uuid);

impl ElementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind tag of an element. Doubles as the set of drawing tools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Mountain,
    River,
    Lake,
    Forest,
    Desert,
    City,
    Text,
}

impl ElementKind {
    pub const ALL: [ElementKind; 7] = [
        ElementKind::Mountain,
        ElementKind::River,
        ElementKind::Lake,
        ElementKind::Forest,
        ElementKind::Desert,
        ElementKind::City,
        ElementKind::Text,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Mountain => "mountain",
            Self::River => "river",
            Self::Lake => "lake",
            Self::Forest => "forest",
            Self::Desert => "desert",
            Self::City => "city",
            Self::Text => "text",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Mountain => "Mountains",
            Self::River => "River",
            Self::Lake => "Lake",
            Self::Forest => "Forest",
            Self::Desert => "Desert",
            Self::City => "City",
            Self::Text => "Text",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Mountain => "⛰",
            Self::River => "〰",
            Self::Lake => "💧",
            Self::Forest => "🌲",
            Self::Desert => "🏜",
            Self::City => "🏙",
            Self::Text => "T",
        }
    }

    /// Fill color used when a tool has no user override
    pub fn default_color(self) -> Color32 {
        match self {
            Self::Mountain => Color32::from_rgb(0x8B, 0x73, 0x55),
            Self::River | Self::Lake => Color32::from_rgb(0x4A, 0x90, 0xE2),
            Self::Forest => Color32::from_rgb(0x2D, 0x50, 0x16),
            Self::Desert => Color32::from_rgb(0xF4, 0xD0, 0x3F),
            Self::City => Color32::from_rgb(0xFF, 0x00, 0x00),
            Self::Text => Color32::BLACK,
        }
    }

    /// Outline drawn around filled shapes
    pub fn outline_color(self) -> Color32 {
        match self {
            Self::Mountain => Color32::from_rgb(0x65, 0x43, 0x21),
            Self::Lake => Color32::from_rgb(0x2E, 0x5C, 0x8A),
            Self::Forest => Color32::from_rgb(0x1A, 0x3D, 0x0A),
            Self::Desert => Color32::from_rgb(0xD4, 0xA0, 0x17),
            Self::City => Color32::from_rgb(0x8B, 0x00, 0x00),
            Self::River | Self::Text => Color32::TRANSPARENT,
        }
    }

    /// Whether this kind is placed by dragging out a bounding box
    pub fn is_box(self) -> bool {
        matches!(self, Self::Mountain | Self::Lake | Self::Forest | Self::Desert)
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Common trait that all document elements implement
pub trait Element {
    /// Get the unique identifier for this element
    fn id(&self) -> ElementId;

    /// Get the style color of this element
    fn color(&self) -> Color32;

    /// Get the bounding rectangle for this element
    fn rect(&self) -> Rect;

    /// Test if the element contains the given position
    fn hit_test(&self, pos: Pos2) -> bool;

    /// Whether the renderer has anything to paint for this element
    fn is_drawable(&self) -> bool {
        true
    }
}

/// Enumeration of all element types in the document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementType {
    Mountain(Region),
    River(River),
    Lake(Region),
    Forest(Region),
    Desert(Region),
    City(City),
    Text(Label),
}

impl ElementType {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementType::Mountain(_) => ElementKind::Mountain,
            ElementType::River(_) => ElementKind::River,
            ElementType::Lake(_) => ElementKind::Lake,
            ElementType::Forest(_) => ElementKind::Forest,
            ElementType::Desert(_) => ElementKind::Desert,
            ElementType::City(_) => ElementKind::City,
            ElementType::Text(_) => ElementKind::Text,
        }
    }

    pub fn as_river_mut(&mut self) -> Option<&mut River> {
        match self {
            ElementType::River(river) => Some(river),
            _ => None,
        }
    }

    /// Give this element a new identity
    pub(crate) fn set_id(&mut self, id: ElementId) {
        match self {
            ElementType::Mountain(r)
            | ElementType::Lake(r)
            | ElementType::Forest(r)
            | ElementType::Desert(r) => r.set_id(id),
            ElementType::River(r) => r.set_id(id),
            ElementType::City(c) => c.set_id(id),
            ElementType::Text(t) => t.set_id(id),
        }
    }

    fn as_element(&self) -> &dyn Element {
        match self {
            ElementType::Mountain(r)
            | ElementType::Lake(r)
            | ElementType::Forest(r)
            | ElementType::Desert(r) => r,
            ElementType::River(r) => r,
            ElementType::City(c) => c,
            ElementType::Text(t) => t,
        }
    }
}

impl Element for ElementType {
    fn id(&self) -> ElementId {
        self.as_element().id()
    }

    fn color(&self) -> Color32 {
        self.as_element().color()
    }

    fn rect(&self) -> Rect {
        self.as_element().rect()
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        self.as_element().hit_test(pos)
    }

    fn is_drawable(&self) -> bool {
        self.as_element().is_drawable()
    }
}

/// Factory functions for creating elements
pub mod factory {
    use super::*;

    /// Create a box-shaped element. Returns `None` for kinds that are not boxes.
    pub fn create_region(kind: ElementKind, rect: Rect, color: Color32) -> Option<ElementType> {
        let region = Region::new(rect, color);
        match kind {
            ElementKind::Mountain => Some(ElementType::Mountain(region)),
            ElementKind::Lake => Some(ElementType::Lake(region)),
            ElementKind::Forest => Some(ElementType::Forest(region)),
            ElementKind::Desert => Some(ElementType::Desert(region)),
            ElementKind::River | ElementKind::City | ElementKind::Text => None,
        }
    }

    /// Create a river with its first point
    pub fn create_river(start: Pos2, width: f32, color: Color32) -> ElementType {
        ElementType::River(River::new(start, width, color))
    }

    pub fn create_city(center: Pos2, radius: f32, color: Color32) -> ElementType {
        ElementType::City(City::new(center, radius, color))
    }

    pub fn create_text(anchor: Pos2, content: &str, font_size: f32, color: Color32) -> ElementType {
        ElementType::Text(Label::new(anchor, content, font_size, color))
    }
}
