use egui::{Color32, Pos2, Rect, Vec2, pos2, vec2};

use crate::element::{Element, ElementId, ElementKind, ElementType};

mod painter;
pub mod raster;
mod text;

pub use painter::EguiRenderer;
pub use raster::RasterSurface;

/// Ocean color behind every map
pub const BACKGROUND: Color32 = Color32::from_rgb(0xE8, 0xF4, 0xF8);
pub const TITLE_COLOR: Color32 = Color32::BLACK;
pub const SELECTION_COLOR: Color32 = Color32::from_rgb(33, 150, 243);

const LEGEND_WIDTH: f32 = 200.0;
const LEGEND_TOP: f32 = 50.0;
const LEGEND_ROW: f32 = 20.0;
const LEGEND_SWATCH: f32 = 15.0;
const ELLIPSE_SEGMENTS: usize = 48;

/// Anything the controller can repaint a document onto.
///
/// Implementations paint `elements` in order and must not keep references into
/// the document; each call replaces whatever was painted before.
pub trait RenderSurface {
    fn render(&mut self, elements: &[ElementType]);
}

/// Fixed decorations around the elements: canvas size, title and legend.
#[derive(Debug, Clone, PartialEq)]
pub struct MapFrame {
    pub size: Vec2,
    pub title: String,
    pub show_legend: bool,
}

impl MapFrame {
    pub fn new(size: Vec2, title: impl Into<String>, show_legend: bool) -> Self {
        Self {
            size,
            title: title.into(),
            show_legend,
        }
    }

    pub fn canvas_rect(&self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, self.size)
    }

    pub fn title_pos(&self) -> Pos2 {
        pos2(self.size.x / 2.0, 10.0)
    }
}

/// Legend box and its rows, in canvas coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct LegendLayout {
    pub frame: Rect,
    pub heading: Pos2,
    /// Swatch rectangle, label position and kind for every row
    pub rows: Vec<(Rect, Pos2, ElementKind, Color32)>,
}

/// Lay out the legend for the kinds present in `elements`.
///
/// Each kind appears once, with the color of its first element. Returns
/// `None` for an empty map.
pub fn legend_layout(frame: &MapFrame, elements: &[ElementType]) -> Option<LegendLayout> {
    let mut entries: Vec<(ElementKind, Color32)> = Vec::new();
    for element in elements {
        let kind = element.kind();
        if !entries.iter().any(|(k, _)| *k == kind) {
            entries.push((kind, element.color()));
        }
    }
    if entries.is_empty() {
        return None;
    }
    entries.sort_by_key(|(kind, _)| ElementKind::ALL.iter().position(|k| k == kind));

    let left = frame.size.x - LEGEND_WIDTH;
    let height = entries.len() as f32 * LEGEND_ROW + 40.0;
    let rows = entries
        .into_iter()
        .enumerate()
        .map(|(idx, (kind, color))| {
            let y = LEGEND_TOP + 25.0 + idx as f32 * LEGEND_ROW;
            let swatch = Rect::from_min_size(pos2(left, y), vec2(LEGEND_SWATCH, LEGEND_SWATCH));
            (swatch, pos2(left + 20.0, y), kind, color)
        })
        .collect();

    Some(LegendLayout {
        frame: Rect::from_min_max(
            pos2(left - 10.0, LEGEND_TOP - 10.0),
            pos2(frame.size.x - 10.0, LEGEND_TOP + height),
        ),
        heading: pos2(left, LEGEND_TOP),
        rows,
    })
}

/// Triangular peaks filling a mountain's box, left to right
pub fn mountain_peaks(rect: Rect) -> Vec<[Pos2; 3]> {
    let count = (rect.width() / rect.height().max(1.0)).round().clamp(1.0, 12.0) as usize;
    let step = rect.width() / count as f32;
    (0..count)
        .map(|i| {
            let left = rect.min.x + i as f32 * step;
            [
                pos2(left, rect.max.y),
                pos2(left + step / 2.0, rect.min.y),
                pos2(left + step, rect.max.y),
            ]
        })
        .collect()
}

/// Polygon approximating the ellipse inscribed in `rect`
pub fn ellipse_points(rect: Rect) -> Vec<Pos2> {
    let center = rect.center();
    let radius = rect.size() / 2.0;
    (0..ELLIPSE_SEGMENTS)
        .map(|i| {
            let angle = i as f32 / ELLIPSE_SEGMENTS as f32 * std::f32::consts::TAU;
            pos2(center.x + radius.x * angle.cos(), center.y + radius.y * angle.sin())
        })
        .collect()
}

/// Number of elements a surface will actually paint
pub fn drawable_count(elements: &[ElementType]) -> usize {
    elements.iter().filter(|e| e.is_drawable()).count()
}

/// Outline around the selected element, if it is still in the document
pub fn selection_outline(elements: &[ElementType], selected: Option<ElementId>) -> Option<Rect> {
    let id = selected?;
    elements
        .iter()
        .find(|e| e.id() == id)
        .map(|e| e.rect().expand(3.0))
}
