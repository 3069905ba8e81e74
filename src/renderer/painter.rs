use egui::{Align2, FontId, Painter, Pos2, Shape, Stroke, Vec2};

use super::{MapFrame, RenderSurface};
use crate::element::{Element, ElementId, ElementType};

/// Live canvas surface.
///
/// `render` captures the elements to show; `paint` draws them with an egui
/// painter every frame, offset to wherever the canvas sits on screen.
#[derive(Debug, Clone)]
pub struct EguiRenderer {
    frame: MapFrame,
    scene: Vec<ElementType>,
    renders: u64,
}

impl EguiRenderer {
    pub fn new(frame: MapFrame) -> Self {
        Self {
            frame,
            scene: Vec::new(),
            renders: 0,
        }
    }

    pub fn frame(&self) -> &MapFrame {
        &self.frame
    }

    pub fn set_frame(&mut self, frame: MapFrame) {
        self.frame = frame;
    }

    /// Number of times the scene has been replaced
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    pub fn scene(&self) -> &[ElementType] {
        &self.scene
    }

    /// Draw the captured scene with the canvas' top-left corner at `origin`
    pub fn paint(&self, painter: &Painter, origin: Pos2, selected: Option<ElementId>) {
        let offset = origin.to_vec2();
        let canvas = self.frame.canvas_rect().translate(offset);
        painter.rect_filled(canvas, 0.0, super::BACKGROUND);

        for element in &self.scene {
            paint_element(painter, element, offset);
        }

        painter.text(
            self.frame.title_pos() + offset,
            Align2::CENTER_TOP,
            &self.frame.title,
            FontId::proportional(20.0),
            super::TITLE_COLOR,
        );

        if self.frame.show_legend {
            self.paint_legend(painter, offset);
        }

        if let Some(outline) = super::selection_outline(&self.scene, selected) {
            painter.rect_stroke(
                outline.translate(offset),
                2.0,
                Stroke::new(1.5, super::SELECTION_COLOR),
            );
        }
    }

    fn paint_legend(&self, painter: &Painter, offset: Vec2) {
        let Some(legend) = super::legend_layout(&self.frame, &self.scene) else {
            return;
        };

        painter.rect(
            legend.frame.translate(offset),
            0.0,
            egui::Color32::WHITE,
            Stroke::new(1.0, egui::Color32::BLACK),
        );
        painter.text(
            legend.heading + offset,
            Align2::LEFT_TOP,
            "Legend",
            FontId::proportional(14.0),
            egui::Color32::BLACK,
        );
        for (swatch, label_pos, kind, color) in legend.rows {
            painter.rect(
                swatch.translate(offset),
                0.0,
                color,
                Stroke::new(1.0, egui::Color32::BLACK),
            );
            painter.text(
                label_pos + offset,
                Align2::LEFT_TOP,
                kind.label(),
                FontId::proportional(12.0),
                egui::Color32::BLACK,
            );
        }
    }
}

impl RenderSurface for EguiRenderer {
    fn render(&mut self, elements: &[ElementType]) {
        self.scene.clear();
        self.scene.extend_from_slice(elements);
        self.renders += 1;
    }
}

fn paint_element(painter: &Painter, element: &ElementType, offset: Vec2) {
    if !element.is_drawable() {
        return;
    }

    let kind = element.kind();
    let outline = Stroke::new(1.0, kind.outline_color());

    match element {
        ElementType::Mountain(region) => {
            for peak in super::mountain_peaks(region.rect().translate(offset)) {
                painter.add(Shape::convex_polygon(peak.to_vec(), region.color(), outline));
            }
        }
        ElementType::Lake(region) => {
            let points = super::ellipse_points(region.rect().translate(offset));
            painter.add(Shape::convex_polygon(points, region.color(), outline));
        }
        ElementType::Forest(region) | ElementType::Desert(region) => {
            painter.rect(region.rect().translate(offset), 0.0, region.color(), outline);
        }
        ElementType::River(river) => {
            let points = river.points().iter().map(|p| *p + offset).collect();
            painter.add(Shape::line(points, Stroke::new(river.width(), river.color())));
        }
        ElementType::City(city) => {
            painter.circle(city.center() + offset, city.radius(), city.color(), outline);
        }
        ElementType::Text(label) => {
            painter.text(
                label.anchor() + offset,
                Align2::LEFT_BOTTOM,
                label.content(),
                FontId::proportional(label.font_size()),
                label.color(),
            );
        }
    }
}
