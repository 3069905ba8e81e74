use egui::{Align2, Color32, Pos2, Rect, Vec2};
use image::{Rgba, RgbaImage};

use super::text::RasterFont;
use super::{MapFrame, RenderSurface};
use crate::element::{Element, ElementType};

const TITLE_SIZE: f32 = 20.0;
const LEGEND_HEADING_SIZE: f32 = 14.0;
const LEGEND_LABEL_SIZE: f32 = 12.0;

/// Off-screen bitmap surface used for image export.
///
/// All drawing is clipped to the bitmap, so elements far outside the canvas
/// cost no more than ones inside it.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    frame: MapFrame,
    image: RgbaImage,
    font: Option<RasterFont>,
}

impl RasterSurface {
    pub fn new(frame: MapFrame) -> Self {
        let (width, height) = pixel_size(&frame);
        let font = RasterFont::proportional();
        if font.is_none() {
            log::warn!("No font available, text will be missing from exported images");
        }
        Self {
            frame,
            image: RgbaImage::from_pixel(width, height, to_rgba(super::BACKGROUND)),
            font,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn bounds(&self) -> Rect {
        Rect::from_min_size(
            Pos2::ZERO,
            Vec2::new(self.image.width() as f32, self.image.height() as f32),
        )
    }

    /// Pixel columns `[start, end)` covering `min..max`, clamped to the bitmap
    fn columns(&self, min: f32, max: f32) -> std::ops::Range<i64> {
        clamp_span(min, max, self.image.width())
    }

    fn rows(&self, min: f32, max: f32) -> std::ops::Range<i64> {
        clamp_span(min, max, self.image.height())
    }

    fn put(&mut self, x: i64, y: i64, color: Color32) {
        if x < 0 || y < 0 || x >= self.image.width() as i64 || y >= self.image.height() as i64 {
            return;
        }
        self.image.put_pixel(x as u32, y as u32, to_rgba(color));
    }

    /// Mix `color` over the existing pixel by `coverage`
    fn blend(&mut self, x: i64, y: i64, color: Color32, coverage: f32) {
        if x < 0 || y < 0 || x >= self.image.width() as i64 || y >= self.image.height() as i64 {
            return;
        }
        let alpha = coverage.clamp(0.0, 1.0) * color.a() as f32 / 255.0;
        let src = to_rgba(color);
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        for channel in 0..3 {
            let mixed = dst.0[channel] as f32 * (1.0 - alpha) + src.0[channel] as f32 * alpha;
            dst.0[channel] = mixed.round() as u8;
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        for y in self.rows(rect.min.y, rect.max.y) {
            for x in self.columns(rect.min.x, rect.max.x) {
                self.put(x, y, color);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color32) {
        let corners = [
            rect.left_top(),
            rect.right_top(),
            rect.right_bottom(),
            rect.left_bottom(),
            rect.left_top(),
        ];
        self.stroke_polyline(&corners, 1.0, color);
    }

    /// Scanline fill, sampling at pixel centers with the even-odd rule
    fn fill_polygon(&mut self, points: &[Pos2], color: Color32) {
        if points.len() < 3 {
            return;
        }
        let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);

        let mut crossings = Vec::new();
        for y in self.rows(min_y, max_y) {
            let sample = y as f32 + 0.5;
            crossings.clear();
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                if (a.y <= sample) != (b.y <= sample) {
                    let t = (sample - a.y) / (b.y - a.y);
                    crossings.push(a.x + t * (b.x - a.x));
                }
            }
            crossings.sort_by(f32::total_cmp);
            for span in crossings.chunks_exact(2) {
                for x in self.columns(span[0], span[1]) {
                    self.put(x, y, color);
                }
            }
        }
    }

    fn stroke_polygon(&mut self, points: &[Pos2], color: Color32) {
        if let Some(first) = points.first() {
            let mut closed = points.to_vec();
            closed.push(*first);
            self.stroke_polyline(&closed, 1.0, color);
        }
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        let r = radius.max(0.5);
        for y in self.rows(center.y - r, center.y + r) {
            for x in self.columns(center.x - r, center.x + r) {
                let dx = x as f32 + 0.5 - center.x;
                let dy = y as f32 + 0.5 - center.y;
                if dx * dx + dy * dy <= r * r {
                    self.put(x, y, color);
                }
            }
        }
    }

    /// Thick line made of round stamps, at most half a radius apart.
    ///
    /// Segments are clipped to the bitmap grown by the radius first.
    fn stroke_polyline(&mut self, points: &[Pos2], width: f32, color: Color32) {
        let radius = (width / 2.0).max(0.5);
        let visible = self.bounds().expand(radius + 1.0);
        let spacing = (radius / 2.0).max(0.5);

        for segment in points.windows(2) {
            let Some((a, b)) = clip_segment(segment[0], segment[1], visible) else {
                continue;
            };
            let steps = ((b - a).length() / spacing).ceil().max(1.0) as usize;
            for i in 0..=steps {
                self.fill_circle(a.lerp(b, i as f32 / steps as f32), radius, color);
            }
        }
    }

    /// Draw one line of text anchored like `egui::Painter::text`
    fn draw_text(&mut self, text: &str, pos: Pos2, anchor: Align2, size: f32, color: Color32) {
        let Some(font) = self.font.clone() else {
            return;
        };
        // Glyph cost grows with the square of the size; nothing larger than the bitmap is useful
        let size = size.clamp(1.0, self.image.width().max(self.image.height()) as f32);

        let width = font.measure(text, size);
        let height = font.ascent(size) - font.descent(size);
        let min = anchor.anchor_size(pos, Vec2::new(width, height)).min;
        let baseline = min.y + font.ascent(size);

        let dimensions = self.image.dimensions();
        font.draw(text, min.x, baseline, size, dimensions, |x, y, coverage| {
            self.blend(x, y, color, coverage);
        });
    }

    fn draw_element(&mut self, element: &ElementType) {
        if !element.is_drawable() {
            return;
        }
        let outline = element.kind().outline_color();

        match element {
            ElementType::Mountain(region) => {
                for peak in super::mountain_peaks(region.rect()) {
                    self.fill_polygon(&peak, region.color());
                    self.stroke_polygon(&peak, outline);
                }
            }
            ElementType::Lake(region) => {
                let points = super::ellipse_points(region.rect());
                self.fill_polygon(&points, region.color());
                self.stroke_polygon(&points, outline);
            }
            ElementType::Forest(region) | ElementType::Desert(region) => {
                self.fill_rect(region.rect(), region.color());
                self.stroke_rect(region.rect(), outline);
            }
            ElementType::River(river) => {
                self.stroke_polyline(river.points(), river.width(), river.color());
            }
            ElementType::City(city) => {
                self.fill_circle(city.center(), city.radius() + 1.0, outline);
                self.fill_circle(city.center(), city.radius(), city.color());
            }
            ElementType::Text(label) => {
                self.draw_text(
                    label.content(),
                    label.anchor(),
                    Align2::LEFT_BOTTOM,
                    label.font_size(),
                    label.color(),
                );
            }
        }
    }

    fn draw_legend(&mut self, elements: &[ElementType]) {
        let Some(legend) = super::legend_layout(&self.frame, elements) else {
            return;
        };
        self.fill_rect(legend.frame, Color32::WHITE);
        self.stroke_rect(legend.frame, Color32::BLACK);
        self.draw_text(
            "Legend",
            legend.heading,
            Align2::LEFT_TOP,
            LEGEND_HEADING_SIZE,
            Color32::BLACK,
        );
        for (swatch, label_pos, kind, color) in legend.rows {
            self.fill_rect(swatch, color);
            self.stroke_rect(swatch, Color32::BLACK);
            self.draw_text(
                kind.label(),
                label_pos,
                Align2::LEFT_TOP,
                LEGEND_LABEL_SIZE,
                Color32::BLACK,
            );
        }
    }
}

impl RenderSurface for RasterSurface {
    fn render(&mut self, elements: &[ElementType]) {
        let (width, height) = pixel_size(&self.frame);
        self.image = RgbaImage::from_pixel(width, height, to_rgba(super::BACKGROUND));

        for element in elements {
            self.draw_element(element);
        }
        let title = self.frame.title.clone();
        self.draw_text(
            &title,
            self.frame.title_pos(),
            Align2::CENTER_TOP,
            TITLE_SIZE,
            super::TITLE_COLOR,
        );
        if self.frame.show_legend {
            self.draw_legend(elements);
        }
    }
}

fn pixel_size(frame: &MapFrame) -> (u32, u32) {
    (
        frame.size.x.round().max(1.0) as u32,
        frame.size.y.round().max(1.0) as u32,
    )
}

/// Pixels whose centers fall in `min..=max`, limited to `0..limit`
fn clamp_span(min: f32, max: f32, limit: u32) -> std::ops::Range<i64> {
    let start = (min - 0.5).ceil() as i64;
    let end = (max - 0.5).floor() as i64 + 1;
    start.max(0)..end.min(limit as i64)
}

/// Liang-Barsky clip of the segment `a`-`b` against `rect`
fn clip_segment(a: Pos2, b: Pos2, rect: Rect) -> Option<(Pos2, Pos2)> {
    let delta = b - a;
    let (mut t0, mut t1) = (0.0_f32, 1.0_f32);
    let edges = [
        (-delta.x, a.x - rect.min.x),
        (delta.x, rect.max.x - a.x),
        (-delta.y, a.y - rect.min.y),
        (delta.y, rect.max.y - a.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
        }
    }
    (t0 <= t1).then(|| (a + delta * t0, a + delta * t1))
}

fn to_rgba(color: Color32) -> Rgba<u8> {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Rgba([r, g, b, a])
}
