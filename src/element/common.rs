use egui::{Pos2, Rect};

// Common constants for all element kinds
pub const MIN_GESTURE_SIZE: f32 = 5.0;
pub const CITY_RADIUS: f32 = 5.0;
pub const RIVER_WIDTH: f32 = 3.0;
pub const FONT_SIZE: f32 = 16.0;
pub const HIT_TOLERANCE: f32 = 3.0;

/// Rough advance of one glyph relative to the font size, used for label bounds.
pub(crate) const GLYPH_WIDTH_FACTOR: f32 = 0.6;

/// Whether a dragged box is large enough to become an element.
///
/// Both extents must strictly exceed `min_size`; anything smaller is treated
/// as an accidental click.
pub fn exceeds_min_size(rect: &Rect, min_size: f32) -> bool {
    rect.width() > min_size && rect.height() > min_size
}

/// Calculate distance from a point to a line segment (used for river hit testing)
pub(crate) fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

/// Calculate the bounding box for a set of points
pub(crate) fn calculate_bounds(points: &[Pos2], padding: f32) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(
        Pos2::new(min_x - padding, min_y - padding),
        Pos2::new(max_x + padding, max_y + padding),
    )
}
