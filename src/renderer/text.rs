use ab_glyph::{Font, FontArc, GlyphId, ScaleFont, point};
use egui::{FontDefinitions, FontFamily};

/// Glyph rasteriser for bitmap output, backed by egui's bundled proportional font.
#[derive(Clone)]
pub struct RasterFont {
    font: FontArc,
}

impl std::fmt::Debug for RasterFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterFont").finish_non_exhaustive()
    }
}

impl RasterFont {
    /// The first proportional font egui ships with. `None` if egui was built without fonts.
    pub fn proportional() -> Option<Self> {
        let definitions = FontDefinitions::default();
        let name = definitions.families.get(&FontFamily::Proportional)?.first()?;
        let data = definitions.font_data.get(name)?;
        match FontArc::try_from_vec(data.font.to_vec()) {
            Ok(font) => Some(Self { font }),
            Err(err) => {
                log::warn!("Could not parse font {name}: {err}");
                None
            }
        }
    }

    /// Distance from baseline to the top of the tallest glyph
    pub fn ascent(&self, size: f32) -> f32 {
        self.font.as_scaled(size).ascent()
    }

    /// Distance from baseline to the bottom of descenders; negative
    pub fn descent(&self, size: f32) -> f32 {
        self.font.as_scaled(size).descent()
    }

    /// Advance width of `text` on one line
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        let scaled = self.font.as_scaled(size);
        let mut width = 0.0;
        let mut previous: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(previous) = previous {
                width += scaled.kern(previous, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        width
    }

    /// Rasterise `text` with its baseline starting at (`left`, `baseline`).
    ///
    /// `plot` receives pixel coordinates and coverage in `0.0..=1.0`. Glyphs
    /// entirely outside `0..width` x `0..height` are skipped.
    pub fn draw(
        &self,
        text: &str,
        left: f32,
        baseline: f32,
        size: f32,
        (width, height): (u32, u32),
        mut plot: impl FnMut(i64, i64, f32),
    ) {
        let scaled = self.font.as_scaled(size);
        let mut caret = left;
        let mut previous: Option<GlyphId> = None;

        for ch in text.chars() {
            let mut glyph = scaled.scaled_glyph(ch);
            if let Some(previous) = previous {
                caret += scaled.kern(previous, glyph.id);
            }
            previous = Some(glyph.id);
            glyph.position = point(caret, baseline);
            caret += scaled.h_advance(glyph.id);

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            if bounds.max.x < 0.0
                || bounds.max.y < 0.0
                || bounds.min.x > width as f32
                || bounds.min.y > height as f32
            {
                continue;
            }
            let (x0, y0) = (bounds.min.x as i64, bounds.min.y as i64);
            outlined.draw(|x, y, coverage| plot(x0 + x as i64, y0 + y as i64, coverage));
        }
    }
}
