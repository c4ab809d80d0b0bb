//! Geometry and scale math for the preview surface.
//!
//! The backend burns text onto a canonical 1080x1920 vertical frame. The
//! preview shows a much smaller simulated screen, so every canonical
//! quantity is scaled by the ratio between the on-screen video region width
//! and the canonical 1080 width.

use crate::style::model::{Alignment, Position};

/// Canonical frame width assumed by the backend pipeline.
pub const CANONICAL_WIDTH: f64 = 1080.0;
/// Canonical frame height assumed by the backend pipeline.
pub const CANONICAL_HEIGHT: f64 = 1920.0;
/// Fixed canonical Y offset of the template1 design position.
pub const TEMPLATE1_Y: f64 = 1372.4;

/// Which text element a measurement is for. Title and subtitle use
/// different default sizes and vertical insets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextKind {
    Title,
    Subtitle,
}

impl TextKind {
    /// Canonical font size used when the style does not carry one.
    pub fn default_font_size(self) -> f64 {
        match self {
            TextKind::Title => 64.0,
            TextKind::Subtitle => 48.0,
        }
    }
}

/// The simulated 16:9 video sub-region centered inside the screen area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VideoRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl VideoRegion {
    /// Region for a screen area of the given size. Height is half the
    /// area, width is 16:9 of that but never more than 90% of the area
    /// width, both centered.
    pub fn for_area(width: f64, height: f64) -> Self {
        let region_height = height * 0.5;
        let region_width = (region_height * 16.0 / 9.0).min(width * 0.9);
        Self {
            x: (width - region_width) / 2.0,
            y: (height - region_height) / 2.0,
            width: region_width,
            height: region_height,
        }
    }
}

/// Ratio between the preview video region width and the canonical 1080.
pub fn font_scale(width: f64, height: f64) -> f64 {
    VideoRegion::for_area(width, height).width / CANONICAL_WIDTH
}

/// Scale a canonical font size, clamped to a 6px minimum so tiny previews
/// stay legible.
pub fn scaled_font_px(canonical: f64, scale: f64) -> f64 {
    (canonical * scale).round().max(6.0)
}

/// Scale a canonical stroke or shadow offset, clamped to 0.5px.
pub fn scaled_hairline(canonical: f64, scale: f64) -> f64 {
    (canonical * scale).max(0.5)
}

/// Measured extents of one shaped text run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtents {
    pub width: f64,
    pub ascent: f64,
    pub descent: f64,
}

impl TextExtents {
    pub fn height(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// Baseline Y for a centered text element at the given position, within a
/// region of `height` starting at `offset_y`. An absent position and
/// `template2` both land on the vertical middle.
pub fn baseline_y(
    position: Option<Position>,
    kind: TextKind,
    extents: TextExtents,
    height: f64,
    offset_y: f64,
) -> f64 {
    match position {
        Some(Position::Top) => {
            offset_y
                + match kind {
                    TextKind::Title => extents.ascent + 20.0,
                    TextKind::Subtitle => extents.ascent + 60.0,
                }
        }
        Some(Position::Center) => {
            let half = extents.height() / 2.0;
            offset_y
                + height / 2.0
                + match kind {
                    TextKind::Title => -half,
                    TextKind::Subtitle => half,
                }
        }
        Some(Position::Bottom) => {
            let inset = match kind {
                TextKind::Title => 60.0,
                TextKind::Subtitle => 20.0,
            };
            offset_y + height - (extents.height() + inset) + extents.ascent
        }
        Some(Position::Template1) => {
            offset_y + TEMPLATE1_Y * (height / CANONICAL_HEIGHT) + extents.ascent
        }
        Some(Position::Template2) | None => offset_y + height / 2.0,
    }
}

/// Top Y of the stacked main/sub title area for the given position.
pub fn title_area_y(position: Position, height: f64, offset_y: f64) -> f64 {
    match position {
        Position::Top => offset_y + 20.0,
        Position::Center => offset_y + height / 2.0 - 50.0,
        Position::Bottom => offset_y + height - 100.0,
        Position::Template1 => offset_y + TEMPLATE1_Y * (height / CANONICAL_HEIGHT) - 50.0,
        Position::Template2 => offset_y + 20.0,
    }
}

/// Left X of a text run under the given alignment, with 20px insets on the
/// left/right edges.
pub fn aligned_x(alignment: Alignment, text_width: f64, width: f64, offset_x: f64) -> f64 {
    match alignment {
        Alignment::Left => offset_x + 20.0,
        Alignment::Right => offset_x + width - text_width - 20.0,
        Alignment::Center => offset_x + (width - text_width) / 2.0,
    }
}

/// Centered X used by the single-style text path.
pub fn centered_x(text_width: f64, width: f64, offset_x: f64) -> f64 {
    offset_x + (width - text_width) / 2.0
}

#[cfg(test)]
#[path = "../../tests/unit/layout/metrics.rs"]
mod tests;
