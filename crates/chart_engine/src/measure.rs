//! Content measurement
//!
//! Axis labels and titles are measured by the host, which knows fonts and
//! text shaping. The engine only needs the resulting sizes.

use chart_geometry::Size;

/// What kind of content is being measured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Label,
    Title,
}

/// Host-side text measurement
pub trait ContentMeasurer {
    /// Desired size of the given content
    fn measure(&self, content: &str, kind: ContentKind) -> Size;
}

/// Approximate measurer based on a fixed average glyph width.
///
/// Good enough for tests and for hosts that lay out before fonts are loaded.
#[derive(Debug, Clone)]
pub struct CharWidthMeasurer {
    /// Font size for axis labels
    pub label_font_size: f64,
    /// Font size for axis titles
    pub title_font_size: f64,
    /// Average glyph width as a fraction of the font size
    pub char_width_factor: f64,
    /// Line height as a fraction of the font size
    pub line_height_factor: f64,
}

impl Default for CharWidthMeasurer {
    fn default() -> Self {
        Self {
            label_font_size: 12.0,
            title_font_size: 14.0,
            char_width_factor: 0.6,
            line_height_factor: 1.25,
        }
    }
}

impl CharWidthMeasurer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContentMeasurer for CharWidthMeasurer {
    fn measure(&self, content: &str, kind: ContentKind) -> Size {
        if content.is_empty() {
            return Size::EMPTY;
        }

        let font_size = match kind {
            ContentKind::Label => self.label_font_size,
            ContentKind::Title => self.title_font_size,
        };

        let lines: Vec<&str> = content.lines().collect();
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        Size::new(
            widest as f64 * font_size * self.char_width_factor,
            lines.len() as f64 * font_size * self.line_height_factor,
        )
    }
}
