//! Fluent drawing surface.
//!
//! `Surface` is a thin wrapper over an injected [`DrawTarget`]: it owns the
//! stylistic state that spans calls (the font face) and forwards everything
//! else directly to the host context. Every operation returns `&mut Self` so
//! calls chain on the same owned surface.

use std::fmt;

use crate::coords::{Rect, Vec2};
use crate::host::{DrawTarget, MountPoint, TextAlign, TextBaseline, TextMetrics, TextRendering};

/// Font style component of the font face.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Bold,
    BoldItalic,
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
            FontStyle::Bold => "bold",
            FontStyle::BoldItalic => "bold italic",
        };
        f.write_str(s)
    }
}

/// Font size: pixels, or a raw CSS size kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum FontSize {
    Px(f32),
    Css(String),
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSize::Px(px) => write!(f, "{px}px"),
            FontSize::Css(s) => f.write_str(s),
        }
    }
}

impl From<f32> for FontSize {
    fn from(px: f32) -> Self {
        FontSize::Px(px)
    }
}

impl From<&str> for FontSize {
    fn from(s: &str) -> Self {
        FontSize::Css(s.to_string())
    }
}

/// Current font descriptor; re-rendered into a CSS font string per text call.
#[derive(Debug, Clone, PartialEq)]
pub struct FontFace {
    pub style: FontStyle,
    pub size: FontSize,
    pub family: String,
}

impl Default for FontFace {
    fn default() -> Self {
        Self {
            style: FontStyle::Normal,
            size: FontSize::Px(48.0),
            family: "serif".to_string(),
        }
    }
}

impl fmt::Display for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.style, self.size, self.family)
    }
}

/// The 2D drawing target and its associated stylistic state.
pub struct Surface {
    target: Box<dyn DrawTarget>,
    font: FontFace,
}

impl Surface {
    pub fn new(target: Box<dyn DrawTarget>) -> Self {
        Self {
            target,
            font: FontFace::default(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.target.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.target.height()
    }

    /// On-screen offset of the drawable area.
    #[inline]
    pub fn offset(&self) -> Vec2 {
        self.target.offset()
    }

    pub fn font_face(&self) -> &FontFace {
        &self.font
    }

    // ── clearing & fills ──────────────────────────────────────────────────

    /// Clears the full drawable area.
    pub fn clear(&mut self) -> &mut Self {
        let full = Rect::new(0.0, 0.0, self.width() as f32, self.height() as f32);
        self.clear_section(full)
    }

    /// Clears a sub-rectangle.
    pub fn clear_section(&mut self, rect: Rect) -> &mut Self {
        self.target.clear_rect(rect);
        self
    }

    /// Sets the fill color for subsequent draw calls.
    pub fn fill(&mut self, color: &str) -> &mut Self {
        self.target.set_fill_color(color);
        self
    }

    /// Draws a filled rectangle with the current fill color.
    pub fn rect(&mut self, rect: Rect) -> &mut Self {
        self.target.fill_rect(rect);
        self
    }

    /// Draws a filled square with the current fill color.
    pub fn square(&mut self, pos: Vec2, len: f32) -> &mut Self {
        self.rect(Rect::from_origin_size(pos, Vec2::new(len, len)))
    }

    // ── text ──────────────────────────────────────────────────────────────

    pub fn font_size(&mut self, size: impl Into<FontSize>) -> &mut Self {
        self.font.size = size.into();
        self
    }

    pub fn font_family(&mut self, family: &str) -> &mut Self {
        self.font.family = family.to_string();
        self
    }

    pub fn font_style(&mut self, style: FontStyle) -> &mut Self {
        self.font.style = style;
        self
    }

    pub fn text_align(&mut self, align: TextAlign) -> &mut Self {
        self.target.set_text_align(align);
        self
    }

    pub fn text_baseline(&mut self, baseline: TextBaseline) -> &mut Self {
        self.target.set_text_baseline(baseline);
        self
    }

    pub fn text_rendering(&mut self, rendering: TextRendering) -> &mut Self {
        self.target.set_text_rendering(rendering);
        self
    }

    /// Renders `text` at `pos` with the current font face.
    pub fn text(&mut self, pos: Vec2, text: &str) -> &mut Self {
        self.text_fitted(pos, text, None)
    }

    /// Like [`text`](Self::text) but squeezes the rendering into `max_width`
    /// when given.
    pub fn text_fitted(&mut self, pos: Vec2, text: &str, max_width: Option<f32>) -> &mut Self {
        let font = self.font.to_string();
        self.target.set_font(&font);
        self.target.fill_text(text, pos, max_width);
        self
    }

    /// Measures `text` against the context's current font.
    pub fn text_metrics(&mut self, text: &str) -> TextMetrics {
        self.target.measure_text(text)
    }

    // ── document styling & attachment ─────────────────────────────────────

    /// Visual background styling of the surface, distinct from the fill color.
    pub fn background_color(&mut self, color: &str) -> &mut Self {
        self.target.set_background(color);
        self
    }

    /// Attaches the surface to a container element or the document body.
    pub fn mount(&mut self, parent: MountPoint) -> &mut Self {
        self.target.mount(parent);
        self
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("font", &self.font)
            .finish_non_exhaustive()
    }
}
