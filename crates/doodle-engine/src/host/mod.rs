//! Host capabilities.
//!
//! The engine never touches a real windowing system or document directly;
//! everything it needs from the platform arrives through the traits in this
//! module. Production hosts implement them over their 2D context; the
//! [`headless`] module provides deterministic in-memory implementations.

pub mod headless;

use std::fmt;

use crate::coords::{Rect, Vec2};

/// Horizontal text alignment, relative to the render position.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TextAlign {
    #[default]
    Start,
    End,
    Left,
    Right,
    Center,
}

/// Vertical text baseline, relative to the render position.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TextBaseline {
    Top,
    Hanging,
    Middle,
    #[default]
    Alphabetic,
    Ideographic,
    Bottom,
}

/// Glyph rendering priority for subsequent text.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum TextRendering {
    #[default]
    Auto,
    OptimizeSpeed,
    OptimizeLegibility,
    GeometricPrecision,
}

/// Result of measuring text against the current font.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
}

/// Where a surface gets attached in the host document.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum MountPoint {
    /// The document body.
    Body,
    /// A container element, named by selector.
    Element(String),
}

/// A 2D drawing surface plus its context, as provided by the host.
///
/// All operations are synchronous and side-effecting; styling calls apply to
/// subsequent draw calls on the same target.
pub trait DrawTarget {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// On-screen offset of the drawable area, in viewport coordinates.
    fn offset(&self) -> Vec2;

    /// Visual background styling, distinct from the fill color used to draw.
    fn set_background(&mut self, color: &str);

    /// Attaches the surface to the document.
    fn mount(&mut self, parent: MountPoint);

    fn clear_rect(&mut self, rect: Rect);
    fn set_fill_color(&mut self, color: &str);
    fn fill_rect(&mut self, rect: Rect);

    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn set_text_rendering(&mut self, rendering: TextRendering);
    fn fill_text(&mut self, text: &str, pos: Vec2, max_width: Option<f32>);
    fn measure_text(&mut self, text: &str) -> TextMetrics;
}

/// Surface factory and selector lookup, standing in for the host document.
pub trait DocumentHost {
    /// Creates a new off-document surface with the given pixel dimensions.
    fn create_surface(&mut self, width: u32, height: u32) -> Box<dyn DrawTarget>;

    /// Resolves a selector to an existing surface.
    fn surface_by_selector(&mut self, selector: &str) -> Result<Box<dyn DrawTarget>, SetupError>;
}

/// Construction failure when resolving a selector against the host document.
#[derive(Debug, Clone, PartialEq)]
pub enum SetupError {
    /// No element matched the selector.
    NoSuchElement(String),
    /// The matched element is not a usable drawing surface.
    NotADrawTarget(String),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::NoSuchElement(sel) => {
                write!(f, "no element matches selector '{sel}'")
            }
            SetupError::NotADrawTarget(sel) => {
                write!(f, "element for selector '{sel}' is not a drawing surface")
            }
        }
    }
}

impl std::error::Error for SetupError {}
