//! In-memory host implementations.
//!
//! `HeadlessSurface` records every context call into a shared [`DrawLog`]
//! instead of rasterizing, and `HeadlessDocument` plays the document role for
//! selector-based construction. Together they make the loop/dispatch logic
//! fully observable without a windowing system.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::coords::{Rect, Vec2};

use super::{
    DocumentHost, DrawTarget, MountPoint, SetupError, TextAlign, TextBaseline, TextMetrics,
    TextRendering,
};

/// One recorded context call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Background(String),
    Mount(MountPoint),
    ClearRect(Rect),
    FillColor(String),
    FillRect(Rect),
    Font(String),
    TextAlign(TextAlign),
    TextBaseline(TextBaseline),
    TextRendering(TextRendering),
    Text {
        text: String,
        pos: Vec2,
        max_width: Option<f32>,
    },
}

/// Shared recording of context calls, in issue order.
///
/// Clones share the same underlying log, so a test keeps one handle while the
/// surface under test owns another.
#[derive(Debug, Clone, Default)]
pub struct DrawLog {
    cmds: Rc<RefCell<Vec<DrawCmd>>>,
}

impl DrawLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, cmd: DrawCmd) {
        self.cmds.borrow_mut().push(cmd);
    }

    /// Returns the recorded commands so far.
    pub fn commands(&self) -> Vec<DrawCmd> {
        self.cmds.borrow().clone()
    }

    /// Returns and clears the recorded commands.
    pub fn take(&self) -> Vec<DrawCmd> {
        self.cmds.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.cmds.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.borrow().is_empty()
    }
}

/// Fixed glyph advance used by [`HeadlessSurface::measure_text`].
///
/// Headless measurement is an estimate; tests that care about metrics should
/// assert against this constant rather than real font geometry.
pub const GLYPH_ADVANCE: f32 = 8.0;

/// Recording draw target with fixed dimensions and on-screen offset.
#[derive(Debug)]
pub struct HeadlessSurface {
    width: u32,
    height: u32,
    offset: Vec2,
    log: DrawLog,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_offset(width, height, Vec2::zero())
    }

    pub fn with_offset(width: u32, height: u32, offset: Vec2) -> Self {
        Self {
            width,
            height,
            offset,
            log: DrawLog::new(),
        }
    }

    /// Returns a handle to this surface's log. Grab it before boxing the
    /// surface away into a sketch.
    pub fn log(&self) -> DrawLog {
        self.log.clone()
    }

    fn with_log(mut self, log: DrawLog) -> Self {
        self.log = log;
        self
    }
}

impl DrawTarget for HeadlessSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn offset(&self) -> Vec2 {
        self.offset
    }

    fn set_background(&mut self, color: &str) {
        self.log.push(DrawCmd::Background(color.to_string()));
    }

    fn mount(&mut self, parent: MountPoint) {
        self.log.push(DrawCmd::Mount(parent));
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.log.push(DrawCmd::ClearRect(rect));
    }

    fn set_fill_color(&mut self, color: &str) {
        self.log.push(DrawCmd::FillColor(color.to_string()));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.log.push(DrawCmd::FillRect(rect));
    }

    fn set_font(&mut self, font: &str) {
        self.log.push(DrawCmd::Font(font.to_string()));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.log.push(DrawCmd::TextAlign(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.log.push(DrawCmd::TextBaseline(baseline));
    }

    fn set_text_rendering(&mut self, rendering: TextRendering) {
        self.log.push(DrawCmd::TextRendering(rendering));
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, max_width: Option<f32>) {
        self.log.push(DrawCmd::Text {
            text: text.to_string(),
            pos,
            max_width,
        });
    }

    fn measure_text(&mut self, text: &str) -> TextMetrics {
        TextMetrics {
            width: text.chars().count() as f32 * GLYPH_ADVANCE,
        }
    }
}

/// Element kinds a [`HeadlessDocument`] can hold under a selector.
#[derive(Debug, Clone, PartialEq)]
enum HeadlessElement {
    Surface { width: u32, height: u32, offset: Vec2 },
    Plain,
}

/// In-memory document: a selector table plus a surface factory.
///
/// Every surface created or resolved through the document records into the
/// document's single shared [`DrawLog`].
#[derive(Debug, Default)]
pub struct HeadlessDocument {
    elements: HashMap<String, HeadlessElement>,
    log: DrawLog,
}

impl HeadlessDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the log shared by all surfaces of this document.
    pub fn log(&self) -> DrawLog {
        self.log.clone()
    }

    /// Registers a drawable element under `selector`.
    pub fn insert_surface(&mut self, selector: &str, width: u32, height: u32) -> &mut Self {
        self.insert_surface_at(selector, width, height, Vec2::zero())
    }

    /// Registers a drawable element with a non-zero on-screen offset.
    pub fn insert_surface_at(
        &mut self,
        selector: &str,
        width: u32,
        height: u32,
        offset: Vec2,
    ) -> &mut Self {
        self.elements.insert(
            selector.to_string(),
            HeadlessElement::Surface { width, height, offset },
        );
        self
    }

    /// Registers a non-drawable element under `selector`.
    pub fn insert_plain(&mut self, selector: &str) -> &mut Self {
        self.elements.insert(selector.to_string(), HeadlessElement::Plain);
        self
    }
}

impl DocumentHost for HeadlessDocument {
    fn create_surface(&mut self, width: u32, height: u32) -> Box<dyn DrawTarget> {
        Box::new(HeadlessSurface::new(width, height).with_log(self.log.clone()))
    }

    fn surface_by_selector(&mut self, selector: &str) -> Result<Box<dyn DrawTarget>, SetupError> {
        match self.elements.get(selector) {
            None => Err(SetupError::NoSuchElement(selector.to_string())),
            Some(HeadlessElement::Plain) => {
                Err(SetupError::NotADrawTarget(selector.to_string()))
            }
            Some(HeadlessElement::Surface { width, height, offset }) => Ok(Box::new(
                HeadlessSurface::with_offset(*width, *height, *offset).with_log(self.log.clone()),
            )),
        }
    }
}
