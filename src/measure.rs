//! Measuring and drawing capabilities injected by the embedder.
//!
//! The engine never touches pixels or font files. It asks a [`TextMeasurer`]
//! how large a styled string is and tells a [`Renderer`] where to put it;
//! both are supplied from outside. A deterministic [`CellMeasurer`] is
//! included for terminal-style backends and for tests.

use unicode_width::UnicodeWidthStr;

use crate::color::Rgba;
use crate::error::Result;
use crate::style::Style;
use crate::viewport::Viewport;

/// A position in device units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A measured extent in device units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    /// Create a new size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Measures styled text in device units.
///
/// Implementations must be pure and deterministic for a given style, text,
/// and backend state, and prefix-monotonic: a prefix of `text` never
/// measures wider than `text` itself. The split search relies on that
/// monotonicity to stop scanning at the first overflowing prefix.
pub trait TextMeasurer {
    /// Measure `text` drawn with `style`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Measurement`](crate::Error::Measurement) when the
    /// backend cannot measure (e.g. a lost font handle). The engine leaves
    /// its state untouched for the failing line, so callers may retry.
    fn measure(&self, style: &Style, text: &str) -> Result<Size>;
}

/// Draws measured runs onto a target surface.
pub trait Renderer {
    /// Blit `text` with `style` at `pos`. `highlight` is an optional
    /// background fill behind the run.
    fn draw(
        &mut self,
        style: &Style,
        text: &str,
        color: Rgba,
        highlight: Option<Rgba>,
        pos: Point,
    );

    /// Draw a rectangular frame (used for text box borders). Backends
    /// without frame support can ignore it.
    fn draw_frame(&mut self, rect: Viewport, color: Rgba, width: u32) {
        let _ = (rect, color, width);
    }
}

/// Fixed-cell measurer: every display column costs one cell.
///
/// Width is the [`unicode-width`] display-column count times the cell
/// width; height is the cell height regardless of style. Suitable for
/// terminal backends with a uniform cell grid, and as a deterministic
/// measurer in tests.
///
/// [`unicode-width`]: https://docs.rs/unicode-width
///
/// # Examples
///
/// ```
/// use reflow::{CellMeasurer, Size, Style, TextMeasurer};
///
/// let measurer = CellMeasurer::new(12, 24);
/// let style = Style::new("monospace", 20);
/// assert_eq!(measurer.measure(&style, "abc").unwrap(), Size::new(36, 24));
/// assert_eq!(measurer.measure(&style, "中").unwrap(), Size::new(24, 24));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct CellMeasurer {
    cell: Size,
}

impl CellMeasurer {
    /// Create a measurer with the given cell extent.
    #[must_use]
    pub const fn new(cell_width: u32, cell_height: u32) -> Self {
        Self {
            cell: Size::new(cell_width, cell_height),
        }
    }

    /// The configured cell extent.
    #[must_use]
    pub const fn cell(&self) -> Size {
        self.cell
    }
}

impl TextMeasurer for CellMeasurer {
    fn measure(&self, _style: &Style, text: &str) -> Result<Size> {
        let columns = text.width() as u32;
        Ok(Size::new(columns * self.cell.width, self.cell.height))
    }
}
