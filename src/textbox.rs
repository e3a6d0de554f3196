//! Text boxes: a bordered, pin-positioned viewport over a reflow buffer.
//!
//! Pins are fractions of the display size, so a box keeps its relative
//! placement when the window resizes; the owner calls
//! [`ReflowBuffer::invalidate_wrap`] on resize to re-queue the text for the
//! new width.

use std::sync::Arc;

use crate::color::Rgba;
use crate::error::Result;
use crate::flow::{FlowContext, FlowOptions, ReflowBuffer};
use crate::measure::{Renderer, TextMeasurer};
use crate::viewport::Viewport;

/// Default border thickness in device units.
pub const DEFAULT_BORDER_WIDTH: u32 = 1;

/// Default border color.
pub const DEFAULT_BORDER_COLOR: Rgba = Rgba::WHITE;

/// Constructor options for a [`TextBox`].
#[derive(Clone, Debug)]
pub struct TextBoxOptions {
    /// Border color.
    pub border_color: Rgba,
    /// Border thickness; zero draws no frame.
    pub border_width: u32,
}

impl Default for TextBoxOptions {
    fn default() -> Self {
        Self {
            border_color: DEFAULT_BORDER_COLOR,
            border_width: DEFAULT_BORDER_WIDTH,
        }
    }
}

/// A bordered text region anchored to display fractions.
///
/// `pins` are `[x0, y0, x1, y1]` as fractions of the display extent; the
/// corresponding rectangle is recomputed from the concrete display size at
/// each render.
pub struct TextBox {
    pins: [f32; 4],
    options: TextBoxOptions,
    flow: ReflowBuffer,
}

impl TextBox {
    /// Create a box with default flow and border options.
    #[must_use]
    pub fn new(context: Arc<FlowContext>, pins: [f32; 4]) -> Self {
        Self::with_options(context, pins, FlowOptions::default(), TextBoxOptions::default())
    }

    /// Create a box with explicit options.
    #[must_use]
    pub fn with_options(
        context: Arc<FlowContext>,
        pins: [f32; 4],
        flow: FlowOptions,
        options: TextBoxOptions,
    ) -> Self {
        Self {
            pins,
            options,
            flow: ReflowBuffer::new(context, flow),
        }
    }

    /// The underlying reflow buffer.
    #[must_use]
    pub fn flow(&self) -> &ReflowBuffer {
        &self.flow
    }

    /// The box's viewport for a concrete display size.
    ///
    /// # Examples
    ///
    /// ```
    /// use reflow::{FlowContext, TextBox, Viewport};
    /// use std::sync::Arc;
    ///
    /// let ctx = Arc::new(FlowContext::new());
    /// let left_half = TextBox::new(Arc::clone(&ctx), [0.0, 0.0, 0.5, 1.0]);
    /// assert_eq!(left_half.rect_for(500, 300), Viewport::new(0, 0, 250, 300));
    ///
    /// let inset = TextBox::new(ctx, [0.3, 0.3, 0.6, 1.0]);
    /// assert_eq!(inset.rect_for(100, 250), Viewport::new(30, 75, 30, 175));
    /// ```
    #[must_use]
    pub fn rect_for(&self, display_width: u32, display_height: u32) -> Viewport {
        let w = display_width as f32;
        let h = display_height as f32;
        let x = self.pins[0] * w;
        let y = self.pins[1] * h;
        let width = self.pins[2] * w - x;
        let height = self.pins[3] * h - y;
        Viewport::new(x as i32, y as i32, width as i32, height as i32)
    }

    /// Draw the border frame, then the wrapped text inside it.
    ///
    /// # Errors
    ///
    /// Propagates rendering errors from the underlying buffer.
    pub fn render(
        &self,
        renderer: &mut dyn Renderer,
        measurer: &dyn TextMeasurer,
        display_width: u32,
        display_height: u32,
    ) -> Result<()> {
        let rect = self.rect_for(display_width, display_height);
        if self.options.border_width > 0 {
            renderer.draw_frame(rect, self.options.border_color, self.options.border_width);
        }
        self.flow.render(renderer, measurer, rect)
    }
}
