//! `reflow` - incremental styled-text layout engine
//!
//! Wraps a stream of styled text runs into lines that fit a viewport,
//! scrolls through the wrapped history without re-wrapping, and re-wraps
//! incrementally when the viewport resizes. Measuring and drawing are
//! injected capabilities ([`TextMeasurer`], [`Renderer`]), so the engine is
//! backend-agnostic: the same buffer drives a pixel surface or a terminal
//! cell grid.
//!
//! # Example
//!
//! ```
//! use reflow::{
//!     CellMeasurer, FlowContext, FlowOptions, Point, ReflowBuffer, Renderer, Rgba, Style,
//!     Viewport,
//! };
//! use std::sync::Arc;
//!
//! struct Stdout;
//!
//! impl Renderer for Stdout {
//!     fn draw(&mut self, _: &Style, text: &str, _: Rgba, _: Option<Rgba>, pos: Point) {
//!         println!("{},{}: {text}", pos.x, pos.y);
//!     }
//! }
//!
//! let context = Arc::new(FlowContext::new());
//! let flow = ReflowBuffer::new(Arc::clone(&context), FlowOptions::default());
//! let style = context.intern_style(Style::new("monospace", 20));
//!
//! flow.append_text("hello wrapping world", &style);
//!
//! // The driver repaints only when something changed.
//! if context.take_dirty() {
//!     flow.render(&mut Stdout, &CellMeasurer::new(10, 20), Viewport::new(0, 0, 100, 60))
//!         .unwrap();
//! }
//! ```

// Crate-level lint configuration
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::cast_precision_loss)] // Intentional for pin math
#![allow(clippy::module_name_repetitions)] // Allow FlowOptions etc
#![allow(clippy::missing_errors_doc)] // Errors documented where non-obvious
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod breaks;
pub mod color;
pub mod error;
pub mod event;
pub mod flow;
pub mod line;
pub mod measure;
pub mod run;
pub mod style;
pub mod textbox;
pub mod viewport;

// Re-export core types at crate root
pub use breaks::{BreakPolicy, DEFAULT_CONTINUATION, DEFAULT_SPLIT_AFTER, DEFAULT_SPLIT_BEFORE};
pub use color::Rgba;
pub use error::{Error, Result};
pub use event::{LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};
pub use flow::{DEFAULT_TEXT_COLOR, FlowContext, FlowOptions, ReflowBuffer};
pub use line::{FillOutcome, Line};
pub use measure::{CellMeasurer, Point, Renderer, Size, TextMeasurer};
pub use run::{RunId, RunPool, Segment, SplitOutcome, StyledRun};
pub use style::{FontAttributes, Style, StyleCache, StyleEdit};
pub use textbox::{DEFAULT_BORDER_COLOR, DEFAULT_BORDER_WIDTH, TextBox, TextBoxOptions};
pub use viewport::Viewport;
