//! Shared test fixtures: a recording renderer and a failing measurer.

#![allow(dead_code)] // Each test binary uses a subset of the fixtures

use std::sync::Arc;

use reflow::{Error, Point, Renderer, Result, Rgba, Size, Style, TextMeasurer, Viewport};

/// One `draw` call captured by [`RecordingRenderer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawCall {
    pub text: String,
    pub x: i32,
    pub y: i32,
}

/// Renderer that records every draw call instead of painting.
#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
    pub frames: Vec<Viewport>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drawn texts in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.calls.iter().map(|c| c.text.as_str()).collect()
    }

    /// Drawn texts grouped into lines by y coordinate, top to bottom.
    pub fn lines(&self) -> Vec<Vec<&str>> {
        let mut lines: Vec<(i32, Vec<&str>)> = Vec::new();
        for call in &self.calls {
            match lines.iter_mut().find(|(y, _)| *y == call.y) {
                Some((_, texts)) => texts.push(&call.text),
                None => lines.push((call.y, vec![&call.text])),
            }
        }
        lines.sort_by_key(|(y, _)| *y);
        lines.into_iter().map(|(_, texts)| texts).collect()
    }
}

impl Renderer for RecordingRenderer {
    fn draw(
        &mut self,
        _style: &Style,
        text: &str,
        _color: Rgba,
        _highlight: Option<Rgba>,
        pos: Point,
    ) {
        self.calls.push(DrawCall {
            text: text.to_string(),
            x: pos.x,
            y: pos.y,
        });
    }

    fn draw_frame(&mut self, rect: Viewport, _color: Rgba, _width: u32) {
        self.frames.push(rect);
    }
}

/// Renderer that ignores everything.
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(
        &mut self,
        _style: &Style,
        _text: &str,
        _color: Rgba,
        _highlight: Option<Rgba>,
        _pos: Point,
    ) {
    }
}

/// Measurer whose backend is permanently gone.
pub struct FailingMeasurer;

impl TextMeasurer for FailingMeasurer {
    fn measure(&self, _style: &Style, _text: &str) -> Result<Size> {
        Err(Error::Measurement("backend unavailable".into()))
    }
}

/// A plain monospace style handle.
pub fn mono_style() -> Arc<Style> {
    Arc::new(Style::new("monospace", 20))
}
