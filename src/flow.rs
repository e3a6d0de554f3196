//! The reflow engine: pending runs, wrapped lines, and the scroll window.
//!
//! [`ReflowBuffer`] owns a queue of not-yet-wrapped runs, a deque of wrapped
//! [`Line`]s, and a scroll offset counting lines back from the newest.
//! Wrapping is lazy: appends only enqueue, and `render` wraps just enough
//! lines to cover the viewport. Resizing decomposes every line back into
//! runs and re-queues them (`invalidate_wrap`), so repeated appends between
//! renders cost O(appended), and scrolling never re-wraps at all.
//!
//! Two locks guard the buffer: a content lock over the pool/queues/lines
//! and an inner scroll lock over the offset. `render` holds both so a frame
//! is atomic with respect to concurrent `append_runs`/`scroll_lines` calls
//! from an input thread. Redundant redraws are coalesced through the dirty
//! flag on the shared [`FlowContext`].

use std::collections::{HashSet, VecDeque};
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::breaks::BreakPolicy;
use crate::color::Rgba;
use crate::error::Result;
use crate::event::{LogLevel, emit_event, emit_log};
use crate::line::Line;
use crate::measure::{Point, Renderer, TextMeasurer};
use crate::run::{RunId, RunPool, Segment, StyledRun};
use crate::style::{Style, StyleCache};
use crate::viewport::Viewport;

/// Default color for text appended through [`ReflowBuffer::append_text`].
pub const DEFAULT_TEXT_COLOR: Rgba = Rgba::WHITE;

/// Constructor options for a [`ReflowBuffer`].
#[derive(Clone, Debug)]
pub struct FlowOptions {
    /// Color given to runs created by [`ReflowBuffer::append_text`].
    pub text_color: Rgba,
    /// Break rules used when splitting runs.
    pub break_policy: BreakPolicy,
    /// Start with the scroll window anchored as new lines arrive.
    pub scroll_locked: bool,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            text_color: DEFAULT_TEXT_COLOR,
            break_policy: BreakPolicy::default(),
            scroll_locked: false,
        }
    }
}

/// Shared per-process context: the redraw dirty flag and the style cache.
///
/// One context is created at startup and shared (via `Arc`) by every buffer
/// and the render driver. Any buffer mutation sets the dirty flag; the
/// driver calls [`take_dirty`](Self::take_dirty) to decide whether the
/// surface needs repainting. Wrap bookkeeping inside `render` proceeds
/// regardless of the flag.
#[derive(Debug, Default)]
pub struct FlowContext {
    dirty: AtomicBool,
    styles: Mutex<StyleCache>,
}

impl FlowContext {
    /// Create a fresh context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the dirty flag.
    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    /// Read the dirty flag without clearing it.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Read and clear the dirty flag.
    #[must_use]
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }

    /// Intern a style into the shared cache.
    pub fn intern_style(&self, style: Style) -> Arc<Style> {
        self.styles.lock().expect("style cache lock").intern(style)
    }

    /// Number of distinct styles interned so far.
    #[must_use]
    pub fn style_count(&self) -> usize {
        self.styles.lock().expect("style cache lock").len()
    }
}

#[derive(Debug, Default)]
struct FlowState {
    pool: RunPool,
    pending: VecDeque<RunId>,
    lines: VecDeque<Line>,
    /// Continuation produced by the newest line's split, consumed when the
    /// next line is filled.
    carry: Option<(RunId, Segment)>,
    total_height: u32,
    viewport: Option<Viewport>,
}

#[derive(Debug, Default)]
struct ScrollState {
    offset: usize,
    locked: bool,
}

/// Incremental text-layout engine over a scrollable line history.
pub struct ReflowBuffer {
    context: Arc<FlowContext>,
    text_color: Rgba,
    policy: BreakPolicy,
    content: Mutex<FlowState>,
    scroll: Mutex<ScrollState>,
}

impl ReflowBuffer {
    /// Create a buffer sharing `context` with the render driver.
    #[must_use]
    pub fn new(context: Arc<FlowContext>, options: FlowOptions) -> Self {
        Self {
            context,
            text_color: options.text_color,
            policy: options.break_policy,
            content: Mutex::new(FlowState::default()),
            scroll: Mutex::new(ScrollState {
                offset: 0,
                locked: options.scroll_locked,
            }),
        }
    }

    /// The shared context.
    #[must_use]
    pub fn context(&self) -> &Arc<FlowContext> {
        &self.context
    }

    /// The break policy in effect.
    #[must_use]
    pub fn break_policy(&self) -> &BreakPolicy {
        &self.policy
    }

    /// Enqueue runs for wrapping. Nothing is laid out until the next
    /// `render`.
    pub fn append_runs(&self, runs: impl IntoIterator<Item = StyledRun>) {
        {
            let mut state = self.content.lock().expect("content lock");
            for run in runs {
                state.pending.push_back(run.id());
                state.pool.insert(run.id(), run);
            }
        }
        self.context.mark_dirty();
    }

    /// Enqueue a single run over `text` using the buffer's default text
    /// color. Returns the run's identity.
    pub fn append_text(&self, text: impl Into<String>, style: &Arc<Style>) -> RunId {
        let run = StyledRun::new(text, Arc::clone(style)).with_color(self.text_color);
        let id = run.id();
        self.append_runs([run]);
        id
    }

    /// Scroll by `delta` lines (positive scrolls into history), clamped to
    /// `[0, line_count]`. Never triggers rewrapping.
    pub fn scroll_lines(&self, delta: isize) {
        {
            let state = self.content.lock().expect("content lock");
            let mut scroll = self.scroll.lock().expect("scroll lock");
            let max = state.lines.len() as isize;
            let target = scroll.offset as isize + delta;
            scroll.offset = target.clamp(0, max) as usize;
        }
        self.context.mark_dirty();
    }

    /// Current scroll offset in lines back from the newest.
    #[must_use]
    pub fn scroll_offset(&self) -> usize {
        self.scroll.lock().expect("scroll lock").offset
    }

    /// Anchor (or release) the visible window while new lines arrive.
    pub fn set_scroll_lock(&self, locked: bool) {
        self.scroll.lock().expect("scroll lock").locked = locked;
    }

    /// Number of wrapped lines currently materialized.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.content.lock().expect("content lock").lines.len()
    }

    /// Number of runs waiting to be wrapped.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.content.lock().expect("content lock").pending.len()
    }

    /// Number of runs owned by the buffer.
    #[must_use]
    pub fn run_count(&self) -> usize {
        self.content.lock().expect("content lock").pool.len()
    }

    /// Whether the buffer holds no text at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.lock().expect("content lock").pool.is_empty()
    }

    /// The viewport recorded by the most recent `render`.
    #[must_use]
    pub fn last_viewport(&self) -> Option<Viewport> {
        self.content.lock().expect("content lock").viewport
    }

    /// Run identities reachable from wrapped lines and the pending queue,
    /// in layout order, duplicates included (a split run appears in both).
    #[must_use]
    pub fn reachable_runs(&self) -> Vec<RunId> {
        let state = self.content.lock().expect("content lock");
        state
            .lines
            .iter()
            .flat_map(|line| line.run_ids().iter().copied())
            .chain(state.pending.iter().copied())
            .collect()
    }

    /// Throw away the current wrapping and re-queue every run, full text
    /// restored, for layout at the next render.
    ///
    /// Each run survives exactly once regardless of how many lines it
    /// spanned: lines are decomposed oldest-first, then the old pending
    /// queue is appended, de-duplicated by identity.
    pub fn invalidate_wrap(&self) {
        {
            let mut state = self.content.lock().expect("content lock");
            let FlowState {
                pool,
                pending,
                lines,
                carry,
                total_height,
                ..
            } = &mut *state;

            let drained: Vec<RunId> = lines
                .drain(..)
                .flat_map(Line::into_runs)
                .chain(pending.drain(..))
                .collect();

            let mut seen: HashSet<RunId> = HashSet::with_capacity(drained.len());
            let mut rebuilt: VecDeque<RunId> = VecDeque::with_capacity(drained.len());
            for id in drained {
                if !seen.insert(id) {
                    continue;
                }
                match pool.get_mut(&id) {
                    Some(run) => {
                        run.reset();
                        rebuilt.push_back(id);
                    }
                    None => {
                        debug_assert!(false, "run {id:?} missing from pool during rewrap");
                        emit_log(LogLevel::Warn, "dropping unknown run during rewrap");
                    }
                }
            }

            *pending = rebuilt;
            *carry = None;
            *total_height = 0;
        }
        self.context.mark_dirty();
        emit_event("rewrap", "{}");
    }

    /// Drop all text, wrapped and pending, and reset the scroll.
    pub fn clear(&self) {
        {
            let mut state = self.content.lock().expect("content lock");
            *state = FlowState::default();
        }
        self.scroll.lock().expect("scroll lock").offset = 0;
        self.context.mark_dirty();
        emit_event("clear", "{}");
    }

    /// Lay out and draw one frame.
    ///
    /// In order: record the viewport, compute the visible window implied by
    /// the scroll offset, wrap pending runs until the window's height
    /// budget is spent (new lines always append at the bottom), recompute
    /// the window, then draw it top-down, stopping before the first line
    /// whose bottom edge would leave the viewport.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidViewport`](crate::Error::InvalidViewport) for
    /// negative dimensions; [`Error::Measurement`](crate::Error::Measurement)
    /// if the measurer fails, in which case the failing line's fill is
    /// undone and a retry next frame is safe.
    pub fn render(
        &self,
        renderer: &mut dyn Renderer,
        measurer: &dyn TextMeasurer,
        viewport: Viewport,
    ) -> Result<()> {
        viewport.validate()?;
        let mut state = self.content.lock().expect("content lock");
        let mut scroll = self.scroll.lock().expect("scroll lock");
        let state = &mut *state;
        let scroll = &mut *scroll;

        state.viewport = Some(viewport);

        scroll.offset = scroll.offset.min(state.lines.len());
        let (_, height) = window_range(&state.lines, scroll.offset, viewport.height_units());
        state.total_height = height;

        wrap_pending(state, scroll, measurer, &self.policy, viewport)?;

        scroll.offset = scroll.offset.min(state.lines.len());
        let (window, _) = window_range(&state.lines, scroll.offset, viewport.height_units());

        let FlowState { lines, pool, .. } = state;
        let mut y = viewport.y;
        for line in lines.range(window) {
            if y + line.height() as i32 > viewport.bottom() {
                break;
            }
            line.render(renderer, measurer, pool, Point::new(viewport.x, y))?;
            y += line.height() as i32;
        }
        Ok(())
    }
}

/// The visible window: skip `offset` lines back from the newest, then
/// extend toward older lines while the height budget lasts. Returns the
/// index range (oldest-first) and its summed height.
fn window_range(lines: &VecDeque<Line>, offset: usize, max_height: u32) -> (Range<usize>, u32) {
    let end = lines.len() - offset.min(lines.len());
    let mut start = end;
    let mut height = 0u32;
    while start > 0 {
        let h = lines[start - 1].height();
        if height + h > max_height {
            break;
        }
        height += h;
        start -= 1;
    }
    (start..end, height)
}

/// Wrap pending runs into lines until the height budget is spent.
///
/// Only the first line of a pass may be a recycled (still open) newest
/// line; every later line starts fresh. A line whose height would overflow
/// the budget is undone, not committed.
fn wrap_pending(
    state: &mut FlowState,
    scroll: &mut ScrollState,
    measurer: &dyn TextMeasurer,
    policy: &BreakPolicy,
    viewport: Viewport,
) -> Result<()> {
    let box_width = viewport.width_units();
    let box_height = viewport.height_units();
    if box_width == 0 || box_height == 0 {
        return Ok(());
    }

    let mut first = true;
    while !state.pending.is_empty() && state.total_height < box_height {
        let (mut line, recycled) = if first {
            next_line(state, scroll)
        } else {
            (Line::new(), false)
        };
        first = false;

        let seed = state.carry.take();
        if let Some((id, segment)) = &seed {
            line.seed_segment(*id, segment.clone());
        }

        let outcome = match line.fill(
            &mut state.pending,
            &mut state.pool,
            measurer,
            policy,
            box_width,
        ) {
            Ok(outcome) => outcome,
            Err(e) => {
                undo_line(state, line, seed);
                return Err(e);
            }
        };

        if line.is_empty() {
            // Nothing fits, e.g. a single glyph wider than the box.
            undo_line(state, line, seed);
            emit_log(
                LogLevel::Warn,
                "pending content cannot fit the viewport width",
            );
            break;
        }

        let height_with_line = state.total_height + line.height();
        if height_with_line > box_height {
            undo_line(state, line, seed);
            break;
        }

        state.total_height = height_with_line;
        state.lines.push_back(line);
        if scroll.locked && !recycled {
            scroll.offset += 1;
        }
        state.carry = outcome.leftover;
    }
    Ok(())
}

/// The line to fill next: recycle the newest line while the window is
/// unscrolled and that line is still open (no partial segments, no hard
/// break), otherwise start fresh.
fn next_line(state: &mut FlowState, scroll: &ScrollState) -> (Line, bool) {
    if scroll.offset == 0 {
        let open = state
            .lines
            .back()
            .is_some_and(|line| !line.ends_in_hard_break() && !line.has_segments());
        if open {
            let line = state.lines.pop_back().expect("open newest line");
            state.total_height = state.total_height.saturating_sub(line.height());
            return (line, true);
        }
    }
    (Line::new(), false)
}

/// Undo an uncommitted fill: runs return to the front of `pending` and get
/// their pre-fill segments back (the seed continuation for the run that
/// carried one, full text for the rest).
fn undo_line(state: &mut FlowState, line: Line, seed: Option<(RunId, Segment)>) {
    let ids = line.into_runs();
    for id in ids.iter().rev() {
        if state.pending.front() != Some(id) {
            state.pending.push_front(*id);
        }
    }
    for id in &ids {
        if let Some(run) = state.pool.get_mut(id) {
            match &seed {
                Some((seed_id, segment)) if seed_id == id => run.apply_segment(segment.clone()),
                _ => run.reset(),
            }
        }
    }
    state.carry = seed;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::measure::{CellMeasurer, Size};

    struct Recording(Vec<(String, i32, i32)>);

    impl Recording {
        fn new() -> Self {
            Self(Vec::new())
        }

        fn texts(&self) -> Vec<&str> {
            self.0.iter().map(|(t, _, _)| t.as_str()).collect()
        }
    }

    impl Renderer for Recording {
        fn draw(
            &mut self,
            _style: &Style,
            text: &str,
            _color: Rgba,
            _highlight: Option<Rgba>,
            pos: Point,
        ) {
            self.0.push((text.to_string(), pos.x, pos.y));
        }
    }

    struct Failing;

    impl TextMeasurer for Failing {
        fn measure(&self, _style: &Style, _text: &str) -> Result<Size> {
            Err(Error::Measurement("backend gone".into()))
        }
    }

    fn buffer() -> ReflowBuffer {
        ReflowBuffer::new(Arc::new(FlowContext::new()), FlowOptions::default())
    }

    fn mono_style() -> Arc<Style> {
        Arc::new(Style::new("monospace", 20))
    }

    #[test]
    fn test_append_is_lazy() {
        let flow = buffer();
        flow.append_text("hello world", &mono_style());
        assert_eq!(flow.line_count(), 0);
        assert_eq!(flow.pending_count(), 1);

        let mut renderer = Recording::new();
        flow.render(
            &mut renderer,
            &CellMeasurer::new(10, 20),
            Viewport::new(0, 0, 200, 100),
        )
        .unwrap();
        assert_eq!(flow.line_count(), 1);
        assert_eq!(flow.pending_count(), 0);
        assert_eq!(renderer.texts(), vec!["hello world"]);
    }

    #[test]
    fn test_render_wraps_to_viewport_width() {
        let flow = buffer();
        flow.append_text("aaaa bbbb cccc", &mono_style());

        let mut renderer = Recording::new();
        flow.render(
            &mut renderer,
            &CellMeasurer::new(10, 20),
            Viewport::new(0, 0, 50, 100),
        )
        .unwrap();

        assert_eq!(renderer.texts(), vec!["aaaa ", "bbbb ", "cccc"]);
        let ys: Vec<i32> = renderer.0.iter().map(|(_, _, y)| *y).collect();
        assert_eq!(ys, vec![0, 20, 40]);
    }

    #[test]
    fn test_zero_viewport_retains_pending() {
        let flow = buffer();
        flow.append_text("hello", &mono_style());

        let mut renderer = Recording::new();
        flow.render(
            &mut renderer,
            &CellMeasurer::new(10, 20),
            Viewport::new(0, 0, 0, 0),
        )
        .unwrap();

        assert!(renderer.0.is_empty());
        assert_eq!(flow.pending_count(), 1);
        assert_eq!(flow.line_count(), 0);
    }

    #[test]
    fn test_negative_viewport_rejected() {
        let flow = buffer();
        let mut renderer = Recording::new();
        let err = flow.render(
            &mut renderer,
            &CellMeasurer::new(10, 20),
            Viewport::new(0, 0, -5, 10),
        );
        assert!(matches!(err, Err(Error::InvalidViewport { .. })));
    }

    #[test]
    fn test_wrap_stops_at_height_budget() {
        let flow = buffer();
        for _ in 0..10 {
            flow.append_text("xxxx", &mono_style()); // one 40-wide line each
        }

        let mut renderer = Recording::new();
        // Height fits exactly two 20-tall lines.
        flow.render(
            &mut renderer,
            &CellMeasurer::new(10, 20),
            Viewport::new(0, 0, 50, 40),
        )
        .unwrap();

        assert_eq!(flow.line_count(), 2);
        assert_eq!(flow.pending_count(), 8);
        assert_eq!(renderer.texts(), vec!["xxxx", "xxxx"]);
    }

    #[test]
    fn test_recycles_open_newest_line() {
        let flow = buffer();
        let measurer = CellMeasurer::new(10, 20);
        let viewport = Viewport::new(0, 0, 100, 100);

        flow.append_text("ab", &mono_style());
        flow.render(&mut Recording::new(), &measurer, viewport).unwrap();
        assert_eq!(flow.line_count(), 1);

        flow.append_text("cd", &mono_style());
        let mut renderer = Recording::new();
        flow.render(&mut renderer, &measurer, viewport).unwrap();

        assert_eq!(flow.line_count(), 1);
        assert_eq!(renderer.texts(), vec!["ab", "cd"]);
        assert_eq!(renderer.0[1].1, 20); // second run drawn after the first
    }

    #[test]
    fn test_split_run_continues_on_next_line() {
        let flow = buffer();
        flow.append_text("aaa-bbbb", &mono_style());

        let mut renderer = Recording::new();
        flow.render(
            &mut renderer,
            &CellMeasurer::new(12, 24),
            Viewport::new(0, 0, 50, 100),
        )
        .unwrap();

        assert_eq!(renderer.texts(), vec!["aaa-", "bbbb"]);
        assert_eq!(flow.line_count(), 2);
        assert_eq!(flow.run_count(), 1);
    }

    #[test]
    fn test_scroll_bounds_clamp() {
        let flow = buffer();
        for _ in 0..3 {
            flow.append_text("xxxx", &mono_style());
        }
        flow.render(
            &mut Recording::new(),
            &CellMeasurer::new(10, 20),
            Viewport::new(0, 0, 50, 100),
        )
        .unwrap();
        assert_eq!(flow.line_count(), 3);

        flow.scroll_lines(100);
        assert_eq!(flow.scroll_offset(), 3);
        flow.scroll_lines(-1);
        assert_eq!(flow.scroll_offset(), 2);
        flow.scroll_lines(-100);
        assert_eq!(flow.scroll_offset(), 0);
    }

    #[test]
    fn test_scroll_lock_keeps_window_anchored() {
        let flow = buffer();
        let measurer = CellMeasurer::new(10, 20);
        // Fits exactly two lines.
        let viewport = Viewport::new(0, 0, 50, 40);

        flow.append_text("aaaa", &mono_style());
        flow.append_text("bbbb", &mono_style());
        flow.render(&mut Recording::new(), &measurer, viewport).unwrap();
        assert_eq!(flow.line_count(), 2);

        flow.append_text("cccc", &mono_style());
        flow.scroll_lines(1);
        flow.set_scroll_lock(true);

        let mut renderer = Recording::new();
        flow.render(&mut renderer, &measurer, viewport).unwrap();

        // "cccc" wrapped below the window, which stayed on the old line.
        assert_eq!(flow.line_count(), 3);
        assert_eq!(flow.scroll_offset(), 2);
        assert_eq!(renderer.texts(), vec!["aaaa"]);
    }

    #[test]
    fn test_invalidate_wrap_preserves_each_run_once() {
        let flow = buffer();
        flow.append_text("aaa-bbbbb ", &mono_style());
        flow.append_text("cc", &mono_style());
        // Narrow viewport: the first run spans several lines.
        flow.render(
            &mut Recording::new(),
            &CellMeasurer::new(12, 24),
            Viewport::new(0, 0, 50, 200),
        )
        .unwrap();
        assert!(flow.line_count() >= 3);

        flow.invalidate_wrap();

        let reachable = flow.reachable_runs();
        let unique: HashSet<RunId> = reachable.iter().copied().collect();
        assert_eq!(reachable.len(), unique.len());
        assert_eq!(unique.len(), flow.run_count());
        assert_eq!(flow.line_count(), 0);

        // A wide re-render lays the restored full runs out again.
        let mut renderer = Recording::new();
        flow.render(
            &mut renderer,
            &CellMeasurer::new(12, 24),
            Viewport::new(0, 0, 200, 200),
        )
        .unwrap();
        assert_eq!(renderer.texts(), vec!["aaa-bbbbb ", "cc"]);
    }

    #[test]
    fn test_measurement_failure_is_retryable() {
        let flow = buffer();
        flow.append_text("hello world", &mono_style());

        let err = flow.render(
            &mut Recording::new(),
            &Failing,
            Viewport::new(0, 0, 50, 100),
        );
        assert!(matches!(err, Err(Error::Measurement(_))));
        assert_eq!(flow.line_count(), 0);
        assert_eq!(flow.pending_count(), 1);

        let mut renderer = Recording::new();
        flow.render(
            &mut renderer,
            &CellMeasurer::new(10, 20),
            Viewport::new(0, 0, 200, 100),
        )
        .unwrap();
        assert_eq!(renderer.texts(), vec!["hello world"]);
    }

    #[test]
    fn test_overwide_glyph_pauses_wrap() {
        let flow = buffer();
        flow.append_text("x", &mono_style());

        let mut renderer = Recording::new();
        flow.render(
            &mut renderer,
            &CellMeasurer::new(60, 20),
            Viewport::new(0, 0, 50, 100),
        )
        .unwrap();

        assert!(renderer.0.is_empty());
        assert_eq!(flow.pending_count(), 1);
        assert_eq!(flow.line_count(), 0);
    }

    #[test]
    fn test_dirty_flag_coalesces_redraws() {
        let context = Arc::new(FlowContext::new());
        let flow = ReflowBuffer::new(Arc::clone(&context), FlowOptions::default());
        assert!(!context.is_dirty());

        flow.append_text("hi", &mono_style());
        assert!(context.is_dirty());
        assert!(context.take_dirty());
        assert!(!context.is_dirty());

        flow.scroll_lines(1);
        assert!(context.take_dirty());
    }

    #[test]
    fn test_clear_drops_everything() {
        let flow = buffer();
        flow.append_text("hello", &mono_style());
        flow.render(
            &mut Recording::new(),
            &CellMeasurer::new(10, 20),
            Viewport::new(0, 0, 100, 100),
        )
        .unwrap();

        flow.clear();
        assert!(flow.is_empty());
        assert_eq!(flow.line_count(), 0);
        assert_eq!(flow.scroll_offset(), 0);
    }

    #[test]
    fn test_buffer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReflowBuffer>();
        assert_send_sync::<FlowContext>();
    }

    #[test]
    fn test_hard_break_starts_a_new_line() {
        let flow = buffer();
        let style = mono_style();
        flow.append_runs([
            StyledRun::new("ab", Arc::clone(&style)).with_hard_break(),
            StyledRun::new("cd", Arc::clone(&style)),
        ]);

        let mut renderer = Recording::new();
        flow.render(
            &mut renderer,
            &CellMeasurer::new(10, 20),
            Viewport::new(0, 0, 100, 100),
        )
        .unwrap();

        assert_eq!(flow.line_count(), 2);
        assert_eq!(renderer.texts(), vec!["ab", "cd"]);
        let ys: Vec<i32> = renderer.0.iter().map(|(_, _, y)| *y).collect();
        assert_eq!(ys, vec![0, 20]);
    }
}
