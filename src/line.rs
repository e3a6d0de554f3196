//! A wrapped line: runs that fit one width budget.
//!
//! Lines do not own run content; they hold [`RunId`]s into the shared pool
//! plus a per-line segment table mapping a run to the slice of it that this
//! line displays. A run that spans lines has one entry in each line's table.

use std::collections::{HashMap, VecDeque};

use crate::breaks::BreakPolicy;
use crate::error::Result;
use crate::event::{LogLevel, emit_log};
use crate::measure::{Point, Renderer, TextMeasurer};
use crate::run::{RunId, RunPool, Segment};

/// Result of [`Line::fill`].
#[derive(Clone, Debug, Default)]
pub struct FillOutcome {
    /// Continuation produced by a mid-run split: the run id (now back at
    /// the front of the pending queue) and the slice the *next* line must
    /// apply to it before measuring.
    pub leftover: Option<(RunId, Segment)>,
}

/// A row of run segments within one width budget.
#[derive(Clone, Debug, Default)]
pub struct Line {
    runs: Vec<RunId>,
    segments: HashMap<RunId, Segment>,
    width: u32,
    height: u32,
    hard_break: bool,
}

impl Line {
    /// Create an empty line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cumulative width of the fitted segments.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the tallest fitted segment.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Run ids in display order.
    #[must_use]
    pub fn run_ids(&self) -> &[RunId] {
        &self.runs
    }

    /// Whether the line holds no runs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Whether the line ends in a forced break.
    #[must_use]
    pub fn ends_in_hard_break(&self) -> bool {
        self.hard_break
    }

    /// Whether any run on this line displays a partial segment.
    #[must_use]
    pub fn has_segments(&self) -> bool {
        !self.segments.is_empty()
    }

    /// Pre-install a segment for a run about to be filled (the leftover of
    /// a split on the previous line).
    pub fn seed_segment(&mut self, id: RunId, segment: Segment) {
        self.segments.insert(id, segment);
    }

    /// Give the run ids back (for rewrap decomposition or fill undo).
    #[must_use]
    pub fn into_runs(self) -> Vec<RunId> {
        self.runs
    }

    /// Move runs from the front of `pending` into this line until the
    /// width budget is spent.
    ///
    /// Runs that fit whole are appended; a run marked as a hard break ends
    /// the line. A run that overflows is split: the fitted part (if any) is
    /// recorded in this line's segment table and the run id is pushed back
    /// to the front of `pending` to carry the remainder. Filling stops
    /// after any split, on a hard break, or when `pending` drains.
    ///
    /// # Errors
    ///
    /// Propagates measurer failure with the failing run id restored to the
    /// front of `pending`; the caller discards the partially filled line.
    pub fn fill(
        &mut self,
        pending: &mut VecDeque<RunId>,
        pool: &mut RunPool,
        measurer: &dyn TextMeasurer,
        policy: &BreakPolicy,
        box_width: u32,
    ) -> Result<FillOutcome> {
        let mut outcome = FillOutcome::default();

        while !self.hard_break {
            let Some(id) = pending.pop_front() else { break };
            let Some(run) = pool.get_mut(&id) else {
                debug_assert!(false, "pending run {id:?} missing from pool");
                emit_log(LogLevel::Warn, "dropping pending run with no pool entry");
                continue;
            };
            if let Some(segment) = self.segments.get(&id) {
                run.apply_segment(segment.clone());
            }

            let size = match run.measure(measurer) {
                Ok(size) => size,
                Err(e) => {
                    pending.push_front(id);
                    return Err(e);
                }
            };

            if self.width + size.width <= box_width {
                self.width += size.width;
                self.height = self.height.max(size.height);
                self.runs.push(id);
                if run.is_hard_break() {
                    self.hard_break = true;
                }
                continue;
            }

            let remaining = box_width - self.width;
            let split = match run.split(measurer, policy, remaining, box_width) {
                Ok(split) => split,
                Err(e) => {
                    pending.push_front(id);
                    return Err(e);
                }
            };

            if let Some(fitted) = split.fitted {
                let size = match run.measure(measurer) {
                    Ok(size) => size,
                    Err(e) => {
                        // Un-split the run so nothing is lost on retry.
                        match self.segments.get(&id) {
                            Some(seed) => run.apply_segment(seed.clone()),
                            None => run.reset(),
                        }
                        pending.push_front(id);
                        return Err(e);
                    }
                };
                self.segments.insert(id, fitted);
                self.width += size.width;
                self.height = self.height.max(size.height);
                self.runs.push(id);

                if let Some(rest) = split.leftover {
                    pending.push_front(id);
                    outcome.leftover = Some((id, rest));
                }
            } else if split.leftover.is_some() {
                // Deferred whole: the run keeps its slice, no carry needed.
                pending.push_front(id);
            }
            break;
        }

        Ok(outcome)
    }

    /// Draw the line's runs left to right starting at `origin`.
    ///
    /// # Errors
    ///
    /// Propagates measurer failure.
    pub fn render(
        &self,
        renderer: &mut dyn Renderer,
        measurer: &dyn TextMeasurer,
        pool: &mut RunPool,
        origin: Point,
    ) -> Result<()> {
        let mut x = origin.x;
        for id in &self.runs {
            let Some(run) = pool.get_mut(id) else {
                debug_assert!(false, "line run {id:?} missing from pool");
                emit_log(LogLevel::Warn, "skipping line run with no pool entry");
                continue;
            };
            if let Some(segment) = self.segments.get(id) {
                run.apply_segment(segment.clone());
            }
            let size = run.measure(measurer)?;
            let text = run.active_text();
            renderer.draw(
                run.style(),
                &text,
                run.color(),
                run.highlight(),
                Point::new(x, origin.y),
            );
            x += size.width as i32;
        }
        Ok(())
    }
}
