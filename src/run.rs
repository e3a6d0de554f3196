//! Styled text runs: the unit of appended text.
//!
//! A [`StyledRun`] owns an immutable string plus a mutable *active segment*,
//! the slice currently assigned to a line. Splitting a run across a line
//! boundary narrows the active segment and hands the remainder back to the
//! caller; [`reset`](StyledRun::reset) restores the full text. Runs are
//! tracked by [`RunId`] identity, never by value, so the same run can sit in
//! a committed line and in the pending queue while split.
//!
//! # Examples
//!
//! ```
//! use reflow::{BreakPolicy, CellMeasurer, Style, StyledRun};
//! use std::sync::Arc;
//!
//! let measurer = CellMeasurer::new(12, 24);
//! let policy = BreakPolicy::default();
//! let style = Arc::new(Style::new("courier new", 20));
//!
//! let mut run = StyledRun::new("aaa-bbbbb", Arc::clone(&style));
//! let outcome = run.split(&measurer, &policy, 50, 50).unwrap();
//! assert_eq!(run.active_text(), "aaa-");
//! assert_eq!(run.segment_text(&outcome.leftover.unwrap()), "bbbbb");
//!
//! let mut run = StyledRun::new("aaa(bbbbb)", style);
//! let outcome = run.split(&measurer, &policy, 50, 50).unwrap();
//! assert_eq!(run.active_text(), "aaa");
//! assert_eq!(run.segment_text(&outcome.leftover.unwrap()), "(bbbbb)");
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use unicode_segmentation::UnicodeSegmentation;

use crate::breaks::BreakPolicy;
use crate::color::Rgba;
use crate::error::Result;
use crate::measure::{Size, TextMeasurer};
use crate::style::Style;

/// Stable, opaque run identity.
///
/// Allocated from a monotonic counter at construction; survives every
/// content mutation and is usable as a map key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RunId(u64);

impl RunId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A slice of a run's text, optionally carrying a continuation marker.
///
/// The marker (typically `-`) is rendered and measured after the slice but
/// is not part of the stored text; it exists only on force-split prefixes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Byte range into the run's full text.
    pub range: Range<usize>,
    /// Continuation marker appended when rendering this slice.
    pub marker: Option<char>,
}

impl Segment {
    /// Segment covering `range` with no marker.
    #[must_use]
    pub fn new(range: Range<usize>) -> Self {
        Self {
            range,
            marker: None,
        }
    }

    /// Segment covering `range` followed by a continuation marker.
    #[must_use]
    pub fn with_marker(range: Range<usize>, marker: char) -> Self {
        Self {
            range,
            marker: Some(marker),
        }
    }

    /// Whether the segment renders as nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty() && self.marker.is_none()
    }
}

/// Result of [`StyledRun::split`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitOutcome {
    /// The part that fits on the current line, if any.
    pub fitted: Option<Segment>,
    /// The part that flows to the next line, if any. When `fitted` is
    /// `None` the run itself is left untouched and simply defers.
    pub leftover: Option<Segment>,
}

/// A contiguous span of text sharing one style.
#[derive(Clone, Debug)]
pub struct StyledRun {
    id: RunId,
    text: String,
    active: Segment,
    style: Arc<Style>,
    color: Rgba,
    highlight: Option<Rgba>,
    hard_break: bool,
}

impl StyledRun {
    /// Create a run over `text` drawn with `style`.
    #[must_use]
    pub fn new(text: impl Into<String>, style: Arc<Style>) -> Self {
        let text = text.into();
        let active = Segment::new(0..text.len());
        Self {
            id: RunId::next(),
            text,
            active,
            style,
            color: Rgba::WHITE,
            highlight: None,
            hard_break: false,
        }
    }

    /// Return the run with a different text color.
    #[must_use]
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Return the run with a highlight fill behind the text.
    #[must_use]
    pub fn with_highlight(mut self, highlight: Rgba) -> Self {
        self.highlight = Some(highlight);
        self
    }

    /// Return the run marked to force a line break after it.
    #[must_use]
    pub fn with_hard_break(mut self) -> Self {
        self.hard_break = true;
        self
    }

    /// The run's stable identity.
    #[must_use]
    pub fn id(&self) -> RunId {
        self.id
    }

    /// The full, immutable text.
    #[must_use]
    pub fn full_text(&self) -> &str {
        &self.text
    }

    /// The current active segment.
    #[must_use]
    pub fn active_segment(&self) -> &Segment {
        &self.active
    }

    /// The style handle.
    #[must_use]
    pub fn style(&self) -> &Arc<Style> {
        &self.style
    }

    /// The text color.
    #[must_use]
    pub fn color(&self) -> Rgba {
        self.color
    }

    /// The highlight fill, if any.
    #[must_use]
    pub fn highlight(&self) -> Option<Rgba> {
        self.highlight
    }

    /// Whether the run forces a line break after it.
    #[must_use]
    pub fn is_hard_break(&self) -> bool {
        self.hard_break
    }

    /// Rendered text of the active segment (marker included).
    #[must_use]
    pub fn active_text(&self) -> Cow<'_, str> {
        self.segment_text(&self.active)
    }

    /// Rendered text of an arbitrary segment of this run.
    #[must_use]
    pub fn segment_text(&self, segment: &Segment) -> Cow<'_, str> {
        let slice = &self.text[segment.range.clone()];
        match segment.marker {
            None => Cow::Borrowed(slice),
            Some(marker) => {
                let mut owned = String::with_capacity(slice.len() + marker.len_utf8());
                owned.push_str(slice);
                owned.push(marker);
                Cow::Owned(owned)
            }
        }
    }

    /// Install a segment override (e.g. a continuation stored by a line).
    pub fn apply_segment(&mut self, segment: Segment) {
        debug_assert!(
            self.text.is_char_boundary(segment.range.start)
                && segment.range.end <= self.text.len()
                && self.text.is_char_boundary(segment.range.end),
            "segment {:?} not on char boundaries of {:?}",
            segment.range,
            self.text,
        );
        self.active = segment;
    }

    /// Restore the active segment to the full text.
    pub fn reset(&mut self) {
        self.active = Segment::new(0..self.text.len());
    }

    /// Measure the active segment with the injected measurer.
    ///
    /// # Errors
    ///
    /// Propagates measurer failure.
    pub fn measure(&self, measurer: &dyn TextMeasurer) -> Result<Size> {
        measurer.measure(&self.style, &self.active_text())
    }

    /// Split the active segment so a best-fit prefix fits `remaining_width`.
    ///
    /// Candidates are collected left to right: a break is allowed after a
    /// split-after character or before a split-before character (never
    /// before the first grapheme of a fresh line), provided the prefix fits.
    /// Among valid candidates the policy's priority order decides, not
    /// position. With no candidate the run either defers whole (mid-line,
    /// defer enabled) or force-splits with a continuation marker.
    ///
    /// On a real split the active segment shrinks to the fitted part; a
    /// deferred run is left untouched.
    ///
    /// # Errors
    ///
    /// Propagates measurer failure; the run is unchanged in that case.
    pub fn split(
        &mut self,
        measurer: &dyn TextMeasurer,
        policy: &BreakPolicy,
        remaining_width: u32,
        box_width: u32,
    ) -> Result<SplitOutcome> {
        let base = self.active.range.clone();
        let slice = &self.text[base.clone()];
        let fresh_line = remaining_width >= box_width;

        // Rightmost valid cut per break character; rank picks among them.
        let mut candidates: HashMap<char, usize> = HashMap::new();
        for (idx, grapheme) in slice.grapheme_indices(true) {
            let Some(ch) = grapheme.chars().next() else {
                continue;
            };
            let cut = if policy.splits_after(ch) {
                idx + grapheme.len()
            } else if idx == 0 && fresh_line {
                // A line must start with at least one grapheme of content.
                continue;
            } else {
                idx
            };
            let width = measurer.measure(&self.style, &slice[..cut])?.width;
            if width > remaining_width {
                break;
            }
            if policy.splits_after(ch) || policy.splits_before(ch) {
                candidates.insert(ch, cut);
            }
        }

        let best = candidates
            .into_iter()
            .filter_map(|(ch, cut)| policy.rank(ch).map(|rank| (rank, cut)))
            .min_by_key(|&(rank, _)| rank);

        if let Some((_, cut)) = best {
            if cut == 0 {
                // Nothing fits before the break; the whole run defers.
                return Ok(self.deferred());
            }
            let fitted = Segment::new(base.start..base.start + cut);
            let rest = base.start + cut..base.end;
            self.active = fitted.clone();
            return Ok(SplitOutcome {
                fitted: Some(fitted),
                leftover: (!rest.is_empty()).then(|| Segment::new(rest)),
            });
        }

        if policy.defer_enabled() && !fresh_line {
            return Ok(self.deferred());
        }

        self.force_split(measurer, policy, remaining_width)
    }

    /// Split with no structural candidate: cut at the widest grapheme
    /// prefix whose text plus continuation marker still fits.
    fn force_split(
        &mut self,
        measurer: &dyn TextMeasurer,
        policy: &BreakPolicy,
        remaining_width: u32,
    ) -> Result<SplitOutcome> {
        let base = self.active.range.clone();
        let slice = &self.text[base.clone()];
        let marker = policy.continuation();

        let mut fit_len = 0;
        let mut probe = String::new();
        for (idx, grapheme) in slice.grapheme_indices(true) {
            let cut = idx + grapheme.len();
            probe.clear();
            probe.push_str(&slice[..cut]);
            probe.push(marker);
            if measurer.measure(&self.style, &probe)?.width > remaining_width {
                break;
            }
            fit_len = cut;
        }

        if fit_len == 0 {
            // Not even one grapheme plus the marker fits.
            return Ok(self.deferred());
        }
        debug_assert!(fit_len < slice.len(), "force split on a fitting run");

        let fitted = Segment::with_marker(base.start..base.start + fit_len, marker);
        let rest = base.start + fit_len..base.end;
        self.active = fitted.clone();
        Ok(SplitOutcome {
            fitted: Some(fitted),
            leftover: (!rest.is_empty()).then(|| Segment::new(rest)),
        })
    }

    fn deferred(&self) -> SplitOutcome {
        SplitOutcome {
            fitted: None,
            leftover: Some(self.active.clone()),
        }
    }
}

/// Shared storage for runs, keyed by identity.
pub type RunPool = HashMap<RunId, StyledRun>;
