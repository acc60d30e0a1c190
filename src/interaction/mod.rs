//! Cross-frame interaction state owned by the host: scroll, zoom and marker.

mod marker;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{Bounds, HorizontalDimensions, MeasureContext, Scroll};
use crate::error::{ChartError, ChartResult};

pub use marker::{MarkerEvent, MarkerTracker, MarkerVisibility, MarkerVisibilityChangeListener};

/// Where the chart is scrolled to when it is first measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InitialScroll {
    #[default]
    Start,
    End,
}

impl InitialScroll {
    #[must_use]
    pub fn scroll(self) -> Scroll {
        match self {
            Self::Start => Scroll::START,
            Self::End => Scroll::END,
        }
    }
}

/// When the initial scroll is re-applied after the model changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AutoScrollCondition {
    #[default]
    Never,
    /// Whenever the model gains entries.
    OnModelSizeIncreased,
}

/// Horizontal scroll offset, kept inside `[min(0, max), max(0, max)]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    value: f64,
    max_value: f64,
    initial_scroll: InitialScroll,
    auto_scroll_condition: AutoScrollCondition,
    initial_scroll_pending: bool,
    last_entry_count: Option<usize>,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(InitialScroll::default(), AutoScrollCondition::default())
    }
}

impl ScrollState {
    #[must_use]
    pub fn new(initial_scroll: InitialScroll, auto_scroll_condition: AutoScrollCondition) -> Self {
        Self {
            value: 0.0,
            max_value: 0.0,
            initial_scroll,
            auto_scroll_condition,
            initial_scroll_pending: true,
            last_entry_count: None,
        }
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    #[must_use]
    pub fn initial_scroll(&self) -> InitialScroll {
        self.initial_scroll
    }

    #[must_use]
    pub fn auto_scroll_condition(&self) -> AutoScrollCondition {
        self.auto_scroll_condition
    }

    fn range(&self) -> (f64, f64) {
        (self.max_value.min(0.0), self.max_value.max(0.0))
    }

    fn clamp(&self, value: f64) -> f64 {
        let (lower, upper) = self.range();
        if value.is_finite() {
            value.clamp(lower, upper)
        } else {
            0.0
        }
    }

    /// Stores a new maximum and pulls the current value back inside it.
    pub fn update_max_value(&mut self, max_value: f64) {
        self.max_value = if max_value.is_finite() { max_value } else { 0.0 };
        let clamped = self.clamp(self.value);
        if clamped != self.value {
            trace!(from = self.value, to = clamped, "clamped scroll after max change");
            self.value = clamped;
        }
    }

    /// Records the model size seen by a measure pass and reports whether the
    /// initial scroll should be applied now.
    ///
    /// An empty model defers the initial scroll until entries arrive.
    pub fn note_entry_count(&mut self, entry_count: usize) -> bool {
        let grew = self
            .last_entry_count
            .is_some_and(|previous| entry_count > previous);
        self.last_entry_count = Some(entry_count);
        if entry_count == 0 {
            return false;
        }
        let apply = self.initial_scroll_pending
            || (grew && self.auto_scroll_condition == AutoScrollCondition::OnModelSizeIncreased);
        self.initial_scroll_pending = false;
        apply
    }

    /// Applies `scroll`, clamps the result and returns the delta consumed.
    pub fn scroll(
        &mut self,
        scroll: Scroll,
        context: &MeasureContext,
        dimensions: HorizontalDimensions,
        bounds: Bounds,
    ) -> f64 {
        let delta = scroll.delta_from(context, dimensions, bounds, self.max_value, self.value);
        let target = self.clamp(self.value + delta);
        let consumed = target - self.value;
        debug!(
            requested = delta,
            consumed,
            value = target,
            max_value = self.max_value,
            "applied scroll"
        );
        self.value = target;
        consumed
    }
}

/// Zoom multiplier applied to the scalable horizontal dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomState {
    value: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self {
            value: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl ZoomState {
    pub fn new(min_zoom: f64, max_zoom: f64) -> ChartResult<Self> {
        if !min_zoom.is_finite() || !max_zoom.is_finite() || min_zoom <= 0.0 || min_zoom > max_zoom
        {
            return Err(ChartError::InvalidConfig(format!(
                "zoom limits must be finite with 0 < min <= max (min={min_zoom}, max={max_zoom})"
            )));
        }
        Ok(Self {
            value: 1.0_f64.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
        })
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    #[must_use]
    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// Raises the lower limit, e.g. so full-width content never shrinks below
    /// the chart width.
    pub fn ensure_min_zoom(&mut self, min_zoom: f64) {
        if min_zoom.is_finite() && min_zoom > 0.0 {
            let lower = min_zoom.min(self.max_zoom);
            self.value = self.value.max(lower);
            self.min_zoom = self.min_zoom.max(lower);
        }
    }

    /// Multiplies the zoom by `factor` and returns the scroll delta that keeps
    /// the content under `focal_x` in place.
    ///
    /// `focal_x` and `scroll` are distances measured forward from the chart's
    /// start edge; the returned delta is in the same terms. The first
    /// `unscalable_start_padding` pixels of content do not grow with the zoom.
    pub fn zoom_by(
        &mut self,
        factor: f64,
        focal_x: f64,
        scroll: f64,
        unscalable_start_padding: f64,
    ) -> f64 {
        if !factor.is_finite() || factor <= 0.0 {
            return 0.0;
        }
        let previous = self.value;
        self.value = (previous * factor).clamp(self.min_zoom, self.max_zoom);
        let ratio = self.value / previous;
        let delta = (scroll + focal_x - unscalable_start_padding) * (ratio - 1.0);
        trace!(from = previous, to = self.value, delta, "zoomed");
        delta
    }
}
