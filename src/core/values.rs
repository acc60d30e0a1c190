use indexmap::IndexMap;
use tracing::trace;

use crate::core::{CartesianChartModel, CartesianLayerModel, VerticalAxisPosition};

const NEUTRAL_MIN: f64 = 0.0;
const NEUTRAL_MAX: f64 = 1.0;
const DEFAULT_X_STEP: f64 = 1.0;

/// Vertical value range shared by the layers of one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YRange {
    pub min_y: f64,
    pub max_y: f64,
}

impl YRange {
    #[must_use]
    pub fn new(min_y: f64, max_y: f64) -> Self {
        Self {
            min_y: min_y.min(max_y),
            max_y: min_y.max(max_y),
        }
    }

    #[must_use]
    pub fn neutral() -> Self {
        Self::new(NEUTRAL_MIN, NEUTRAL_MAX)
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn contains(self, y: f64) -> bool {
        y >= self.min_y && y <= self.max_y
    }

    fn union(self, other: Self) -> Self {
        Self::new(self.min_y.min(other.min_y), self.max_y.max(other.max_y))
    }
}

/// Value-range snapshot of a chart model, computed once per model update.
///
/// The x range and step are shared by every layer; y ranges are tracked per
/// layer group, where a group is the vertical axis the layers target (`None`
/// for layers that do not target a specific axis).
#[derive(Debug, Clone, PartialEq)]
pub struct ChartValues {
    min_x: f64,
    max_x: f64,
    x_step: f64,
    y_ranges: IndexMap<Option<VerticalAxisPosition>, YRange>,
}

impl Default for ChartValues {
    fn default() -> Self {
        Self::neutral()
    }
}

impl ChartValues {
    /// Range used when there is nothing to measure, so axes still render.
    #[must_use]
    pub fn neutral() -> Self {
        let mut y_ranges = IndexMap::new();
        y_ranges.insert(None, YRange::neutral());
        Self {
            min_x: NEUTRAL_MIN,
            max_x: NEUTRAL_MAX,
            x_step: DEFAULT_X_STEP,
            y_ranges,
        }
    }

    #[must_use]
    pub fn from_model(model: &CartesianChartModel) -> Self {
        let mut x_bounds: Option<(f64, f64)> = None;
        let mut y_ranges: IndexMap<Option<VerticalAxisPosition>, YRange> = IndexMap::new();
        let mut step_override: Option<f64> = None;

        for layer in model.layers() {
            let bounds = LayerBounds::resolve(layer);
            if let Some((min_x, max_x)) = bounds.x {
                x_bounds = Some(match x_bounds {
                    Some((lo, hi)) => (lo.min(min_x), hi.max(max_x)),
                    None => (min_x, max_x),
                });
            }
            let group = layer.target_axis();
            if let Some(range) = bounds.y {
                y_ranges
                    .entry(group)
                    .and_modify(|existing| *existing = existing.union(range))
                    .or_insert(range);
            }
            if let Some(step) = layer.value_override().x_step {
                step_override = Some(step_override.map_or(step, |current| current.min(step)));
            }
        }

        let Some((min_x, max_x)) = x_bounds else {
            trace!("chart model has no x values, using neutral range");
            let mut values = Self::neutral();
            if !y_ranges.is_empty() {
                values.y_ranges = y_ranges;
            }
            return values;
        };

        let x_step = step_override.unwrap_or_else(|| minimal_x_delta(model));
        if y_ranges.is_empty() {
            y_ranges.insert(None, YRange::neutral());
        }

        trace!(min_x, max_x, x_step, groups = y_ranges.len(), "computed chart values");
        Self {
            min_x,
            max_x,
            x_step,
            y_ranges,
        }
    }

    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    #[must_use]
    pub fn x_step(&self) -> f64 {
        self.x_step
    }

    #[must_use]
    pub fn x_length(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Number of `x_step` intervals between `min_x` and `max_x`.
    #[must_use]
    pub fn x_step_count(&self) -> f64 {
        self.x_length() / self.x_step
    }

    /// Returns the y range of `position`'s group.
    ///
    /// Falls back to the untargeted group, then to the union of all groups.
    #[must_use]
    pub fn y_range(&self, position: Option<VerticalAxisPosition>) -> YRange {
        if let Some(range) = self.y_ranges.get(&position) {
            return *range;
        }
        if let Some(range) = self.y_ranges.get(&None) {
            return *range;
        }
        self.y_ranges
            .values()
            .copied()
            .reduce(YRange::union)
            .unwrap_or_else(YRange::neutral)
    }

    pub fn y_groups(&self) -> impl Iterator<Item = (Option<VerticalAxisPosition>, YRange)> + '_ {
        self.y_ranges.iter().map(|(group, range)| (*group, *range))
    }
}

#[derive(Debug, Default)]
struct LayerBounds {
    x: Option<(f64, f64)>,
    y: Option<YRange>,
}

impl LayerBounds {
    fn resolve(layer: &CartesianLayerModel) -> Self {
        let mut computed_x: Option<(f64, f64)> = None;
        let mut computed_y: Option<(f64, f64)> = None;
        for entry in layer.entries() {
            computed_x = Some(extend(computed_x, entry.x));
            computed_y = Some(extend(computed_y, entry.y));
        }

        let value_override = layer.value_override();
        let x = merge_override(computed_x, value_override.min_x, value_override.max_x);
        let y = merge_override(computed_y, value_override.min_y, value_override.max_y)
            .map(|(min_y, max_y)| YRange::new(min_y, max_y));
        Self { x, y }
    }
}

fn extend(bounds: Option<(f64, f64)>, value: f64) -> (f64, f64) {
    match bounds {
        Some((min, max)) => (min.min(value), max.max(value)),
        None => (value, value),
    }
}

fn merge_override(
    computed: Option<(f64, f64)>,
    min_override: Option<f64>,
    max_override: Option<f64>,
) -> Option<(f64, f64)> {
    let min = min_override.or(computed.map(|(min, _)| min));
    let max = max_override.or(computed.map(|(_, max)| max));
    match (min, max) {
        (Some(min), Some(max)) => Some((min, max.max(min))),
        (Some(only), None) | (None, Some(only)) => Some((only, only)),
        (None, None) => None,
    }
}

/// Smallest positive gap between consecutive distinct x values of all series.
fn minimal_x_delta(model: &CartesianChartModel) -> f64 {
    let mut xs: Vec<f64> = model
        .layers()
        .iter()
        .flat_map(CartesianLayerModel::entries)
        .map(|entry| entry.x)
        .collect();
    xs.sort_by(f64::total_cmp);
    xs.dedup();

    xs.windows(2)
        .map(|pair| pair[1] - pair[0])
        .filter(|delta| *delta > 0.0)
        .reduce(f64::min)
        .unwrap_or(DEFAULT_X_STEP)
}
