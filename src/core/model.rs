use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{ChartEntry, VerticalAxisPosition};
use crate::error::{ChartError, ChartResult};

/// Explicit value bounds that take precedence over the ones computed from data.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisValueOverride {
    pub min_x: Option<f64>,
    pub max_x: Option<f64>,
    pub min_y: Option<f64>,
    pub max_y: Option<f64>,
    pub x_step: Option<f64>,
}

impl AxisValueOverride {
    #[must_use]
    pub fn fixed_y(min_y: f64, max_y: f64) -> Self {
        Self {
            min_y: Some(min_y),
            max_y: Some(max_y),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_x_range(mut self, min_x: f64, max_x: f64) -> Self {
        self.min_x = Some(min_x);
        self.max_x = Some(max_x);
        self
    }

    #[must_use]
    pub fn with_x_step(mut self, x_step: f64) -> Self {
        self.x_step = Some(x_step);
        self
    }

    pub(crate) fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.min_x, "min_x"),
            (self.max_x, "max_x"),
            (self.min_y, "min_y"),
            (self.max_y, "max_y"),
        ] {
            if value.is_some_and(|value| !value.is_finite()) {
                return Err(ChartError::InvalidConfig(format!(
                    "value override `{name}` must be finite"
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.min_x, self.max_x) {
            if min > max {
                return Err(ChartError::InvalidConfig(
                    "value override min_x must be <= max_x".to_owned(),
                ));
            }
        }
        if let (Some(min), Some(max)) = (self.min_y, self.max_y) {
            if min > max {
                return Err(ChartError::InvalidConfig(
                    "value override min_y must be <= max_y".to_owned(),
                ));
            }
        }
        if self
            .x_step
            .is_some_and(|step| !step.is_finite() || step <= 0.0)
        {
            return Err(ChartError::InvalidConfig(
                "value override x_step must be finite and > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Data of one Cartesian layer: one or more series sharing the x-axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CartesianLayerModel {
    series: Vec<Vec<ChartEntry>>,
    target_axis: Option<VerticalAxisPosition>,
    value_override: AxisValueOverride,
}

impl CartesianLayerModel {
    /// Builds a layer from raw series.
    ///
    /// Every series is sorted by x; samples sharing an x collapse to the last one.
    pub fn new(series: Vec<Vec<ChartEntry>>) -> ChartResult<Self> {
        let mut canonical = Vec::with_capacity(series.len());
        for entries in series {
            if let Some(bad) = entries.iter().find(|entry| !entry.is_finite()) {
                return Err(ChartError::InvalidData(format!(
                    "series entry ({}, {}) must be finite",
                    bad.x, bad.y
                )));
            }
            let original_count = entries.len();
            let entries = canonicalize_entries(entries);
            if entries.len() != original_count {
                debug!(
                    original_count,
                    canonical_count = entries.len(),
                    "collapsed duplicate x values"
                );
            }
            canonical.push(entries);
        }

        Ok(Self {
            series: canonical,
            target_axis: None,
            value_override: AxisValueOverride::default(),
        })
    }

    /// Convenience for a layer whose single series uses `0, 1, 2, ...` as x.
    pub fn from_y_values(values: &[f64]) -> ChartResult<Self> {
        let entries = values
            .iter()
            .enumerate()
            .map(|(index, y)| ChartEntry::new(index as f64, *y))
            .collect();
        Self::new(vec![entries])
    }

    #[must_use]
    pub fn with_target_axis(mut self, position: VerticalAxisPosition) -> Self {
        self.target_axis = Some(position);
        self
    }

    pub fn with_value_override(mut self, value_override: AxisValueOverride) -> ChartResult<Self> {
        self.value_override = value_override.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn series(&self) -> &[Vec<ChartEntry>] {
        &self.series
    }

    #[must_use]
    pub fn target_axis(&self) -> Option<VerticalAxisPosition> {
        self.target_axis
    }

    #[must_use]
    pub fn value_override(&self) -> AxisValueOverride {
        self.value_override
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.series.iter().map(Vec::len).sum()
    }

    pub fn entries(&self) -> impl Iterator<Item = &ChartEntry> {
        self.series.iter().flatten()
    }
}

/// Ordered set of layers drawn on one chart. Registration order is draw order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CartesianChartModel {
    layers: Vec<CartesianLayerModel>,
}

impl CartesianChartModel {
    #[must_use]
    pub fn new(layers: Vec<CartesianLayerModel>) -> Self {
        Self { layers }
    }

    #[must_use]
    pub fn layers(&self) -> &[CartesianLayerModel] {
        &self.layers
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|layer| layer.entry_count() == 0)
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.layers.iter().map(CartesianLayerModel::entry_count).sum()
    }
}

fn canonicalize_entries(mut entries: Vec<ChartEntry>) -> Vec<ChartEntry> {
    entries.sort_by(|left, right| left.x.total_cmp(&right.x));
    let mut canonical: Vec<ChartEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        match canonical.last_mut() {
            Some(last) if last.x == entry.x => *last = entry,
            _ => canonical.push(entry),
        }
    }
    canonical
}
