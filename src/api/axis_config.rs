use serde::{Deserialize, Serialize};

use crate::core::{
    DefaultHorizontalAxisItemPlacer, DefaultVerticalAxisItemPlacer, HorizontalPlacerConfig,
    ValueFormatter, VerticalLabelPosition, VerticalPlacerConfig,
};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Resolved visual values shared by horizontal and vertical axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisStyle {
    pub label_font_size_px: f64,
    pub label_color: Color,
    /// Gap between a tick and its label.
    pub label_padding: f64,
    pub line_color: Color,
    pub line_thickness: f64,
    pub tick_length: f64,
    pub tick_thickness: f64,
    pub guideline_color: Color,
    /// Zero disables guidelines.
    pub guideline_thickness: f64,
    pub formatter: ValueFormatter,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            label_font_size_px: 12.0,
            label_color: Color::rgb(0.25, 0.25, 0.25),
            label_padding: 4.0,
            line_color: Color::rgb(0.6, 0.6, 0.6),
            line_thickness: 1.0,
            tick_length: 4.0,
            tick_thickness: 1.0,
            guideline_color: Color::rgba(0.6, 0.6, 0.6, 0.5),
            guideline_thickness: 1.0,
            formatter: ValueFormatter::default(),
        }
    }
}

impl AxisStyle {
    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("label_font_size_px", self.label_font_size_px),
            ("label_padding", self.label_padding),
            ("line_thickness", self.line_thickness),
            ("tick_length", self.tick_length),
            ("tick_thickness", self.tick_thickness),
            ("guideline_thickness", self.guideline_thickness),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "axis style `{name}` must be finite and >= 0"
                )));
            }
        }
        for color in [
            self.label_color,
            self.line_color,
            self.guideline_color,
        ] {
            color
                .validate()
                .map_err(|err| ChartError::InvalidConfig(format!("axis style: {err}")))?;
        }
        Ok(())
    }

    /// Thickest line the axis draws, used for vertical insets.
    #[must_use]
    pub(crate) fn max_line_thickness(&self) -> f64 {
        self.line_thickness
            .max(self.tick_thickness)
            .max(self.guideline_thickness)
    }
}

/// Whether vertical axis labels sit outside the chart or over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HorizontalLabelPosition {
    #[default]
    Outside,
    Inside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HorizontalAxisPosition {
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizontalAxisConfig {
    pub style: AxisStyle,
    pub placer: HorizontalPlacerConfig,
}

impl HorizontalAxisConfig {
    pub(crate) fn build_placer(&self) -> ChartResult<DefaultHorizontalAxisItemPlacer> {
        self.style.validate()?;
        self.placer.build()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerticalAxisConfig {
    pub style: AxisStyle,
    pub placer: VerticalPlacerConfig,
    pub label_position: VerticalLabelPosition,
    pub horizontal_label_position: HorizontalLabelPosition,
}

impl VerticalAxisConfig {
    pub(crate) fn build_placer(&self) -> ChartResult<DefaultVerticalAxisItemPlacer> {
        self.style.validate()?;
        self.placer.build()
    }
}

/// Which axes a chart shows. Absent axes take no space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    pub start: Option<VerticalAxisConfig>,
    pub end: Option<VerticalAxisConfig>,
    pub top: Option<HorizontalAxisConfig>,
    pub bottom: Option<HorizontalAxisConfig>,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            start: Some(VerticalAxisConfig::default()),
            end: None,
            top: None,
            bottom: Some(HorizontalAxisConfig::default()),
        }
    }
}

impl AxesConfig {
    /// No axes at all.
    #[must_use]
    pub fn none() -> Self {
        Self {
            start: None,
            end: None,
            top: None,
            bottom: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AxesConfig, AxisStyle};

    #[test]
    fn negative_thickness_is_rejected() {
        let style = AxisStyle {
            tick_thickness: -1.0,
            ..AxisStyle::default()
        };
        assert!(style.validate().is_err());
    }

    #[test]
    fn default_axes_are_start_and_bottom() {
        let axes = AxesConfig::default();
        assert!(axes.start.is_some() && axes.bottom.is_some());
        assert!(axes.end.is_none() && axes.top.is_none());
    }
}
