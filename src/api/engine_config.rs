use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{Bounds, HorizontalLayout, LayoutDirection, VerticalPlacerConfig};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{AutoScrollCondition, InitialScroll, ZoomState};

use super::AxesConfig;

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    /// Host bounds the chart is first measured against.
    pub bounds: Bounds,
    #[serde(default)]
    pub horizontal_layout: HorizontalLayout,
    #[serde(default)]
    pub layout_direction: LayoutDirection,
    #[serde(default)]
    pub initial_scroll: InitialScroll,
    #[serde(default)]
    pub auto_scroll_condition: AutoScrollCondition,
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f64,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
    #[serde(default)]
    pub axes: AxesConfig,
}

impl ChartEngineConfig {
    /// Creates a config with default layout, scroll, zoom and axes.
    #[must_use]
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            horizontal_layout: HorizontalLayout::default(),
            layout_direction: LayoutDirection::default(),
            initial_scroll: InitialScroll::default(),
            auto_scroll_condition: AutoScrollCondition::default(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
            axes: AxesConfig::default(),
        }
    }

    #[must_use]
    pub fn with_horizontal_layout(mut self, layout: HorizontalLayout) -> Self {
        self.horizontal_layout = layout;
        self
    }

    #[must_use]
    pub fn with_layout_direction(mut self, direction: LayoutDirection) -> Self {
        self.layout_direction = direction;
        self
    }

    #[must_use]
    pub fn with_initial_scroll(mut self, initial_scroll: InitialScroll) -> Self {
        self.initial_scroll = initial_scroll;
        self
    }

    #[must_use]
    pub fn with_auto_scroll_condition(mut self, condition: AutoScrollCondition) -> Self {
        self.auto_scroll_condition = condition;
        self
    }

    /// Sets the zoom limits; checked by [`Self::validate`].
    #[must_use]
    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self
    }

    #[must_use]
    pub fn with_axes(mut self, axes: AxesConfig) -> Self {
        self.axes = axes;
        self
    }

    /// Fails fast on settings no frame could be drawn with.
    pub fn validate(&self) -> ChartResult<()> {
        if !self.bounds.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.bounds.width(),
                height: self.bounds.height(),
            });
        }
        self.horizontal_layout.validate()?;
        ZoomState::new(self.min_zoom, self.max_zoom)?;
        for vertical in [&self.axes.start, &self.axes.end].into_iter().flatten() {
            vertical.build_placer()?;
        }
        for horizontal in [&self.axes.top, &self.axes.bottom].into_iter().flatten() {
            horizontal.build_placer()?;
        }
        Ok(())
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    ///
    /// Vertical placers go through [`VerticalPlacerConfig`]'s own loader so a
    /// removed placer mode is reported with a migration hint rather than as
    /// an unknown variant.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let raw: Value = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))?;
        for pointer in ["/axes/start/placer", "/axes/end/placer"] {
            if let Some(placer) = raw.pointer(pointer) {
                VerticalPlacerConfig::from_value(placer.clone())?;
            }
        }
        serde_json::from_value(raw)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config: {e}")))
    }
}

fn default_min_zoom() -> f64 {
    ZoomState::default().min_zoom()
}

fn default_max_zoom() -> f64 {
    ZoomState::default().max_zoom()
}

#[cfg(test)]
mod tests {
    use super::ChartEngineConfig;
    use crate::core::{Bounds, HorizontalLayout};
    use crate::error::ChartError;

    #[test]
    fn minimal_json_fills_defaults() {
        let config = ChartEngineConfig::from_json_str(
            r#"{"bounds":{"left":0,"top":0,"right":320,"bottom":200}}"#,
        )
        .expect("config");
        assert_eq!(config, ChartEngineConfig::new(Bounds::from_size(320.0, 200.0)));
    }

    #[test]
    fn json_round_trip_keeps_layout() {
        let config = ChartEngineConfig::new(Bounds::from_size(320.0, 200.0))
            .with_horizontal_layout(HorizontalLayout::full_width());
        let json = config.to_json_pretty().expect("json");
        assert_eq!(ChartEngineConfig::from_json_str(&json).expect("config"), config);
    }

    #[test]
    fn removed_vertical_placer_mode_is_rejected() {
        let err = ChartEngineConfig::from_json_str(
            r#"{"bounds":{"left":0,"top":0,"right":320,"bottom":200},
                "axes":{"start":{"placer":{"mode":"default"}}}}"#,
        )
        .expect_err("removed mode");
        assert!(matches!(err, ChartError::InvalidConfig(message) if message.contains("count")));
    }

    #[test]
    fn degenerate_bounds_fail_validation() {
        let config = ChartEngineConfig::new(Bounds::from_size(0.0, 200.0));
        assert!(matches!(
            config.validate(),
            Err(ChartError::InvalidViewport { .. })
        ));
    }
}
