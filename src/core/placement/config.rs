use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{ChartError, ChartResult};

use super::{DefaultHorizontalAxisItemPlacer, DefaultVerticalAxisItemPlacer};

/// Serializable selection of the standard horizontal placer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizontalPlacerConfig {
    pub spacing: usize,
    pub offset: usize,
    pub shift_extreme_ticks: bool,
    pub add_extreme_label_padding: bool,
}

impl Default for HorizontalPlacerConfig {
    fn default() -> Self {
        Self {
            spacing: 1,
            offset: 0,
            shift_extreme_ticks: true,
            add_extreme_label_padding: false,
        }
    }
}

impl HorizontalPlacerConfig {
    pub fn build(self) -> ChartResult<DefaultHorizontalAxisItemPlacer> {
        DefaultHorizontalAxisItemPlacer::new(
            self.spacing,
            self.offset,
            self.shift_extreme_ticks,
            self.add_extreme_label_padding,
        )
    }
}

const REMOVED_VERTICAL_MODE_HINT: &str =
    "the `default` vertical placer has been removed; use `count` for the same behavior or `step`";

/// Serializable selection of the standard vertical placer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum VerticalPlacerConfig {
    Step {
        #[serde(default)]
        step: Option<f64>,
        #[serde(default = "default_shift_top_lines")]
        shift_top_lines: bool,
    },
    Count {
        #[serde(default)]
        count: Option<usize>,
        #[serde(default = "default_shift_top_lines")]
        shift_top_lines: bool,
    },
}

fn default_shift_top_lines() -> bool {
    true
}

impl Default for VerticalPlacerConfig {
    fn default() -> Self {
        Self::Step {
            step: None,
            shift_top_lines: true,
        }
    }
}

impl VerticalPlacerConfig {
    /// Parses a placer selection, failing fast on removed or unknown modes.
    pub fn from_json(json: &str) -> ChartResult<Self> {
        let raw: Value = serde_json::from_str(json).map_err(|err| {
            ChartError::InvalidConfig(format!("vertical placer config is not valid json: {err}"))
        })?;
        Self::from_value(raw)
    }

    pub(crate) fn from_value(raw: Value) -> ChartResult<Self> {
        if raw.get("mode").and_then(Value::as_str) == Some("default") {
            warn!("rejecting removed vertical placer mode");
            return Err(ChartError::InvalidConfig(
                REMOVED_VERTICAL_MODE_HINT.to_owned(),
            ));
        }
        serde_json::from_value(raw)
            .map_err(|err| ChartError::InvalidConfig(format!("vertical placer config: {err}")))
    }

    pub fn build(self) -> ChartResult<DefaultVerticalAxisItemPlacer> {
        match self {
            Self::Step {
                step,
                shift_top_lines,
            } => DefaultVerticalAxisItemPlacer::step(step, shift_top_lines),
            Self::Count {
                count,
                shift_top_lines,
            } => Ok(DefaultVerticalAxisItemPlacer::count(count, shift_top_lines)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HorizontalPlacerConfig, VerticalPlacerConfig};
    use crate::core::VerticalPlacerMode;
    use crate::error::ChartError;

    #[test]
    fn removed_default_mode_fails_with_hint() {
        let err = VerticalPlacerConfig::from_json(r#"{"mode":"default"}"#)
            .expect_err("removed mode must fail");
        match err {
            ChartError::InvalidConfig(message) => assert!(message.contains("count")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn count_mode_parses_and_builds() {
        let config = VerticalPlacerConfig::from_json(r#"{"mode":"count","count":5}"#)
            .expect("count config");
        let placer = config.build().expect("placer");
        assert_eq!(placer.mode(), VerticalPlacerMode::Count { count: Some(5) });
    }

    #[test]
    fn negative_step_fails_at_build_time() {
        let config = VerticalPlacerConfig::Step {
            step: Some(-1.0),
            shift_top_lines: true,
        };
        assert!(config.build().is_err());
    }

    #[test]
    fn horizontal_config_defaults_missing_fields() {
        let config: HorizontalPlacerConfig =
            serde_json::from_str(r#"{"spacing":2}"#).expect("config");
        assert_eq!(config.offset, 0);
        assert!(config.shift_extreme_ticks);
        assert_eq!(config.build().expect("placer").spacing(), 2);
    }
}
