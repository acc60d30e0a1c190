use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Turns axis and marker values into label text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueFormatter {
    /// Rounds to `precision` decimals and drops trailing zeros.
    Decimal { precision: u8 },
    /// Reads the value as unix seconds and formats it with a `chrono` pattern.
    UtcDateTime { pattern: String },
}

impl Default for ValueFormatter {
    fn default() -> Self {
        Self::Decimal { precision: 2 }
    }
}

impl ValueFormatter {
    #[must_use]
    pub fn utc_date_time(pattern: impl Into<String>) -> Self {
        Self::UtcDateTime {
            pattern: pattern.into(),
        }
    }

    #[must_use]
    pub fn format(&self, value: f64) -> String {
        if !value.is_finite() {
            return "nan".to_owned();
        }
        match self {
            Self::Decimal { precision } => format_decimal(value, *precision),
            Self::UtcDateTime { pattern } => {
                let millis = (value * 1_000.0).round();
                let time = if millis.abs() < i64::MAX as f64 {
                    DateTime::<Utc>::from_timestamp_millis(millis as i64)
                } else {
                    None
                };
                match time {
                    Some(time) => time.format(pattern).to_string(),
                    None => format_decimal(value, 2),
                }
            }
        }
    }
}

fn format_decimal(value: f64, precision: u8) -> String {
    let Some(decimal) = Decimal::from_f64_retain(value) else {
        return format!("{value:.prec$}", prec = usize::from(precision));
    };
    let text = decimal
        .round_dp(u32::from(precision))
        .normalize()
        .to_string();
    if text == "-0" { "0".to_owned() } else { text }
}
