use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ConfigError;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

impl Config {
    /// Rejects configurations that would make the runway gauge undefined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dashboard.horizon_months == 0 {
            return Err(ConfigError::ValidationError(
                "dashboard.horizon_months must be at least 1".to_string(),
            ));
        }
        if self.dashboard.gauge_min > self.dashboard.gauge_max {
            return Err(ConfigError::ValidationError(
                "dashboard.gauge_min must not exceed dashboard.gauge_max".to_string(),
            ));
        }
        Ok(())
    }
}

/// Connection details for the report source API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the reports API (e.g., "http://localhost:5000/api").
    pub base_url: String,
    /// Per-request timeout for report fetches.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Display policy for the dashboard's cash-runway gauge.
///
/// The horizon caps the linear runway projection (12 months fills the gauge
/// by default) and the bounds clamp the rendered percentage.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSettings {
    #[serde(default = "default_horizon_months")]
    pub horizon_months: u32,
    #[serde(default = "default_gauge_min")]
    pub gauge_min: Decimal,
    #[serde(default = "default_gauge_max")]
    pub gauge_max: Decimal,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            horizon_months: default_horizon_months(),
            gauge_min: default_gauge_min(),
            gauge_max: default_gauge_max(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_horizon_months() -> u32 {
    12
}

fn default_gauge_min() -> Decimal {
    Decimal::ZERO
}

fn default_gauge_max() -> Decimal {
    Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use rust_decimal_macros::dec;

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn dashboard_section_is_optional() {
        let config = parse("[api]\nbase_url = \"http://localhost:5000/api\"\n");

        assert_eq!(config.dashboard.horizon_months, 12);
        assert_eq!(config.dashboard.gauge_min, dec!(0));
        assert_eq!(config.dashboard.gauge_max, dec!(100));
        assert_eq!(config.api.timeout_secs, 10);
        config.validate().unwrap();
    }

    #[test]
    fn explicit_dashboard_settings_are_honored() {
        let config = parse(
            "[api]\nbase_url = \"http://localhost:5000/api\"\n\
             [dashboard]\nhorizon_months = 24\ngauge_max = 200\n",
        );

        assert_eq!(config.dashboard.horizon_months, 24);
        assert_eq!(config.dashboard.gauge_max, dec!(200));
    }

    #[test]
    fn zero_horizon_is_rejected() {
        let config = parse(
            "[api]\nbase_url = \"http://localhost:5000/api\"\n\
             [dashboard]\nhorizon_months = 0\n",
        );

        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_gauge_bounds_are_rejected() {
        let config = parse(
            "[api]\nbase_url = \"http://localhost:5000/api\"\n\
             [dashboard]\ngauge_min = 50\ngauge_max = 10\n",
        );

        assert!(config.validate().is_err());
    }
}
