//! Team policy parameters.
//!
//! Defaults reproduce the reference scenario: a ten-unit team, quarterly
//! growth of 15%, at most ten onboardings, and the 50% hard cap on
//! operational work. Any field may be overridden from a JSON file.

use crate::{
    error::{SimError, SimResult},
    types::Tick,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamConfig {
    /// Number of ticks the run lasts, bootstrap tick included.
    pub horizon: Tick,
    /// Work units the team can process in one tick.
    pub capacity: u32,
    /// Lifetime cap on onboardings. Zero disables onboarding.
    pub onboarding_limit: u32,
    /// Starting operational baseline.
    pub baseline_operational: u64,
    /// Once the baseline reaches this, organic operational growth stops.
    pub max_operational: u64,
    /// Per-tick compounding factor on the operational baseline.
    pub growth_factor: f64,
    /// Share of capacity operational work may consume in one tick.
    pub operational_cap_ratio: f64,
    pub cross_team_probability: f64,
    pub onboarding_probability: f64,
    /// Chance that finishing cross-team work spawns more of it.
    pub carryover_probability: f64,
}

impl Default for TeamConfig {
    fn default() -> Self {
        Self {
            horizon:                100,
            capacity:               10,
            onboarding_limit:       10,
            baseline_operational:   1,
            max_operational:        20,
            growth_factor:          1.15,
            operational_cap_ratio:  0.5,
            cross_team_probability: 0.1,
            onboarding_probability: 0.2,
            carryover_probability:  0.5,
        }
    }
}

impl TeamConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: TeamConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine must never run with.
    pub fn validate(&self) -> SimResult<()> {
        if self.horizon == 0 {
            return Err(SimError::config("horizon", "must be at least 1 tick"));
        }
        if self.capacity == 0 {
            return Err(SimError::config("capacity", "must be positive"));
        }
        if self.max_operational == 0 {
            return Err(SimError::config("max_operational", "must be positive"));
        }
        if !self.growth_factor.is_finite() || self.growth_factor < 1.0 {
            return Err(SimError::config(
                "growth_factor",
                format!("must be a finite value >= 1.0, got {}", self.growth_factor),
            ));
        }
        let unit_fields = [
            ("operational_cap_ratio",  self.operational_cap_ratio),
            ("cross_team_probability", self.cross_team_probability),
            ("onboarding_probability", self.onboarding_probability),
            ("carryover_probability",  self.carryover_probability),
        ];
        for (field, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(SimError::config(field, format!("must be within [0, 1], got {value}")));
            }
        }
        Ok(())
    }

    /// Most OPERATIONAL tokens that may be consumed in one tick.
    ///
    /// A token is consumed while `consumed < capacity * ratio`, which for
    /// an integer count is the ceiling of the product.
    pub fn operational_cap(&self) -> u32 {
        (self.capacity as f64 * self.operational_cap_ratio).ceil() as u32
    }

    /// Same as the defaults but with every stochastic event switched off.
    pub fn deterministic() -> Self {
        Self {
            cross_team_probability: 0.0,
            onboarding_probability: 0.0,
            carryover_probability:  0.0,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        TeamConfig::default().validate().unwrap();
        TeamConfig::deterministic().validate().unwrap();
    }

    #[test]
    fn zero_capacity_rejected() {
        let config = TeamConfig { capacity: 0, ..TeamConfig::default() };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SimError::Configuration { field: "capacity", .. }));
    }

    #[test]
    fn zero_horizon_rejected() {
        let config = TeamConfig { horizon: 0, ..TeamConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(SimError::Configuration { field: "horizon", .. })
        ));
    }

    #[test]
    fn zero_max_operational_rejected() {
        let config = TeamConfig { max_operational: 0, ..TeamConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn shrinking_growth_rejected() {
        let config = TeamConfig { growth_factor: 0.9, ..TeamConfig::default() };
        assert!(config.validate().is_err());
        let config = TeamConfig { growth_factor: f64::NAN, ..TeamConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn probability_out_of_range_rejected() {
        let config = TeamConfig { carryover_probability: 1.5, ..TeamConfig::default() };
        assert!(matches!(
            config.validate(),
            Err(SimError::Configuration { field: "carryover_probability", .. })
        ));
    }

    #[test]
    fn zero_onboarding_limit_is_allowed() {
        let config = TeamConfig { onboarding_limit: 0, ..TeamConfig::default() };
        config.validate().unwrap();
    }

    #[test]
    fn operational_cap_rounds_up() {
        assert_eq!(TeamConfig::default().operational_cap(), 5);
        let odd = TeamConfig { capacity: 7, ..TeamConfig::default() };
        assert_eq!(odd.operational_cap(), 4);
    }

    #[test]
    fn partial_json_takes_defaults() {
        let config: TeamConfig = serde_json::from_str(r#"{ "capacity": 12 }"#).unwrap();
        assert_eq!(config.capacity, 12);
        assert_eq!(config.horizon, 100);
        assert_eq!(config.growth_factor, 1.15);
    }
}
