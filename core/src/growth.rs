//! Operational growth.
//!
//! The operational baseline compounds by a fixed factor every tick, and
//! each historical onboarding adds one more unit of permanent demand.
//! The difference between the new and current baseline is how many
//! OPERATIONAL tokens get injected. Once the baseline reaches the cap,
//! organic growth freezes even though onboarding-driven work elsewhere
//! keeps arriving.

use crate::config::TeamConfig;

/// `round(baseline * growth_factor) + onboarding_count`.
///
/// Ties round to even, so 2.5 becomes 2 and 3.5 becomes 4. Saturates at
/// `u64::MAX` rather than overflowing on extreme growth factors.
pub fn next_operational(baseline: u64, onboarding_count: u32, growth_factor: f64) -> u64 {
    let scaled = (baseline as f64 * growth_factor).round_ties_even();
    (scaled as u64).saturating_add(u64::from(onboarding_count))
}

/// The outcome of one growth step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthStep {
    pub baseline: u64,
    pub injected: u64,
}

pub struct OperationalGrowth;

impl OperationalGrowth {
    /// Compute the next baseline and how many OPERATIONAL tokens it injects.
    ///
    /// The baseline never exceeds `max_operational` and never decreases.
    pub fn apply(baseline: u64, onboarding_count: u32, config: &TeamConfig) -> GrowthStep {
        if baseline >= config.max_operational {
            return GrowthStep { baseline, injected: 0 };
        }
        let next = next_operational(baseline, onboarding_count, config.growth_factor)
            .min(config.max_operational)
            .max(baseline);
        GrowthStep {
            baseline: next,
            injected: next - baseline,
        }
    }
}
