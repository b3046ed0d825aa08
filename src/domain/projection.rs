//! Multi-year savings projections.

use serde::Serialize;

/// Cumulative position at the end of one projected year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearProjection {
    /// 1-based year number.
    pub year: u32,
    /// Savings accumulated by the end of the year.
    pub cumulative_savings: f64,
    /// Savings beyond the system cost, floored at zero.
    pub net_savings: f64,
    /// Whether cumulative savings have overtaken the system cost.
    pub break_even: bool,
}

/// Projects `years` years of constant annual savings against a one-off cost.
#[must_use]
pub fn project(annual_savings: f64, system_cost: f64, years: u32) -> Vec<YearProjection> {
    (1..=years)
        .map(|year| {
            let cumulative_savings = annual_savings * f64::from(year);
            let net = cumulative_savings - system_cost;
            YearProjection {
                year,
                cumulative_savings,
                net_savings: if net > 0.0 { net } else { 0.0 },
                break_even: cumulative_savings > system_cost,
            }
        })
        .collect()
}

/// The first projected year that breaks even, if any.
#[must_use]
pub fn break_even_year(projection: &[YearProjection]) -> Option<u32> {
    projection
        .iter()
        .find(|entry| entry.break_even)
        .map(|entry| entry.year)
}

/// Totals over a fixed horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LifetimeSummary {
    /// Horizon length in years.
    pub years: u32,
    /// `annual_savings * years`.
    pub total_savings: f64,
    /// Total savings less the system cost. Negative before break-even.
    pub net_profit: f64,
}

impl LifetimeSummary {
    /// Summarises `years` of constant savings against `system_cost`.
    #[must_use]
    pub fn new(annual_savings: f64, system_cost: f64, years: u32) -> Self {
        let total_savings = annual_savings * f64::from(years);
        Self {
            years,
            total_savings,
            net_profit: total_savings - system_cost,
        }
    }
}
