//! Bill savings by water source.
//!
//! Harvested rainwater offsets part of the water bill and, when the current
//! supply is pumped, part of the electricity bill. How much depends on the
//! source being replaced.

use serde::{Deserialize, Serialize};

use super::input::WaterSource;

/// Fractions of the current bills saved once a system is installed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsShare {
    /// Fraction of the water bill saved, in `[0, 1]`.
    pub water: f64,
    /// Fraction of the electricity bill saved, in `[0, 1]`.
    pub electricity: f64,
}

impl SavingsShare {
    /// Creates a share from water and electricity fractions.
    #[must_use]
    pub const fn new(water: f64, electricity: f64) -> Self {
        Self { water, electricity }
    }

    fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.water) && (0.0..=1.0).contains(&self.electricity)
    }
}

/// Savings fractions for every supported water source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsRates {
    /// Municipal piped supply.
    pub municipality: SavingsShare,
    /// Submersible pump.
    pub submersible: SavingsShare,
    /// Tube well.
    pub tubewell: SavingsShare,
    /// Dug well.
    pub well: SavingsShare,
}

impl Default for SavingsRates {
    fn default() -> Self {
        Self {
            municipality: SavingsShare::new(0.45, 0.10),
            submersible: SavingsShare::new(0.60, 0.40),
            tubewell: SavingsShare::new(0.35, 0.10),
            well: SavingsShare::new(0.35, 0.10),
        }
    }
}

impl SavingsRates {
    /// The share that applies to `source`.
    #[must_use]
    pub const fn for_source(&self, source: WaterSource) -> SavingsShare {
        match source {
            WaterSource::Municipality => self.municipality,
            WaterSource::Submersible => self.submersible,
            WaterSource::Tubewell => self.tubewell,
            WaterSource::Well => self.well,
        }
    }

    /// Returns the first source whose fractions fall outside `[0, 1]`.
    pub(crate) fn first_invalid(&self) -> Option<WaterSource> {
        WaterSource::ALL
            .iter()
            .copied()
            .find(|source| !self.for_source(*source).is_valid())
    }
}

/// One row of the monthly before/after bill comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyComparison {
    /// Which bill the row describes.
    pub category: BillCategory,
    /// The bill today (₹/month).
    pub current: f64,
    /// The expected bill with rainwater harvesting (₹/month).
    pub with_rwh: f64,
}

/// The bill a [`MonthlyComparison`] row refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BillCategory {
    /// The water bill.
    Water,
    /// The electricity bill.
    Electricity,
    /// Water and electricity combined.
    Total,
}

/// Annual bill figures before and after installing a system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostComparison {
    /// The fractions applied for the selected water source.
    pub share: SavingsShare,
    /// Current yearly water spend.
    pub current_annual_water_cost: f64,
    /// Current yearly electricity spend.
    pub current_annual_electricity_cost: f64,
    /// Sum of the two current costs.
    pub total_current_cost: f64,
    /// Yearly water bill reduction.
    pub annual_water_savings: f64,
    /// Yearly electricity bill reduction.
    pub annual_electricity_savings: f64,
    /// Sum of the two reductions.
    pub total_annual_savings: f64,
    /// What is still spent each year after the reductions.
    pub remaining_annual_cost: f64,
    /// Monthly before/after rows for water, electricity and their total.
    pub monthly: [MonthlyComparison; 3],
}

impl CostComparison {
    /// Computes the comparison for the given monthly bills.
    #[must_use]
    pub const fn new(
        monthly_water_bill: f64,
        monthly_electricity_bill: f64,
        share: SavingsShare,
    ) -> Self {
        let current_annual_water_cost = monthly_water_bill * 12.0;
        let current_annual_electricity_cost = monthly_electricity_bill * 12.0;
        let total_current_cost = current_annual_water_cost + current_annual_electricity_cost;

        let annual_water_savings = current_annual_water_cost * share.water;
        let annual_electricity_savings = current_annual_electricity_cost * share.electricity;
        let total_annual_savings = annual_water_savings + annual_electricity_savings;

        let water_after = monthly_water_bill * (1.0 - share.water);
        let electricity_after = monthly_electricity_bill * (1.0 - share.electricity);

        Self {
            share,
            current_annual_water_cost,
            current_annual_electricity_cost,
            total_current_cost,
            annual_water_savings,
            annual_electricity_savings,
            total_annual_savings,
            remaining_annual_cost: total_current_cost - total_annual_savings,
            monthly: [
                MonthlyComparison {
                    category: BillCategory::Water,
                    current: monthly_water_bill,
                    with_rwh: water_after,
                },
                MonthlyComparison {
                    category: BillCategory::Electricity,
                    current: monthly_electricity_bill,
                    with_rwh: electricity_after,
                },
                MonthlyComparison {
                    category: BillCategory::Total,
                    current: monthly_water_bill + monthly_electricity_bill,
                    with_rwh: water_after + electricity_after,
                },
            ],
        }
    }

    /// Monthly water bill reduction.
    #[must_use]
    pub const fn monthly_water_savings(&self) -> f64 {
        self.monthly[0].current - self.monthly[0].with_rwh
    }

    /// Monthly electricity bill reduction.
    #[must_use]
    pub const fn monthly_electricity_savings(&self) -> f64 {
        self.monthly[1].current - self.monthly[1].with_rwh
    }
}
