//! The estimation engine.
//!
//! [`Estimator::estimate`] maps a [`UserInput`] snapshot to a [`ResultSet`].
//! It holds no state besides its [`Config`], performs no I/O and never fails:
//! inputs that make a payback period undefined (zero savings) produce a
//! non-calculable [`Payback`] instead of an error.

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::domain::{
    Config, CostComparison, LifetimeSummary, Payback, RoofType, UseType, UserInput,
    YearProjection, projection,
};

/// Rainwater collected by the roof.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Collection {
    /// Collection per year.
    pub annual_liters: f64,
    /// `annual_liters / 12`.
    pub monthly_liters: f64,
    /// `annual_liters / 365`.
    pub daily_liters: f64,
    /// The roof efficiency that was applied.
    pub efficiency: f64,
}

/// Everything derived from one input snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSet {
    /// Collection volumes.
    pub collection: Collection,

    /// Savings (₹/year) implied by the collected volume.
    pub annual_savings: f64,

    /// Installed system cost (₹) from the tier table.
    pub system_cost: f64,

    /// Payback shown on the overview: tank capacity priced at a flat rate per
    /// litre, divided by the collection-based savings, rounded to whole years.
    pub overview_payback_years: Payback,

    /// Payback shown on the cost comparison: tiered system cost divided by the
    /// bill-based savings.
    pub cost_comparison_payback_years: Payback,

    /// CO₂ offset per year, rounded to whole kilograms.
    pub carbon_offset_kg: f64,

    /// How many days of (rounded) daily collection the tank holds, to one
    /// decimal place.
    pub tank_storage_days: f64,

    /// Current bills against bills with harvesting.
    pub cost_comparison: CostComparison,

    /// Yearly cumulative savings against the system cost.
    pub projection: Vec<YearProjection>,

    /// Totals at the configured horizons.
    pub lifetime: Vec<LifetimeSummary>,

    /// Bill-based annual savings as a percentage of system cost.
    pub annual_return_pct: f64,
}

impl ResultSet {
    /// The first projected year in which savings exceed the system cost.
    #[must_use]
    pub fn break_even_year(&self) -> Option<u32> {
        projection::break_even_year(&self.projection)
    }

    /// The lifetime summary for a horizon, if one was computed.
    #[must_use]
    pub fn lifetime_at(&self, years: u32) -> Option<&LifetimeSummary> {
        self.lifetime.iter().find(|summary| summary.years == years)
    }
}

/// Computes estimates from a fixed set of constants.
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    config: Config,
}

impl Estimator {
    /// Creates an estimator using the given constants.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// The constants in use.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Derives the full result set for one input snapshot.
    #[must_use]
    #[instrument(level = "debug", skip(self))]
    pub fn estimate(&self, input: &UserInput) -> ResultSet {
        let collection = self.collection(input.rooftop_area_m2, input.roof_type);
        let annual_savings = collection.annual_liters * self.config.savings_rate;
        let system_cost = self.system_cost(input.use_type, input.tank_capacity_liters);

        let share = self.config.savings.for_source(input.water_source);
        let cost_comparison =
            CostComparison::new(input.monthly_water_bill, input.monthly_electricity_bill, share);
        let bill_savings = cost_comparison.total_annual_savings;

        let overview_payback_years =
            self.overview_payback(input.tank_capacity_liters, annual_savings);
        let cost_comparison_payback_years = Payback::new(system_cost / bill_savings);
        if !cost_comparison_payback_years.is_calculable() {
            warn!(bill_savings, "cost comparison payback is not calculable");
        }

        let projection =
            projection::project(bill_savings, system_cost, self.config.projection_years);
        let lifetime = self
            .config
            .lifetime_horizons
            .iter()
            .map(|years| LifetimeSummary::new(bill_savings, system_cost, *years))
            .collect();

        ResultSet {
            collection,
            annual_savings,
            system_cost,
            overview_payback_years,
            cost_comparison_payback_years,
            carbon_offset_kg: (collection.annual_liters * self.config.carbon_factor).round(),
            tank_storage_days: tank_storage_days(
                input.tank_capacity_liters,
                collection.daily_liters,
            ),
            cost_comparison,
            projection,
            lifetime,
            annual_return_pct: bill_savings / system_cost * 100.0,
        }
    }

    /// Collection volumes for a roof of the given area and type.
    #[must_use]
    pub const fn collection(&self, rooftop_area_m2: f64, roof_type: RoofType) -> Collection {
        let efficiency = self.config.roof_efficiency(roof_type);
        let annual_liters = rooftop_area_m2
            * self.config.runoff_coefficient
            * self.config.average_rainfall_mm
            * efficiency
            / 1000.0;

        Collection {
            annual_liters,
            monthly_liters: annual_liters / 12.0,
            daily_liters: annual_liters / 365.0,
            efficiency,
        }
    }

    /// Installed cost for a tank of the given capacity.
    #[must_use]
    pub fn system_cost(&self, use_type: UseType, tank_capacity_liters: f64) -> f64 {
        let cost = self.config.tiers(use_type).lookup(tank_capacity_liters);
        debug!(%use_type, tank_capacity_liters, cost, "selected system cost tier");
        cost
    }

    /// The overview payback period, rounded to whole years.
    #[must_use]
    pub fn overview_payback(&self, tank_capacity_liters: f64, annual_savings: f64) -> Payback {
        let years = ((tank_capacity_liters * self.config.overview_payback_factor)
            / (annual_savings / 1000.0))
            .round();
        let payback = Payback::new(years);
        if !payback.is_calculable() {
            warn!(annual_savings, "overview payback is not calculable");
        }
        payback
    }
}

/// Estimates with the default constants.
#[must_use]
pub fn estimate(input: &UserInput) -> ResultSet {
    Estimator::default().estimate(input)
}

fn tank_storage_days(tank_capacity_liters: f64, daily_liters: f64) -> f64 {
    (tank_capacity_liters / daily_liters.round() * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RoofType, UseType, WaterSource};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn input(area: f64, roof: RoofType, tank: f64, use_type: UseType) -> UserInput {
        UserInput::new(
            area,
            roof,
            tank,
            use_type,
            WaterSource::Municipality,
            2500.0,
            1800.0,
        )
        .unwrap()
    }

    #[test]
    fn household_flat_roof_scenario() {
        let result = estimate(&input(100.0, RoofType::Flat, 5000.0, UseType::Household));

        let annual = 100.0 * 0.8 * 800.0 * 0.95 / 1000.0;
        assert!(approx(result.collection.annual_liters, annual));
        assert!(approx(result.collection.annual_liters, 60.8));
        assert_eq!(result.collection.efficiency, 0.95);
        assert_eq!(result.system_cost, 80_000.0);
        assert!(approx(result.annual_savings, annual * 3.0));

        let expected_overview = ((5000.0 * 0.05) / (annual * 3.0 / 1000.0)).round();
        assert_eq!(result.overview_payback_years.years(), expected_overview);
        assert_eq!(result.overview_payback_years.years(), 1371.0);

        assert_eq!(result.carbon_offset_kg, 30.0);
    }

    #[test]
    fn cost_comparison_payback_uses_bill_savings() {
        let result = estimate(&input(100.0, RoofType::Flat, 5000.0, UseType::Household));

        assert!(approx(result.cost_comparison.total_annual_savings, 15_660.0));
        assert!(approx(
            result.cost_comparison_payback_years.years(),
            80_000.0 / 15_660.0
        ));
        assert_ne!(
            result.overview_payback_years,
            result.cost_comparison_payback_years
        );
    }

    #[test]
    fn sloped_roof_collects_less() {
        let flat = estimate(&input(120.0, RoofType::Flat, 1000.0, UseType::Household));
        let sloped = estimate(&input(120.0, RoofType::Sloped, 1000.0, UseType::Household));
        assert!(flat.collection.annual_liters > sloped.collection.annual_liters);
        assert_eq!(sloped.collection.efficiency, 0.87);
    }

    #[test]
    fn monthly_and_daily_add_back_up() {
        let result = estimate(&input(250.0, RoofType::Sloped, 1000.0, UseType::Household));
        let annual = result.collection.annual_liters;
        assert!((result.collection.monthly_liters * 12.0 - annual).abs() < 1e-9);
        assert!((result.collection.daily_liters * 365.0 - annual).abs() < 1e-9);
    }

    #[test]
    fn tank_of_exactly_1000_litres_is_the_cheapest_tier() {
        let result = estimate(&input(100.0, RoofType::Flat, 1000.0, UseType::Household));
        assert_eq!(result.system_cost, 50_000.0);
    }

    #[test]
    fn commercial_tiers() {
        let small = estimate(&input(100.0, RoofType::Flat, 25_000.0, UseType::Commercial));
        let large = estimate(&input(100.0, RoofType::Flat, 25_001.0, UseType::Commercial));
        assert_eq!(small.system_cost, 215_000.0);
        assert_eq!(large.system_cost, 385_000.0);
    }

    #[test]
    fn zero_area_makes_overview_payback_not_calculable() {
        let result = estimate(&input(0.0, RoofType::Flat, 5000.0, UseType::Household));
        assert_eq!(result.annual_savings, 0.0);
        assert!(!result.overview_payback_years.is_calculable());
        assert!(result.cost_comparison_payback_years.is_calculable());
    }

    #[test]
    fn zero_bills_make_cost_comparison_payback_not_calculable() {
        let mut snapshot = input(100.0, RoofType::Flat, 5000.0, UseType::Household);
        snapshot.monthly_water_bill = 0.0;
        snapshot.monthly_electricity_bill = 0.0;

        let result = estimate(&snapshot);
        assert!(!result.cost_comparison_payback_years.is_calculable());
        assert_eq!(result.break_even_year(), None);
    }

    #[test]
    fn projection_runs_ten_years_on_bill_savings() {
        let result = estimate(&input(100.0, RoofType::Flat, 5000.0, UseType::Household));

        assert_eq!(result.projection.len(), 10);
        for entry in &result.projection {
            let cumulative = 15_660.0 * f64::from(entry.year);
            assert!(approx(entry.cumulative_savings, cumulative));
            assert!(approx(entry.net_savings, (cumulative - 80_000.0).max(0.0)));
            assert_eq!(entry.break_even, entry.net_savings > 0.0);
        }
        assert_eq!(result.break_even_year(), Some(6));
    }

    #[test]
    fn lifetime_summaries_at_default_horizons() {
        let result = estimate(&input(100.0, RoofType::Flat, 5000.0, UseType::Household));

        let horizons: Vec<u32> = result.lifetime.iter().map(|s| s.years).collect();
        assert_eq!(horizons, vec![5, 10, 20]);

        let ten = result.lifetime_at(10).unwrap();
        assert!(approx(ten.total_savings, 156_600.0));
        assert!(approx(ten.net_profit, 76_600.0));
        assert!(result.lifetime_at(7).is_none());
    }

    #[test]
    fn annual_return_and_tank_days() {
        let result = estimate(&input(100.0, RoofType::Flat, 5000.0, UseType::Household));
        assert!(approx(result.annual_return_pct, 15_660.0 / 80_000.0 * 100.0));

        // 60.8 / 365 rounds to a daily collection of 0 litres.
        assert!(result.tank_storage_days.is_infinite());

        let big_roof = estimate(&input(50_000.0, RoofType::Flat, 5000.0, UseType::Household));
        // 30400 / 365 = 83.3 -> 83 litres/day; 5000 / 83 = 60.24 -> 60.2 days.
        assert!(approx(big_roof.tank_storage_days, 60.2));
    }

    #[test]
    fn submersible_source_saves_more_electricity() {
        let mut snapshot = input(100.0, RoofType::Flat, 5000.0, UseType::Household);
        snapshot.water_source = WaterSource::Submersible;

        let result = estimate(&snapshot);
        assert!(approx(result.cost_comparison.annual_water_savings, 18_000.0));
        assert!(approx(
            result.cost_comparison.annual_electricity_savings,
            8_640.0
        ));
    }

    #[test]
    fn rainfall_is_injectable() {
        let config = Config {
            average_rainfall_mm: 1600.0,
            ..Config::default()
        };
        let estimator = Estimator::new(config);
        let snapshot = input(100.0, RoofType::Flat, 5000.0, UseType::Household);

        let doubled = estimator.estimate(&snapshot);
        let baseline = estimate(&snapshot);
        assert!(approx(
            doubled.collection.annual_liters,
            baseline.collection.annual_liters * 2.0
        ));
    }

    #[test]
    fn custom_projection_length_and_horizons() {
        let config = Config {
            projection_years: 3,
            lifetime_horizons: vec![1],
            ..Config::default()
        };
        let result = Estimator::new(config)
            .estimate(&input(100.0, RoofType::Flat, 5000.0, UseType::Household));
        assert_eq!(result.projection.len(), 3);
        assert_eq!(result.lifetime.len(), 1);
    }

    #[test]
    fn estimate_is_idempotent() {
        let snapshot = input(87.5, RoofType::Sloped, 3000.0, UseType::Household);
        let estimator = Estimator::default();
        assert_eq!(estimator.estimate(&snapshot), estimator.estimate(&snapshot));
    }

    #[test]
    fn serializes_non_calculable_payback_as_null() {
        let result = estimate(&input(0.0, RoofType::Flat, 5000.0, UseType::Household));
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["overview_payback_years"].is_null());
        assert!(json["cost_comparison_payback_years"].is_number());
    }
}
