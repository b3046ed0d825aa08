use serde::Serialize;

/// Rainfall and collection potential for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyRainfall {
    /// Three-letter month name.
    pub month: &'static str,
    /// Rainfall in millimetres.
    pub rainfall_mm: u32,
    /// Collectible water on the same scale as `rainfall_mm`.
    pub collection: u32,
}

/// Yearly carbon footprint figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CarbonFootprint {
    /// Tonnes CO₂ per year today.
    pub current_tonnes: f64,
    /// Tonnes CO₂ per year with a harvesting system.
    pub with_rwh_tonnes: f64,
    /// Percentage reduction.
    pub reduction_pct: u32,
}

/// Climate facts shown alongside an estimate.
///
/// There is no weather service behind this; [`WeatherProfile::placeholder`]
/// returns fixed figures. The estimation formulas take their rainfall from
/// [`Config::average_rainfall_mm`](crate::Config::average_rainfall_mm)
/// instead, so replacing this profile does not change any estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherProfile {
    /// Annual rainfall in millimetres.
    pub annual_rainfall_mm: u32,
    /// Depth to groundwater in metres.
    pub groundwater_level_m: u32,
    /// Climate classification.
    pub climate_zone: &'static str,
    /// Months of the monsoon.
    pub monsoon_season: &'static str,
    /// Mean temperature in °C.
    pub average_temperature_c: u32,
    /// Mean relative humidity in percent.
    pub humidity_pct: u32,
    /// Mean wind speed in km/h.
    pub wind_speed_kmh: u32,
    /// Minerals typically found in local water.
    pub minerals: &'static [&'static str],
    /// Household carbon footprint with and without harvesting.
    pub carbon_footprint: CarbonFootprint,
    /// January to December.
    pub monthly: &'static [MonthlyRainfall; 12],
}

const MONTHLY: [MonthlyRainfall; 12] = [
    month("Jan", 15, 12),
    month("Feb", 22, 18),
    month("Mar", 35, 28),
    month("Apr", 45, 36),
    month("May", 85, 68),
    month("Jun", 165, 132),
    month("Jul", 195, 156),
    month("Aug", 180, 144),
    month("Sep", 145, 116),
    month("Oct", 75, 60),
    month("Nov", 35, 28),
    month("Dec", 18, 14),
];

const fn month(month: &'static str, rainfall_mm: u32, collection: u32) -> MonthlyRainfall {
    MonthlyRainfall {
        month,
        rainfall_mm,
        collection,
    }
}

impl WeatherProfile {
    /// Fixed stand-in figures for a tropical monsoon location.
    #[must_use]
    pub const fn placeholder() -> Self {
        Self {
            annual_rainfall_mm: 847,
            groundwater_level_m: 15,
            climate_zone: "Tropical Monsoon",
            monsoon_season: "June - September",
            average_temperature_c: 28,
            humidity_pct: 65,
            wind_speed_kmh: 12,
            minerals: &["Calcium", "Magnesium", "Iron traces"],
            carbon_footprint: CarbonFootprint {
                current_tonnes: 2.5,
                with_rwh_tonnes: 1.8,
                reduction_pct: 28,
            },
            monthly: &MONTHLY,
        }
    }

    /// The wettest month.
    #[must_use]
    pub fn peak_month(&self) -> &MonthlyRainfall {
        let mut peak = &self.monthly[0];
        for month in self.monthly {
            if month.rainfall_mm > peak.rainfall_mm {
                peak = month;
            }
        }
        peak
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monthly_table_covers_the_year() {
        let profile = WeatherProfile::placeholder();
        assert_eq!(profile.monthly.len(), 12);
        assert_eq!(profile.monthly[0].month, "Jan");
        assert_eq!(profile.monthly[11].month, "Dec");
    }

    #[test]
    fn july_is_the_wettest_month() {
        assert_eq!(WeatherProfile::placeholder().peak_month().month, "Jul");
    }

    #[test]
    fn collection_never_exceeds_rainfall() {
        for month in WeatherProfile::placeholder().monthly {
            assert!(month.collection <= month.rainfall_mm, "{}", month.month);
        }
    }
}
