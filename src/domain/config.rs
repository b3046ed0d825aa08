use std::path::Path;

use nonempty::nonempty;
use serde::{Deserialize, Serialize};

use super::{
    input::{RoofType, UseType, WaterSource},
    savings::SavingsRates,
    tier::{Tier, TierTable},
};

/// The constants behind every estimate.
///
/// Defaults reproduce the published calculator. Each value can be overridden,
/// either in code or through a TOML file loaded with [`Config::load`], so that
/// the fixed rainfall figure can later be swapped for measured data without
/// touching the formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Versions", into = "Versions")]
pub struct Config {
    /// Fraction of rainfall that becomes collectible runoff.
    pub runoff_coefficient: f64,

    /// Average annual rainfall in millimetres.
    pub average_rainfall_mm: f64,

    /// Collection efficiency of a flat roof.
    pub flat_roof_efficiency: f64,

    /// Collection efficiency of a sloped roof.
    pub sloped_roof_efficiency: f64,

    /// Multiplier turning annual collection into annual savings (₹).
    pub savings_rate: f64,

    /// Kilograms of CO₂ offset per unit of annual collection.
    pub carbon_factor: f64,

    /// System cost per litre of tank capacity assumed by the overview
    /// payback estimate.
    pub overview_payback_factor: f64,

    /// System cost tiers for household installations.
    pub household_tiers: TierTable,

    /// System cost tiers for commercial installations.
    pub commercial_tiers: TierTable,

    /// Bill savings fractions by water source.
    pub savings: SavingsRates,

    /// Number of years in the savings projection.
    pub projection_years: u32,

    /// Horizons, in years, for the lifetime summaries.
    pub lifetime_horizons: Vec<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runoff_coefficient: default_runoff_coefficient(),
            average_rainfall_mm: default_average_rainfall_mm(),
            flat_roof_efficiency: default_flat_roof_efficiency(),
            sloped_roof_efficiency: default_sloped_roof_efficiency(),
            savings_rate: default_savings_rate(),
            carbon_factor: default_carbon_factor(),
            overview_payback_factor: default_overview_payback_factor(),
            household_tiers: default_household_tiers(),
            commercial_tiers: default_commercial_tiers(),
            savings: SavingsRates::default(),
            projection_years: default_projection_years(),
            lifetime_horizons: default_lifetime_horizons(),
        }
    }
}

/// The longest savings projection a configuration may ask for.
pub const MAX_PROJECTION_YEARS: u32 = 100;

/// Errors raised while reading or writing a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Read(#[source] std::io::Error),

    /// The file is not a valid configuration.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The file could not be written.
    #[error("failed to write config file: {0}")]
    Write(#[source] std::io::Error),
}

/// A configuration value that is out of range.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InvalidConfig {
    /// A scalar constant was negative or not finite.
    #[error("{0} must be a finite, non-negative number")]
    Constant(&'static str),

    /// A roof efficiency or the runoff coefficient was above 1.
    #[error("{0} must not exceed 1")]
    Fraction(&'static str),

    /// The projection length was zero or longer than [`MAX_PROJECTION_YEARS`].
    #[error("projection_years must be between 1 and 100 (got {0})")]
    ProjectionYears(u32),

    /// A water source's savings fractions fell outside `[0, 1]`.
    #[error("savings fractions for {0} must lie between 0 and 1")]
    Savings(WaterSource),
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid or out of range.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(LoadError::Read)?;
        Ok(toml::from_str(&content)?)
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), LoadError> {
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(LoadError::Write)
    }

    /// Renders the configuration as pretty-printed TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, LoadError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks that every constant is in range.
    ///
    /// # Errors
    ///
    /// Returns the first value that is out of range.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        let fractions = [
            ("runoff_coefficient", self.runoff_coefficient),
            ("flat_roof_efficiency", self.flat_roof_efficiency),
            ("sloped_roof_efficiency", self.sloped_roof_efficiency),
        ];
        let constants = [
            ("average_rainfall_mm", self.average_rainfall_mm),
            ("savings_rate", self.savings_rate),
            ("carbon_factor", self.carbon_factor),
            ("overview_payback_factor", self.overview_payback_factor),
        ];

        for (name, value) in fractions.iter().chain(&constants) {
            if !value.is_finite() || *value < 0.0 {
                return Err(InvalidConfig::Constant(*name));
            }
        }
        for (name, value) in fractions {
            if value > 1.0 {
                return Err(InvalidConfig::Fraction(name));
            }
        }
        if !(1..=MAX_PROJECTION_YEARS).contains(&self.projection_years) {
            return Err(InvalidConfig::ProjectionYears(self.projection_years));
        }
        if let Some(source) = self.savings.first_invalid() {
            return Err(InvalidConfig::Savings(source));
        }
        Ok(())
    }

    /// Collection efficiency for the given roof.
    #[must_use]
    pub const fn roof_efficiency(&self, roof: RoofType) -> f64 {
        match roof {
            RoofType::Flat => self.flat_roof_efficiency,
            RoofType::Sloped => self.sloped_roof_efficiency,
        }
    }

    /// The cost tier table for the given use.
    #[must_use]
    pub const fn tiers(&self, use_type: UseType) -> &TierTable {
        match use_type {
            UseType::Household => &self.household_tiers,
            UseType::Commercial => &self.commercial_tiers,
        }
    }
}

const fn default_runoff_coefficient() -> f64 {
    0.8
}

const fn default_average_rainfall_mm() -> f64 {
    800.0
}

const fn default_flat_roof_efficiency() -> f64 {
    0.95
}

const fn default_sloped_roof_efficiency() -> f64 {
    0.87
}

const fn default_savings_rate() -> f64 {
    3.0
}

const fn default_carbon_factor() -> f64 {
    0.5
}

const fn default_overview_payback_factor() -> f64 {
    0.05
}

const fn default_projection_years() -> u32 {
    10
}

fn default_lifetime_horizons() -> Vec<u32> {
    vec![5, 10, 20]
}

fn default_household_tiers() -> TierTable {
    TierTable::from_trusted(nonempty![
        Tier::up_to(1000.0, 50_000.0),
        Tier::up_to(5000.0, 80_000.0),
        Tier::unbounded(135_000.0)
    ])
}

fn default_commercial_tiers() -> TierTable {
    TierTable::from_trusted(nonempty![
        Tier::up_to(25_000.0, 215_000.0),
        Tier::unbounded(385_000.0)
    ])
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_runoff_coefficient")]
        runoff_coefficient: f64,

        /// Millimetres per year.
        #[serde(default = "default_average_rainfall_mm")]
        average_rainfall_mm: f64,

        #[serde(default = "default_flat_roof_efficiency")]
        flat_roof_efficiency: f64,

        #[serde(default = "default_sloped_roof_efficiency")]
        sloped_roof_efficiency: f64,

        #[serde(default = "default_savings_rate")]
        savings_rate: f64,

        #[serde(default = "default_carbon_factor")]
        carbon_factor: f64,

        #[serde(default = "default_overview_payback_factor")]
        overview_payback_factor: f64,

        #[serde(default = "default_projection_years")]
        projection_years: u32,

        #[serde(default = "default_lifetime_horizons")]
        lifetime_horizons: Vec<u32>,

        #[serde(default)]
        savings: SavingsRates,

        #[serde(default = "default_household_tiers")]
        household_tiers: TierTable,

        #[serde(default = "default_commercial_tiers")]
        commercial_tiers: TierTable,
    },
}

impl TryFrom<Versions> for Config {
    type Error = InvalidConfig;

    fn try_from(versions: Versions) -> Result<Self, Self::Error> {
        let config = match versions {
            Versions::V1 {
                runoff_coefficient,
                average_rainfall_mm,
                flat_roof_efficiency,
                sloped_roof_efficiency,
                savings_rate,
                carbon_factor,
                overview_payback_factor,
                projection_years,
                lifetime_horizons,
                savings,
                household_tiers,
                commercial_tiers,
            } => Self {
                runoff_coefficient,
                average_rainfall_mm,
                flat_roof_efficiency,
                sloped_roof_efficiency,
                savings_rate,
                carbon_factor,
                overview_payback_factor,
                household_tiers,
                commercial_tiers,
                savings,
                projection_years,
                lifetime_horizons,
            },
        };
        config.validate()?;
        Ok(config)
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            runoff_coefficient: config.runoff_coefficient,
            average_rainfall_mm: config.average_rainfall_mm,
            flat_roof_efficiency: config.flat_roof_efficiency,
            sloped_roof_efficiency: config.sloped_roof_efficiency,
            savings_rate: config.savings_rate,
            carbon_factor: config.carbon_factor,
            overview_payback_factor: config.overview_payback_factor,
            projection_years: config.projection_years,
            lifetime_horizons: config.lifetime_horizons,
            savings: config.savings,
            household_tiers: config.household_tiers,
            commercial_tiers: config.commercial_tiers,
        }
    }
}
