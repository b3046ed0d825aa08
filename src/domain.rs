//! Domain models for rainwater harvesting estimates.
//!
//! This module contains the input snapshot and its categories, the
//! configurable constants, and the building blocks the estimation engine
//! combines: cost tiers, bill savings, payback periods and projections.

mod config;
pub use config::{Config, InvalidConfig, LoadError, MAX_PROJECTION_YEARS};

/// User input and its enumerated categories.
pub mod input;
pub use input::{InputError, RoofType, UseType, UserInput, WaterSource};

/// Static list of interface languages.
pub mod language;
pub use language::{LANGUAGES, Language, UnknownLanguage};

mod payback;
pub use payback::Payback;

pub mod projection;
pub use projection::{LifetimeSummary, YearProjection};

pub mod savings;
pub use savings::{BillCategory, CostComparison, MonthlyComparison, SavingsRates, SavingsShare};

pub mod tier;
pub use tier::{Tier, TierError, TierTable};

/// Placeholder climate data.
pub mod weather;
pub use weather::WeatherProfile;
