//! Rooftop Rainwater Harvesting Estimates
//!
//! Turns a snapshot of roof, tank, water-source and bill inputs into
//! collection volumes, system cost, payback periods and savings projections.

pub mod domain;
pub use domain::{Config, Payback, RoofType, UseType, UserInput, WaterSource};

pub mod estimate;
pub use estimate::{Collection, Estimator, ResultSet, estimate};
