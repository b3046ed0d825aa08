use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The surface profile of the collecting roof.
///
/// Flat roofs collect more of the runoff that reaches the gutters than sloped
/// ones, which is reflected in the per-roof efficiency in
/// [`Config`](crate::Config).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum RoofType {
    /// A flat (gravity-fed) roof.
    Flat,
    /// A pitched roof.
    Sloped,
}

/// Who the system is sized for. Selects the system cost tier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum UseType {
    /// A single dwelling.
    Household,
    /// Commercial or institutional premises.
    Commercial,
}

/// The water supply the harvested rainwater will partially replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum WaterSource {
    /// Piped supply billed by the municipality.
    Municipality,
    /// Electrically pumped deep groundwater.
    Submersible,
    /// Shallow groundwater from a tube well.
    Tubewell,
    /// Open dug well.
    Well,
}

macro_rules! category {
    ($ty:ident, $field:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// All variants, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The lowercase identifier used on the command line and on disk.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = InputError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($name => Ok(Self::$variant),)+
                    _ => Err(InputError::UnsupportedCategory {
                        field: $field,
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $ty {
            type Error = InputError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$ty> for &'static str {
            fn from(value: $ty) -> Self {
                value.as_str()
            }
        }
    };
}

category!(RoofType, "roof type", { Flat => "flat", Sloped => "sloped" });
category!(UseType, "use type", { Household => "household", Commercial => "commercial" });
category!(WaterSource, "water source", {
    Municipality => "municipality",
    Submersible => "submersible",
    Tubewell => "tubewell",
    Well => "well",
});

/// Errors raised while accepting raw input at the boundary of the engine.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum InputError {
    /// A categorical field held a value outside its enumerated variants.
    #[error("unsupported {field} '{value}'")]
    UnsupportedCategory {
        /// The field being parsed.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A numeric field was negative.
    #[error("{field} must not be negative (got {value})")]
    Negative {
        /// The field being validated.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A numeric field was NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite {
        /// The field being validated.
        field: &'static str,
    },
}

/// A snapshot of everything the collection form gathers from the user.
///
/// The estimation engine assumes the numeric fields are finite and
/// non-negative. [`UserInput::new`] and deserialization enforce that; building
/// the struct literally is left to trusted callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInput", into = "RawInput")]
pub struct UserInput {
    /// Catchment area of the roof in square metres.
    pub rooftop_area_m2: f64,
    /// Roof surface profile.
    pub roof_type: RoofType,
    /// Storage tank capacity in litres.
    pub tank_capacity_liters: f64,
    /// Household or commercial sizing.
    pub use_type: UseType,
    /// Current water supply.
    pub water_source: WaterSource,
    /// Current monthly water bill (₹).
    pub monthly_water_bill: f64,
    /// Current monthly electricity bill (₹).
    pub monthly_electricity_bill: f64,
}

impl UserInput {
    /// Creates a validated input snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Negative`] or [`InputError::NotFinite`] for the
    /// first numeric field that is out of range.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        rooftop_area_m2: f64,
        roof_type: RoofType,
        tank_capacity_liters: f64,
        use_type: UseType,
        water_source: WaterSource,
        monthly_water_bill: f64,
        monthly_electricity_bill: f64,
    ) -> Result<Self, InputError> {
        let input = Self {
            rooftop_area_m2,
            roof_type,
            tank_capacity_liters,
            use_type,
            water_source,
            monthly_water_bill,
            monthly_electricity_bill,
        };
        input.validate()?;
        Ok(input)
    }

    /// Checks that every numeric field is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), InputError> {
        check("rooftop area", self.rooftop_area_m2)?;
        check("tank capacity", self.tank_capacity_liters)?;
        check("monthly water bill", self.monthly_water_bill)?;
        check("monthly electricity bill", self.monthly_electricity_bill)?;
        Ok(())
    }
}

const fn check(field: &'static str, value: f64) -> Result<(), InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(InputError::Negative { field, value });
    }
    Ok(())
}

/// The serialized shape of [`UserInput`], validated on the way in.
#[derive(Debug, Serialize, Deserialize)]
struct RawInput {
    rooftop_area_m2: f64,
    roof_type: RoofType,
    tank_capacity_liters: f64,
    use_type: UseType,
    water_source: WaterSource,
    monthly_water_bill: f64,
    monthly_electricity_bill: f64,
}

impl TryFrom<RawInput> for UserInput {
    type Error = InputError;

    fn try_from(raw: RawInput) -> Result<Self, Self::Error> {
        Self::new(
            raw.rooftop_area_m2,
            raw.roof_type,
            raw.tank_capacity_liters,
            raw.use_type,
            raw.water_source,
            raw.monthly_water_bill,
            raw.monthly_electricity_bill,
        )
    }
}

impl From<UserInput> for RawInput {
    fn from(input: UserInput) -> Self {
        Self {
            rooftop_area_m2: input.rooftop_area_m2,
            roof_type: input.roof_type,
            tank_capacity_liters: input.tank_capacity_liters,
            use_type: input.use_type,
            water_source: input.water_source,
            monthly_water_bill: input.monthly_water_bill,
            monthly_electricity_bill: input.monthly_electricity_bill,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> UserInput {
        UserInput::new(
            100.0,
            RoofType::Flat,
            5000.0,
            UseType::Household,
            WaterSource::Municipality,
            2500.0,
            1800.0,
        )
        .unwrap()
    }

    #[test]
    fn categories_parse_case_insensitively() {
        assert_eq!("Flat".parse::<RoofType>().unwrap(), RoofType::Flat);
        assert_eq!(" sloped ".parse::<RoofType>().unwrap(), RoofType::Sloped);
        assert_eq!(
            "COMMERCIAL".parse::<UseType>().unwrap(),
            UseType::Commercial
        );
        assert_eq!(
            "tubewell".parse::<WaterSource>().unwrap(),
            WaterSource::Tubewell
        );
    }

    #[test]
    fn unknown_category_is_rejected() {
        let error = "river".parse::<WaterSource>().unwrap_err();
        assert_eq!(
            error,
            InputError::UnsupportedCategory {
                field: "water source",
                value: "river".to_string(),
            }
        );
        assert_eq!(error.to_string(), "unsupported water source 'river'");
    }

    #[test]
    fn display_matches_parse() {
        for source in WaterSource::ALL {
            assert_eq!(source.to_string().parse::<WaterSource>().unwrap(), *source);
        }
    }

    #[test]
    fn negative_area_is_rejected() {
        let error = UserInput::new(
            -1.0,
            RoofType::Flat,
            1000.0,
            UseType::Household,
            WaterSource::Well,
            0.0,
            0.0,
        )
        .unwrap_err();
        assert_eq!(
            error,
            InputError::Negative {
                field: "rooftop area",
                value: -1.0
            }
        );
    }

    #[test]
    fn nan_bill_is_rejected() {
        let mut input = sample();
        input.monthly_water_bill = f64::NAN;
        assert_eq!(
            input.validate().unwrap_err(),
            InputError::NotFinite {
                field: "monthly water bill"
            }
        );
    }

    #[test]
    fn zero_values_are_accepted() {
        let mut input = sample();
        input.rooftop_area_m2 = 0.0;
        input.tank_capacity_liters = 0.0;
        assert!(input.validate().is_ok());
    }

    #[test]
    fn deserializes_snake_case_json() {
        let json = r#"{
            "rooftop_area_m2": 100,
            "roof_type": "flat",
            "tank_capacity_liters": 5000,
            "use_type": "household",
            "water_source": "municipality",
            "monthly_water_bill": 2500,
            "monthly_electricity_bill": 1800
        }"#;
        let input: UserInput = serde_json::from_str(json).unwrap();
        assert_eq!(input, sample());
    }

    #[test]
    fn serializes_with_snake_case_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["rooftop_area_m2"], 100.0);
        assert_eq!(value["tank_capacity_liters"], 5000.0);
        assert_eq!(value["water_source"], "municipality");
        assert!(value.get("rooftopAreaM2").is_none());
    }

    #[test]
    fn deserializing_unknown_category_fails() {
        let json = r#"{
            "rooftop_area_m2": 100,
            "roof_type": "dome",
            "tank_capacity_liters": 5000,
            "use_type": "household",
            "water_source": "municipality",
            "monthly_water_bill": 2500,
            "monthly_electricity_bill": 1800
        }"#;
        let error = serde_json::from_str::<UserInput>(json).unwrap_err();
        assert!(error.to_string().contains("unsupported roof type 'dome'"));
    }

    #[test]
    fn deserializing_negative_tank_fails() {
        let json = r#"{
            "rooftop_area_m2": 100,
            "roof_type": "flat",
            "tank_capacity_liters": -5,
            "use_type": "household",
            "water_source": "well",
            "monthly_water_bill": 0,
            "monthly_electricity_bill": 0
        }"#;
        assert!(serde_json::from_str::<UserInput>(json).is_err());
    }
}
