use std::fmt;

use serde::{Serialize, Serializer};

/// A payback period in years.
///
/// Payback divides a cost by a yearly saving, so a zero saving produces an
/// infinite or NaN result. Those are kept as-is rather than raised as errors;
/// use [`Payback::as_option`] or the [`Display`](fmt::Display) impl to show
/// them as "not calculable".
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Payback(f64);

impl Payback {
    /// Wraps a raw number of years.
    #[must_use]
    pub const fn new(years: f64) -> Self {
        Self(years)
    }

    /// The raw value, which may be non-finite.
    #[must_use]
    pub const fn years(self) -> f64 {
        self.0
    }

    /// Whether the period is a finite number of years.
    #[must_use]
    pub const fn is_calculable(self) -> bool {
        self.0.is_finite()
    }

    /// The period, or `None` when it cannot be calculated.
    #[must_use]
    pub const fn as_option(self) -> Option<f64> {
        if self.is_calculable() {
            Some(self.0)
        } else {
            None
        }
    }
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.as_option() {
            Some(years) => write!(f, "{years:.1} years"),
            None => f.write_str("not calculable"),
        }
    }
}

impl Serialize for Payback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_option().serialize(serializer)
    }
}
