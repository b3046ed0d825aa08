//! Step-function price tables.
//!
//! A [`TierTable`] is an ordered list of `(threshold, cost)` pairs. Lookups
//! scan the tiers in ascending order and pick the first whose threshold is at
//! least the queried capacity, so boundaries belong to the lower tier.

use nonempty::NonEmpty;
use serde::{Deserialize, Serialize};

/// A single price step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Inclusive upper bound on tank capacity in litres. `None` means the
    /// tier is unbounded and catches every larger capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up_to: Option<f64>,

    /// System cost (₹) for capacities in this tier.
    pub cost: f64,
}

impl Tier {
    /// A tier covering capacities up to and including `up_to`.
    #[must_use]
    pub const fn up_to(up_to: f64, cost: f64) -> Self {
        Self {
            up_to: Some(up_to),
            cost,
        }
    }

    /// The catch-all tier for capacities above every threshold.
    #[must_use]
    pub const fn unbounded(cost: f64) -> Self {
        Self { up_to: None, cost }
    }

    fn contains(&self, capacity: f64) -> bool {
        self.up_to.is_none_or(|limit| capacity <= limit)
    }
}

/// Reasons a list of tiers cannot form a [`TierTable`].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TierError {
    /// No tiers were given.
    #[error("a tier table needs at least one tier")]
    Empty,

    /// A threshold was not strictly greater than the one before it.
    #[error("tier thresholds must be strictly ascending ({previous} is followed by {next})")]
    Unordered {
        /// The earlier threshold.
        previous: f64,
        /// The offending threshold.
        next: f64,
    },

    /// An unbounded tier appeared before the end of the table.
    #[error("only the last tier may be unbounded")]
    UnboundedNotLast,

    /// A tier was cheaper than the tier before it.
    #[error("tier costs must not decrease ({previous} is followed by {next})")]
    DecreasingCost {
        /// The earlier cost.
        previous: f64,
        /// The offending cost.
        next: f64,
    },

    /// A threshold or cost was negative or not a finite number.
    #[error("tier values must be finite and non-negative (got {0})")]
    InvalidValue(f64),
}

/// An ordered, validated list of price tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tier>", into = "Vec<Tier>")]
pub struct TierTable {
    tiers: NonEmpty<Tier>,
}

impl TierTable {
    /// Builds a table from tiers listed in ascending order.
    ///
    /// # Errors
    ///
    /// Returns a [`TierError`] if the list is empty, the thresholds are not
    /// strictly ascending, a cost is lower than the one before it, an unbounded
    /// tier is not last, or any value is negative or non-finite.
    pub fn new(tiers: Vec<Tier>) -> Result<Self, TierError> {
        let tiers = NonEmpty::from_vec(tiers).ok_or(TierError::Empty)?;

        let mut previous: Option<f64> = None;
        let mut previous_cost: Option<f64> = None;
        let last = tiers.len() - 1;
        for (index, tier) in tiers.iter().enumerate() {
            check_value(tier.cost)?;
            if let Some(previous) = previous_cost {
                if tier.cost < previous {
                    return Err(TierError::DecreasingCost {
                        previous,
                        next: tier.cost,
                    });
                }
            }
            previous_cost = Some(tier.cost);
            match tier.up_to {
                None if index != last => return Err(TierError::UnboundedNotLast),
                None => {}
                Some(limit) => {
                    check_value(limit)?;
                    if let Some(previous) = previous {
                        if limit <= previous {
                            return Err(TierError::Unordered {
                                previous,
                                next: limit,
                            });
                        }
                    }
                    previous = Some(limit);
                }
            }
        }

        Ok(Self { tiers })
    }

    /// Wraps tiers that are already known to satisfy the table's ordering
    /// rules, such as the built-in price lists.
    pub(crate) const fn from_trusted(tiers: NonEmpty<Tier>) -> Self {
        Self { tiers }
    }

    /// Returns the cost of the first tier that covers `capacity`.
    ///
    /// Capacities above every bounded threshold fall into the final tier,
    /// whether or not it is marked unbounded.
    #[must_use]
    pub fn lookup(&self, capacity: f64) -> f64 {
        self.tiers
            .iter()
            .find(|tier| tier.contains(capacity))
            .unwrap_or_else(|| self.tiers.last())
            .cost
    }

    /// Iterates over the tiers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &Tier> {
        self.tiers.iter()
    }

    /// The number of tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Always `false`: a table holds at least one tier.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

const fn check_value(value: f64) -> Result<(), TierError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TierError::InvalidValue(value))
    }
}

impl TryFrom<Vec<Tier>> for TierTable {
    type Error = TierError;

    fn try_from(tiers: Vec<Tier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<TierTable> for Vec<Tier> {
    fn from(table: TierTable) -> Self {
        table.tiers.into()
    }
}
