//! Validated distance tier schedules.
//!
//! Venues publish their tiers as a list of `{min, max, a, b, flag}` objects in
//! which `max == 0` marks the last, open-ended tier. [`RawDistanceRange`] is
//! that wire shape; [`DistanceRangeTable`] is the validated form, where the
//! open upper bound is `None` instead of a magic zero.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, QuoteError};

/// One distance tier exactly as published by the venue API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDistanceRange {
    pub min: u64,
    /// Exclusive upper bound in meters; `0` on the last tier means "no limit".
    pub max: u64,
    pub a: i64,
    pub b: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<serde_json::Value>,
}

/// One validated distance tier covering `[min, max)` meters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceRange {
    pub min: u64,
    /// `None` only on the terminal tier.
    pub max: Option<u64>,
    /// Flat fee addend in cents.
    pub a: i64,
    /// Distance-rate coefficient, applied as `b * distance / 10`.
    pub b: i64,
    pub flag: Option<serde_json::Value>,
}

impl DistanceRange {
    #[must_use]
    pub fn contains(&self, distance: u64) -> bool {
        distance >= self.min && self.max.is_none_or(|max| distance < max)
    }

    #[must_use]
    pub fn is_open_ended(&self) -> bool {
        self.max.is_none()
    }
}

/// An ordered, gap-free, non-overlapping schedule of distance tiers.
///
/// The only way to build one is [`DistanceRangeTable::new`] (or deserializing,
/// which goes through it), so every table in memory satisfies:
/// non-empty, starts at 0, ends open-ended, strictly ascending, contiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RawDistanceRange>", into = "Vec<RawDistanceRange>")]
pub struct DistanceRangeTable {
    ranges: Vec<DistanceRange>,
}

impl DistanceRangeTable {
    /// Validates `raw` and converts it into a table.
    ///
    /// Checks run in a fixed order and the first failure is reported.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigurationError`] variant for the first violated rule.
    pub fn new(raw: Vec<RawDistanceRange>) -> Result<Self, ConfigurationError> {
        let (Some(first), Some(last)) = (raw.first(), raw.last()) else {
            return Err(ConfigurationError::EmptyRanges);
        };

        if first.min != 0 {
            return Err(ConfigurationError::FirstRangeNotZero { min: first.min });
        }

        if last.max != 0 {
            return Err(ConfigurationError::LastRangeNotOpenEnded { max: last.max });
        }

        for (index, pair) in raw.windows(2).enumerate() {
            if pair[1].min <= pair[0].min {
                return Err(ConfigurationError::UnsortedRanges {
                    index: index + 1,
                    previous_min: pair[0].min,
                    min: pair[1].min,
                });
            }
        }

        for (index, pair) in raw.windows(2).enumerate() {
            if pair[0].max != pair[1].min {
                return Err(ConfigurationError::RangeGap {
                    index,
                    max: pair[0].max,
                    next_min: pair[1].min,
                });
            }
        }

        let terminal = raw.len() - 1;
        let ranges = raw
            .into_iter()
            .enumerate()
            .map(|(i, r)| DistanceRange {
                min: r.min,
                max: (i != terminal).then_some(r.max),
                a: r.a,
                b: r.b,
                flag: r.flag,
            })
            .collect();

        Ok(Self { ranges })
    }

    /// Finds the tier pricing `distance`.
    ///
    /// The open-ended tier only marks where the service area ends and never
    /// prices an order, so distances at or beyond
    /// [`max_allowed_distance`](Self::max_allowed_distance) have no tier.
    ///
    /// # Errors
    ///
    /// Returns [`QuoteError::NoApplicableRange`] if no bounded tier contains
    /// `distance`.
    pub fn lookup(&self, distance: u64) -> Result<&DistanceRange, QuoteError> {
        self.ranges
            .iter()
            .filter(|r| !r.is_open_ended())
            .find(|r| r.contains(distance))
            .ok_or(QuoteError::NoApplicableRange { distance })
    }

    /// Lower bound of the open-ended tier; the service area ends here.
    #[must_use]
    pub fn max_allowed_distance(&self) -> u64 {
        self.ranges.last().map_or(0, |r| r.min)
    }

    #[must_use]
    pub fn ranges(&self) -> &[DistanceRange] {
        &self.ranges
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl TryFrom<Vec<RawDistanceRange>> for DistanceRangeTable {
    type Error = ConfigurationError;

    fn try_from(raw: Vec<RawDistanceRange>) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<DistanceRangeTable> for Vec<RawDistanceRange> {
    fn from(table: DistanceRangeTable) -> Self {
        table
            .ranges
            .into_iter()
            .map(|r| RawDistanceRange {
                min: r.min,
                max: r.max.unwrap_or(0),
                a: r.a,
                b: r.b,
                flag: r.flag,
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "ranges_test.rs"]
mod tests;
