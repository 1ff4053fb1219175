//! Pick regions derived from storage locations.
//!
//! The stored region column is unreliable (one route always reports the same
//! code), so region is taken from the first character of the slot. Slots at
//! or after [`OVERFLOW_THRESHOLD`] live in the main warehouse and form a single
//! overflow region.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::record::PickLineItem;

/// Slots whose first character sorts at or after this are in the overflow region.
pub const OVERFLOW_THRESHOLD: char = 'M';

/// Code of the overflow region.
pub const OVERFLOW_CODE: &str = "MW";

/// A pick region.
///
/// The derived ordering matches the order of the region codes: unslotted
/// first, then single-character departments, then `MW`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    /// Items with no location.
    Unslotted,
    /// A single-character department below the threshold.
    Dept(char),
    /// The main-warehouse overflow region (`M` through `Z`).
    Overflow,
}

impl Region {
    /// Derive the region for a storage location.
    pub fn of_location(location: &str) -> Self {
        match location.trim().chars().next() {
            None => Region::Unslotted,
            Some(c) => {
                let c = c.to_ascii_uppercase();
                if c >= OVERFLOW_THRESHOLD {
                    Region::Overflow
                } else {
                    Region::Dept(c)
                }
            }
        }
    }

    /// Short code: `MW`, the department character, or empty when unslotted.
    pub fn code(&self) -> String {
        match self {
            Region::Unslotted => String::new(),
            Region::Dept(c) => c.to_string(),
            Region::Overflow => OVERFLOW_CODE.to_string(),
        }
    }

    /// Name printed in the pick-list header.
    pub fn display_name(&self) -> String {
        match self {
            Region::Unslotted => "UNSLOTTED".to_string(),
            Region::Dept(c) => format!("DEPT {c}"),
            Region::Overflow => "Main Warehouse (M-Z)".to_string(),
        }
    }

    /// Returns `true` for the overflow region.
    pub fn is_overflow(&self) -> bool {
        matches!(self, Region::Overflow)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Unslotted => f.write_str("-"),
            other => f.write_str(&other.code()),
        }
    }
}

/// Error returned when a region code cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegionParseError {
    /// The code was empty.
    #[error("region code is empty")]
    Empty,
    /// The code is neither `MW` nor a single character.
    #[error("unknown region code: {0}")]
    Unknown(String),
}

impl FromStr for Region {
    type Err = RegionParseError;

    /// Parse `MW` or a single department character. A character at or after
    /// the threshold names the overflow region.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RegionParseError::Empty);
        }
        if s.eq_ignore_ascii_case(OVERFLOW_CODE) {
            return Ok(Region::Overflow);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(_), None) => Ok(Region::of_location(s)),
            _ => Err(RegionParseError::Unknown(s.to_string())),
        }
    }
}

/// Group pick items by derived region.
///
/// Regions come out in code order; within a region items are ordered by
/// location, keeping input order for equal locations.
pub fn group_by_region<I>(items: I) -> BTreeMap<Region, Vec<PickLineItem>>
where
    I: IntoIterator<Item = PickLineItem>,
{
    let mut grouped: BTreeMap<Region, Vec<PickLineItem>> = BTreeMap::new();
    for item in items {
        grouped.entry(item.region()).or_default().push(item);
    }
    for items in grouped.values_mut() {
        items.sort_by(|a, b| a.location.cmp(&b.location));
    }
    grouped
}
