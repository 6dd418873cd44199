//! VLAN ID and VLAN range types with validation.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of VLAN IDs that may be reserved for infrastructure use.
pub const MAX_RESERVED_VLANS: usize = 512;

/// IEEE 802.1Q VLAN identifier (1-4094).
///
/// # Examples
///
/// ```
/// use nxos_types::VlanId;
///
/// let vlan = VlanId::new(100).unwrap();
/// assert_eq!(vlan.as_u16(), 100);
///
/// assert!(VlanId::new(0).is_err());
/// assert!(VlanId::new(4095).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct VlanId(u16);

impl VlanId {
    /// Minimum valid VLAN ID.
    pub const MIN: u16 = 1;

    /// Maximum valid VLAN ID.
    pub const MAX: u16 = 4094;

    /// Creates a new VLAN ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the VLAN ID is not in the valid range (1-4094).
    pub const fn new(id: u16) -> Result<Self, ParseError> {
        if id >= Self::MIN && id <= Self::MAX {
            Ok(VlanId(id))
        } else {
            Err(ParseError::InvalidVlanId(id))
        }
    }

    /// Returns the VLAN ID as a u16.
    pub const fn as_u16(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for VlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VlanId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id_str = if s.to_lowercase().starts_with("vlan") {
            &s[4..]
        } else {
            s
        };

        let id: u16 = id_str.parse().map_err(|_| ParseError::InvalidVlanId(0))?;
        VlanId::new(id)
    }
}

impl TryFrom<u16> for VlanId {
    type Error = ParseError;

    fn try_from(id: u16) -> Result<Self, Self::Error> {
        VlanId::new(id)
    }
}

impl From<VlanId> for u16 {
    fn from(vlan: VlanId) -> u16 {
        vlan.0
    }
}

/// A closed range of VLAN IDs, written `10-20`, or a single ID written `15`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VlanRange {
    start: VlanId,
    end: VlanId,
}

impl VlanRange {
    /// Creates a range from two IDs, rejecting a start beyond the end.
    pub fn new(start: u16, end: u16) -> Result<Self, ParseError> {
        let start = VlanId::new(start)?;
        let end = VlanId::new(end)?;
        if start > end {
            return Err(ParseError::InvalidVlanRange(format!("{}-{}", start, end)));
        }
        Ok(VlanRange { start, end })
    }

    /// Creates a range holding exactly one ID.
    pub fn single(id: u16) -> Result<Self, ParseError> {
        Self::new(id, id)
    }

    pub const fn start(&self) -> VlanId {
        self.start
    }

    pub const fn end(&self) -> VlanId {
        self.end
    }

    /// Number of VLAN IDs covered by this range.
    pub const fn len(&self) -> usize {
        (self.end.as_u16() - self.start.as_u16()) as usize + 1
    }

    /// Ranges are never empty; present for clippy's `len_without_is_empty`.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Closed-interval overlap; ranges sharing a boundary ID overlap.
    pub fn overlaps(&self, other: &VlanRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for VlanRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

impl FromStr for VlanRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidVlanRange(s.to_string());
        match s.trim().split_once('-') {
            Some((start, end)) => {
                let start = start.trim().parse().map_err(|_| invalid())?;
                let end = end.trim().parse().map_err(|_| invalid())?;
                VlanRange::new(start, end)
            }
            None => VlanRange::single(s.trim().parse().map_err(|_| invalid())?),
        }
    }
}

impl TryFrom<String> for VlanRange {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<VlanRange> for String {
    fn from(range: VlanRange) -> String {
        range.to_string()
    }
}

/// Validates a list of VLAN ranges reserved for infrastructure use.
///
/// The ranges must not overlap (closed intervals, compared after sorting by
/// start) and may cover at most [`MAX_RESERVED_VLANS`] IDs in total.
pub fn validate_reserved_ranges(ranges: &[VlanRange]) -> Result<(), ParseError> {
    let mut sorted = ranges.to_vec();
    sorted.sort_by_key(|r| (r.start, r.end));

    for pair in sorted.windows(2) {
        if pair[0].overlaps(&pair[1]) {
            return Err(ParseError::OverlappingVlanRanges {
                first: pair[0],
                second: pair[1],
            });
        }
    }

    let count: usize = sorted.iter().map(VlanRange::len).sum();
    if count > MAX_RESERVED_VLANS {
        return Err(ParseError::TooManyVlans {
            count,
            limit: MAX_RESERVED_VLANS,
        });
    }

    Ok(())
}
