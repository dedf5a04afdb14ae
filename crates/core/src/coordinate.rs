//! Library coordinates: wall, shelf, volume and page.
//!
//! A coordinate is four independently bounded fields drawn uniformly at
//! random for every encode call. Each field renders as a zero-padded decimal
//! whose width is the digit count of its bound. Concatenating
//! `page ‖ volume ‖ shelf ‖ wall` and reading the result as a decimal number
//! gives the coordinate seed that is folded into the address integer.
//!
//! With the default bounds (4 walls, 5 shelves, 32 volumes, 410 pages) the
//! coordinate `wall 3, shelf 5, volume 7, page 12` has seed `0120753`.

use crate::address::Address;
use crate::error::{AddressError, Result};
use num_bigint::BigUint;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const WALLS_PER_HEXAGON: u32 = 4;
pub const SHELVES_PER_WALL: u32 = 5;
pub const VOLUMES_PER_SHELF: u32 = 32;
pub const PAGES_PER_VOLUME: u32 = 410;

/// Upper bounds for the four coordinate fields. Every field starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinateBounds {
    pub walls: u32,
    pub shelves: u32,
    pub volumes: u32,
    pub pages: u32,
}

impl Default for CoordinateBounds {
    fn default() -> Self {
        Self {
            walls: WALLS_PER_HEXAGON,
            shelves: SHELVES_PER_WALL,
            volumes: VOLUMES_PER_SHELF,
            pages: PAGES_PER_VOLUME,
        }
    }
}

impl CoordinateBounds {
    /// The largest coordinate these bounds allow.
    pub fn max_coordinate(&self) -> Coordinate {
        Coordinate {
            wall: self.walls,
            shelf: self.shelves,
            volume: self.volumes,
            page: self.pages,
        }
    }

    /// True if every bound is at least 1.
    pub fn is_valid(&self) -> bool {
        self.walls >= 1 && self.shelves >= 1 && self.volumes >= 1 && self.pages >= 1
    }
}

/// Decimal digit count of `n` (1 for zero).
fn digit_width(n: u32) -> usize {
    n.checked_ilog10().map_or(1, |log| log as usize + 1)
}

/// One page position inside the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub wall: u32,
    pub shelf: u32,
    pub volume: u32,
    pub page: u32,
}

impl Coordinate {
    /// Draw each field uniformly from `1..=bound`.
    pub fn generate<R: Rng + ?Sized>(bounds: &CoordinateBounds, rng: &mut R) -> Self {
        Self {
            wall: rng.gen_range(1..=bounds.walls),
            shelf: rng.gen_range(1..=bounds.shelves),
            volume: rng.gen_range(1..=bounds.volumes),
            page: rng.gen_range(1..=bounds.pages),
        }
    }

    /// Parse and range-check the four trailing fields of an address.
    ///
    /// # Errors
    /// - `AddressError::Malformed` if a field is not a decimal number
    /// - `AddressError::CoordinateOutOfRange` if a field is 0 or above its bound
    pub fn from_address(address: &Address, bounds: &CoordinateBounds) -> Result<Self> {
        Ok(Self {
            wall: parse_field("wall", address.wall(), bounds.walls)?,
            shelf: parse_field("shelf", address.shelf(), bounds.shelves)?,
            volume: parse_field("volume", address.volume(), bounds.volumes)?,
            page: parse_field("page", address.page(), bounds.pages)?,
        })
    }

    /// Fields rendered at the widths implied by `bounds`, in address order
    /// (wall, shelf, volume, page).
    pub fn render(&self, bounds: &CoordinateBounds) -> [String; 4] {
        [
            format!("{:0w$}", self.wall, w = digit_width(bounds.walls)),
            format!("{:0w$}", self.shelf, w = digit_width(bounds.shelves)),
            format!("{:0w$}", self.volume, w = digit_width(bounds.volumes)),
            format!("{:0w$}", self.page, w = digit_width(bounds.pages)),
        ]
    }

    /// `page ‖ volume ‖ shelf ‖ wall` read as one decimal number.
    pub fn seed(&self, bounds: &CoordinateBounds) -> BigUint {
        let [wall, shelf, volume, page] = self.render(bounds);
        let digits = format!("{page}{volume}{shelf}{wall}");
        // Only ASCII digits, so parsing cannot fail
        BigUint::parse_bytes(digits.as_bytes(), 10).unwrap_or_default()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "wall {} shelf {} volume {} page {}",
            self.wall, self.shelf, self.volume, self.page
        )
    }
}

fn parse_field(field: &'static str, text: &str, max: u32) -> Result<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AddressError::Malformed {
            reason: format!("{field} {text:?} is not a decimal number"),
        }
        .into());
    }

    let trimmed = text.trim_start_matches('0');
    let value = if trimmed.is_empty() {
        0
    } else {
        trimmed.parse::<u64>().unwrap_or(u64::MAX)
    };

    if value == 0 || value > u64::from(max) {
        return Err(AddressError::CoordinateOutOfRange { field, value, max }.into());
    }

    Ok(value as u32)
}
