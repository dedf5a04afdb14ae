//! The textual address format.
//!
//! ```text
//! REGION:WALL:SHELF:VOLUME:PAGE
//! ```
//!
//! REGION is the fused coordinate and content integer written in the address
//! alphabet. The other four fields are decimal coordinate strings. Parsing is
//! purely syntactic: it splits the fields and re-pads volume and page to
//! their canonical widths (2 and 3 digits). Range checks belong to
//! [`Coordinate::from_address`](crate::coordinate::Coordinate::from_address).

use crate::coordinate::{Coordinate, CoordinateBounds};
use crate::error::{AddressError, Error, Result};
use std::fmt;
use std::str::FromStr;

/// Separates the five address fields.
pub const FIELD_SEPARATOR: char = ':';

/// Canonical width of the volume field.
pub const VOLUME_WIDTH: usize = 2;

/// Canonical width of the page field.
pub const PAGE_WIDTH: usize = 3;

/// A parsed or freshly computed address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address {
    region: String,
    wall: String,
    shelf: String,
    volume: String,
    page: String,
}

impl Address {
    /// Assemble an address from a region and a coordinate rendered at the
    /// widths implied by `bounds`.
    pub fn new(region: String, coordinate: &Coordinate, bounds: &CoordinateBounds) -> Self {
        let [wall, shelf, volume, page] = coordinate.render(bounds);
        Self {
            region,
            wall,
            shelf,
            volume,
            page,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn wall(&self) -> &str {
        &self.wall
    }

    pub fn shelf(&self) -> &str {
        &self.shelf
    }

    pub fn volume(&self) -> &str {
        &self.volume
    }

    pub fn page(&self) -> &str {
        &self.page
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}{sep}{}{sep}{}",
            self.region,
            self.wall,
            self.shelf,
            self.volume,
            self.page,
            sep = FIELD_SEPARATOR
        )
    }
}

impl FromStr for Address {
    type Err = Error;

    /// Split `REGION:WALL:SHELF:VOLUME:PAGE`.
    ///
    /// # Errors
    /// Returns `AddressError::Malformed` unless there are exactly five fields
    /// and none is empty. Surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.trim().split(FIELD_SEPARATOR).collect();
        let [region, wall, shelf, volume, page] = fields.as_slice() else {
            return Err(AddressError::Malformed {
                reason: format!("expected 5 colon-separated fields, got {}", fields.len()),
            }
            .into());
        };

        let names = ["region", "wall", "shelf", "volume", "page"];
        for (name, value) in names.iter().zip([region, wall, shelf, volume, page]) {
            if value.is_empty() {
                return Err(AddressError::Malformed {
                    reason: format!("{name} field is empty"),
                }
                .into());
            }
        }

        Ok(Self {
            region: region.to_string(),
            wall: wall.to_string(),
            shelf: shelf.to_string(),
            volume: format!("{volume:0>VOLUME_WIDTH$}"),
            page: format!("{page:0>PAGE_WIDTH$}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let address: Address = "simpleaddress:3322:4:4:300".parse().unwrap();
        assert_eq!(address.region(), "simpleaddress");
        assert_eq!(address.wall(), "3322");
        assert_eq!(address.shelf(), "4");
        assert_eq!(address.volume(), "04");
        assert_eq!(address.page(), "300");
    }

    #[test]
    fn test_page_repadded() {
        let address: Address = "r:1:1:1:7".parse().unwrap();
        assert_eq!(address.volume(), "01");
        assert_eq!(address.page(), "007");
        assert_eq!(address.to_string(), "r:1:1:01:007");
    }

    #[test]
    fn test_wrong_field_count() {
        for text in ["", "abc", "a:1:2:3", "a:1:2:3:4:5", "a::1:2:3:4"] {
            let result = text.parse::<Address>();
            assert!(
                matches!(result, Err(Error::Address(AddressError::Malformed { .. }))),
                "{text:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_empty_field() {
        let result = ":1:1:1:1".parse::<Address>();
        assert!(matches!(
            result,
            Err(Error::Address(AddressError::Malformed { .. }))
        ));
    }

    #[test]
    fn test_new_renders_coordinate() {
        let bounds = CoordinateBounds::default();
        let coordinate = Coordinate {
            wall: 1,
            shelf: 2,
            volume: 3,
            page: 45,
        };
        let address = Address::new("xyz".to_string(), &coordinate, &bounds);
        assert_eq!(address.to_string(), "xyz:1:2:03:045");
        assert_eq!(address.to_string().parse::<Address>().unwrap(), address);
    }
}
