//! Floor and location rows as read from the floor store.

use serde::{Deserialize, Serialize};

/// The projection of a floor the SVG pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct FloorImage {
    /// Floor identifier.
    pub id: i32,
    /// MIME type declared for the stored image.
    pub mime_type: String,
    /// Base64-encoded raster image.
    pub base64: String,
}

/// A demarcated area on a floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Location {
    /// Location identifier.
    pub id: i32,
    /// Tenant/stall code, an integer stored as text.
    pub code: String,
    /// Outline in SVG `points` syntax.
    pub polygon_points: String,
    /// Owning floor.
    pub floor_id: i32,
}

/// A location as exposed by the floor listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationListing {
    /// Location identifier.
    pub id: i32,
    /// Tenant/stall code.
    pub code: String,
    /// Outline in SVG `points` syntax.
    pub polygon_points: String,
}

impl From<Location> for LocationListing {
    fn from(location: Location) -> Self {
        Self {
            id: location.id,
            code: location.code,
            polygon_points: location.polygon_points,
        }
    }
}

/// A floor row with its nested locations.
///
/// `locations` is `None` for a floor that owns no locations, which keeps the
/// listing shape identical to an SQL `json_agg` over an empty set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorListing {
    /// Floor identifier.
    pub id: i32,
    /// Physical floor number.
    pub number: i32,
    /// Human-readable floor name.
    pub display_name: String,
    /// MIME type of the background image.
    pub mime_type: String,
    /// Base64-encoded background image.
    pub base64: String,
    /// Locations on this floor, in id order.
    pub locations: Option<Vec<LocationListing>>,
}

/// A bare floor row.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Floor {
    /// Floor identifier.
    pub id: i32,
    /// Physical floor number (not guaranteed unique).
    pub number: i32,
    /// Human-readable floor name.
    pub display_name: String,
    /// MIME type of the background image.
    pub mime_type: String,
    /// Base64-encoded background image.
    pub base64: String,
}

impl Floor {
    /// Nests `locations` under this floor, keeping only those it owns.
    ///
    /// Input order is preserved.
    pub fn into_listing(self, locations: &[Location]) -> FloorListing {
        let owned: Vec<LocationListing> = locations
            .iter()
            .filter(|location| location.floor_id == self.id)
            .cloned()
            .map(LocationListing::from)
            .collect();

        FloorListing {
            id: self.id,
            number: self.number,
            display_name: self.display_name,
            mime_type: self.mime_type,
            base64: self.base64,
            locations: if owned.is_empty() { None } else { Some(owned) },
        }
    }
}
