//! Data models for floors, locations, and sales buckets.
//!
//! Models are independent of the store, the remote client, and the web layer.

pub mod floor;
pub mod sales;

// Re-export all model types
pub use floor::{Floor, FloorImage, FloorListing, Location, LocationListing};
pub use sales::{ColorTier, SalesBucketSet};
