//! Service layer for the floor SVG pipeline.
//!
//! This module contains the pipeline stages and the orchestration that
//! coordinates them.

pub mod cache;
pub mod classifier;
pub mod floor_svg;
pub mod image_probe;
pub mod sales;
pub mod store;
pub mod svg;

// Re-export commonly used types and functions
pub use cache::SvgCache;
pub use classifier::classify;
pub use floor_svg::FloorSvgService;
pub use image_probe::{probe_dimensions, Dimensions};
pub use sales::{SalesClient, SalesSource};
pub use store::{FloorStore, PgFloorStore};
