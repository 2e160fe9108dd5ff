//! Floor Sales SVG Library
//!
//! This library composes floor plans tinted by quarterly sales: it reads
//! floors and locations from the floor store, classifies every location by
//! the quarter bucket it sold in, and overlays colored polygons on the floor
//! image as a single SVG document.

// Module declarations
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod services;
#[cfg(feature = "web")]
pub mod web;
