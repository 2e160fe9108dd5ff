//! Shared test fixtures for pipeline, client, and web API tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::collections::HashSet;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine as _;
use image::{ImageFormat, RgbImage};

use metabase_ws::error::{PipelineError, Result};
use metabase_ws::models::{Floor, FloorImage, FloorListing, Location, SalesBucketSet};
use metabase_ws::services::{FloorStore, FloorSvgService, SalesSource, SvgCache};

/// Encodes a blank PNG of the given size as base64.
pub fn png_base64(width: u32, height: u32) -> String {
    let mut out = Cursor::new(Vec::new());
    RgbImage::new(width, height)
        .write_to(&mut out, ImageFormat::Png)
        .expect("Failed to encode PNG");
    base64::engine::general_purpose::STANDARD.encode(out.into_inner())
}

/// Creates a floor row with a blank PNG background.
pub fn floor(id: i32, number: i32, width: u32, height: u32) -> Floor {
    Floor {
        id,
        number,
        display_name: format!("Floor {number}"),
        mime_type: "image/png".to_string(),
        base64: png_base64(width, height),
    }
}

/// Creates a location row.
pub fn location(id: i32, floor_id: i32, code: &str, points: &str) -> Location {
    Location {
        id,
        code: code.to_string(),
        polygon_points: points.to_string(),
        floor_id,
    }
}

/// Buckets where 1024 sold in Q2, plus a few codes elsewhere.
pub fn sample_buckets() -> SalesBucketSet {
    SalesBucketSet {
        q1: HashSet::from([101]),
        q2: HashSet::from([1024]),
        q3: HashSet::from([303]),
        q4: HashSet::from([404, 101]),
    }
}

/// In-memory floor store that counts queries.
#[derive(Default)]
pub struct MemoryFloorStore {
    pub floors: Vec<Floor>,
    pub locations: Vec<Location>,
    pub queries: AtomicUsize,
}

impl MemoryFloorStore {
    pub fn new(floors: Vec<Floor>, locations: Vec<Location>) -> Self {
        Self {
            floors,
            locations,
            queries: AtomicUsize::new(0),
        }
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FloorStore for MemoryFloorStore {
    async fn list_floors(&self) -> Result<Vec<FloorListing>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .floors
            .iter()
            .cloned()
            .map(|floor| floor.into_listing(&self.locations))
            .collect())
    }

    async fn floor_images(&self, number: i32) -> Result<Vec<FloorImage>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .floors
            .iter()
            .filter(|floor| floor.number == number)
            .map(|floor| FloorImage {
                id: floor.id,
                mime_type: floor.mime_type.clone(),
                base64: floor.base64.clone(),
            })
            .collect())
    }

    async fn locations_for(&self, floor_ids: &[i32]) -> Result<Vec<Location>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .locations
            .iter()
            .filter(|location| floor_ids.contains(&location.floor_id))
            .cloned()
            .collect())
    }
}

/// Sales source returning fixed buckets, or rejecting authentication when
/// constructed without any.
pub struct StubSales {
    buckets: Option<SalesBucketSet>,
    calls: AtomicUsize,
}

impl StubSales {
    pub fn with_buckets(buckets: SalesBucketSet) -> Self {
        Self {
            buckets: Some(buckets),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            buckets: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SalesSource for StubSales {
    async fn sales_buckets(&self) -> Result<SalesBucketSet> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.buckets
            .clone()
            .ok_or_else(|| PipelineError::Authentication {
                status: Some(reqwest::StatusCode::UNAUTHORIZED),
                message: "invalid credentials".to_string(),
            })
    }
}

/// Pipeline wired to the given doubles with a fresh cache.
pub fn service(store: Arc<MemoryFloorStore>, sales: Arc<StubSales>) -> FloorSvgService {
    FloorSvgService::new(store, sales, Arc::new(SvgCache::new()))
}

/// Store with floor 3 (one location, code 1024), floor 4 (three locations),
/// and floor 5 (no locations).
pub fn sample_store() -> MemoryFloorStore {
    MemoryFloorStore::new(
        vec![floor(1, 3, 400, 300), floor(2, 4, 64, 48), floor(3, 5, 10, 10)],
        vec![
            location(1, 1, "1024", "10,10 50,10 50,50 10,50"),
            location(2, 2, "404", "0,0 5,0 5,5"),
            location(3, 2, "101", "6,6 9,6 9,9"),
            location(4, 2, "999", "1,1 2,1 2,2"),
        ],
    )
}
