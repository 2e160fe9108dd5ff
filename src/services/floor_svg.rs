//! Floor SVG orchestration.
//!
//! Runs the per-request pipeline: store lookup, sales fetch, classification,
//! image probing, assembly, caching. Steps execute strictly in sequence and
//! any failure aborts the request without caching anything.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info};

use crate::constants::DEFAULT_IMAGE_MIME;
use crate::error::{PipelineError, Result};
use crate::services::cache::SvgCache;
use crate::services::classifier::classify_code;
use crate::services::image_probe::probe_dimensions;
use crate::services::sales::SalesSource;
use crate::services::store::FloorStore;
use crate::services::svg::{assemble, PolygonOverlay};

/// Composes and memoizes tinted floor documents.
#[derive(Clone)]
pub struct FloorSvgService {
    store: Arc<dyn FloorStore>,
    sales: Arc<dyn SalesSource>,
    cache: Arc<SvgCache>,
}

impl FloorSvgService {
    /// Creates a service over the given collaborators.
    pub fn new(
        store: Arc<dyn FloorStore>,
        sales: Arc<dyn SalesSource>,
        cache: Arc<SvgCache>,
    ) -> Self {
        Self {
            store,
            sales,
            cache,
        }
    }

    /// Returns the floor store backing this service.
    pub fn store(&self) -> &Arc<dyn FloorStore> {
        &self.store
    }

    /// Returns the response cache.
    pub fn cache(&self) -> &Arc<SvgCache> {
        &self.cache
    }

    /// Returns the tinted document for floor `number`, composing it on a
    /// cache miss.
    pub async fn floor_svg(&self, number: i32) -> Result<Bytes> {
        if let Some(svg) = self.cache.get(number) {
            debug!(floor = number, "Serving floor SVG from cache");
            return Ok(svg);
        }

        let svg = Bytes::from(self.compose(number).await?);
        self.cache.put(number, svg.clone());
        info!(floor = number, bytes = svg.len(), "Cached floor SVG");

        Ok(svg)
    }

    /// Composes the document for floor `number` without consulting the cache.
    pub async fn compose(&self, number: i32) -> Result<Vec<u8>> {
        let floors = self.store.floor_images(number).await?;
        let Some(floor) = floors.first() else {
            return Err(PipelineError::FloorNotFound { number });
        };

        let floor_ids: Vec<i32> = floors.iter().map(|f| f.id).collect();
        let locations = self.store.locations_for(&floor_ids).await?;
        if locations.is_empty() {
            return Err(PipelineError::NoLocations { number });
        }
        debug!(floor = number, locations = locations.len(), "Loaded floor");

        let buckets = self.sales.sales_buckets().await?;

        let polygons = locations
            .into_iter()
            .map(|location| -> Result<PolygonOverlay> {
                let tier = classify_code(&location.code, &buckets)?;
                Ok(PolygonOverlay {
                    title: location.code,
                    points: location.polygon_points,
                    tier,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let dims = probe_dimensions(&floor.base64)?;
        debug!(
            floor = number,
            width = dims.width,
            height = dims.height,
            "Probed floor image"
        );

        let mime_type = if floor.mime_type.trim().is_empty() {
            DEFAULT_IMAGE_MIME
        } else {
            floor.mime_type.trim()
        };

        Ok(assemble(dims, mime_type, &floor.base64, &polygons))
    }
}
