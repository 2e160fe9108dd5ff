//! Floor store access.
//!
//! Floors and their locations live in two Postgres tables, `mws_floor` and
//! `mws_location`, joined on `mws_location.floor_id`. Schema management and
//! seeding happen outside this crate.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::models::{Floor, FloorImage, FloorListing, Location};

/// Read access to floors and locations.
#[async_trait]
pub trait FloorStore: Send + Sync {
    /// Lists every floor with its nested locations, in id order.
    async fn list_floors(&self) -> Result<Vec<FloorListing>>;

    /// Returns the image rows of every floor carrying `number`.
    async fn floor_images(&self, number: i32) -> Result<Vec<FloorImage>>;

    /// Returns the locations owned by any of `floor_ids`, in id order.
    async fn locations_for(&self, floor_ids: &[i32]) -> Result<Vec<Location>>;
}

/// Postgres-backed floor store.
#[derive(Debug, Clone)]
pub struct PgFloorStore {
    pool: PgPool,
}

impl PgFloorStore {
    /// Wraps an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds a pool from configuration.
    ///
    /// Connections are opened lazily, so an unreachable database surfaces on
    /// the first query rather than at startup.
    pub fn connect_lazy(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_lazy(&config.url)
            .context("Invalid database connection string")?;

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl FloorStore for PgFloorStore {
    async fn list_floors(&self) -> Result<Vec<FloorListing>> {
        let floors: Vec<Floor> = sqlx::query_as(
            "SELECT id, number, display_name, mime_type, base64 FROM mws_floor ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let locations: Vec<Location> = sqlx::query_as(
            "SELECT id, code, polygon_points, floor_id FROM mws_location ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(floors
            .into_iter()
            .map(|floor| floor.into_listing(&locations))
            .collect())
    }

    async fn floor_images(&self, number: i32) -> Result<Vec<FloorImage>> {
        let rows: Vec<FloorImage> = sqlx::query_as(
            "SELECT id, mime_type, base64 FROM mws_floor WHERE number = $1 ORDER BY id",
        )
        .bind(number)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn locations_for(&self, floor_ids: &[i32]) -> Result<Vec<Location>> {
        let rows: Vec<Location> = sqlx::query_as(
            "SELECT id, code, polygon_points, floor_id FROM mws_location \
             WHERE floor_id = ANY($1) ORDER BY id",
        )
        .bind(floor_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
