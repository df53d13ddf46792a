//! Destination data source

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use uuid::Uuid;

use super::Destination;
use crate::error::Result;

/// Source of destination records
#[async_trait]
pub trait DestinationService: Send + Sync {
    async fn fetch_destinations(&self) -> Result<Vec<Destination>>;

    async fn fetch_detail(&self, id: Uuid) -> Result<Option<Destination>>;
}

/// In-memory catalogue with optional simulated latency.
///
/// Records with out-of-range coordinates are dropped on fetch so they never
/// reach the projection.
#[derive(Debug, Clone)]
pub struct CatalogService {
    destinations: Vec<Destination>,
    latency: Duration,
}

impl CatalogService {
    pub fn new(destinations: Vec<Destination>) -> Self {
        Self {
            destinations,
            latency: Duration::ZERO,
        }
    }

    /// The built-in sample catalogue
    pub fn samples() -> Self {
        Self::new(Destination::samples().to_vec())
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self, latency: Duration) {
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::samples()
    }
}

#[async_trait]
impl DestinationService for CatalogService {
    async fn fetch_destinations(&self) -> Result<Vec<Destination>> {
        self.simulate_latency(self.latency).await;

        let valid: Vec<Destination> = self
            .destinations
            .iter()
            .filter(|d| has_valid_coordinate(d))
            .cloned()
            .collect();

        debug!(count = valid.len(), "Fetched destinations");
        Ok(valid)
    }

    async fn fetch_detail(&self, id: Uuid) -> Result<Option<Destination>> {
        self.simulate_latency(self.latency / 2).await;
        Ok(self
            .destinations
            .iter()
            .find(|d| d.id == id)
            .filter(|d| has_valid_coordinate(d))
            .cloned())
    }
}

fn has_valid_coordinate(destination: &Destination) -> bool {
    match destination.coordinate.validate() {
        Ok(_) => true,
        Err(err) => {
            warn!(
                destination = %destination.name,
                error = %err,
                "Skipping destination with invalid coordinate"
            );
            false
        }
    }
}
