//! Application-level destination state: loading and selection

use std::sync::Arc;
use tracing::{info, warn};

use super::{CatalogService, Destination, DestinationService};

/// Progress of the initial destination load
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadingState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Receiver of selection intents.
///
/// Implemented by whatever owns the destination list; the input arbiter
/// resolves intents against [`destinations`](Self::destinations).
pub trait DestinationSelector {
    fn destinations(&self) -> &[Destination];

    fn select_destination(&mut self, destination: Destination);
}

/// Destination list plus the current selection
pub struct AppModel {
    service: Arc<dyn DestinationService>,
    destinations: Vec<Destination>,
    selected: Option<Destination>,
    is_showing_detail: bool,
    loading: LoadingState,
}

impl AppModel {
    pub fn new(service: Arc<dyn DestinationService>) -> Self {
        Self {
            service,
            destinations: Vec::new(),
            selected: None,
            is_showing_detail: false,
            loading: LoadingState::Idle,
        }
    }

    /// Load destinations once. Does nothing unless the model is idle.
    pub async fn load_destinations(&mut self) {
        if self.loading != LoadingState::Idle {
            return;
        }
        self.loading = LoadingState::Loading;

        match self.service.fetch_destinations().await {
            Ok(destinations) => {
                info!(count = destinations.len(), "Destinations loaded");
                self.destinations = destinations;
                self.loading = LoadingState::Loaded;
            }
            Err(err) => {
                warn!(error = %err, "Failed to load destinations");
                self.loading = LoadingState::Failed(err.to_string());
            }
        }
    }

    pub fn loading_state(&self) -> &LoadingState {
        &self.loading
    }

    pub fn selected(&self) -> Option<&Destination> {
        self.selected.as_ref()
    }

    pub fn is_showing_detail(&self) -> bool {
        self.is_showing_detail
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.is_showing_detail = false;
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new(Arc::new(CatalogService::samples()))
    }
}

impl DestinationSelector for AppModel {
    fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    fn select_destination(&mut self, destination: Destination) {
        info!(destination = %destination.name, "Destination selected");
        self.selected = Some(destination);
        self.is_showing_detail = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{OuiError, Result};
    use async_trait::async_trait;
    use uuid::Uuid;

    struct FailingService;

    #[async_trait]
    impl DestinationService for FailingService {
        async fn fetch_destinations(&self) -> Result<Vec<Destination>> {
            Err(OuiError::Service("offline".to_string()))
        }

        async fn fetch_detail(&self, _id: Uuid) -> Result<Option<Destination>> {
            Ok(None)
        }
    }

    #[test]
    fn initial_state() {
        let model = AppModel::default();
        assert!(model.selected().is_none());
        assert!(!model.is_showing_detail());
        assert!(model.destinations().is_empty());
        assert_eq!(model.loading_state(), &LoadingState::Idle);
    }

    #[tokio::test]
    async fn load_destinations() {
        let mut model = AppModel::default();
        model.load_destinations().await;
        assert!(!model.destinations().is_empty());
        assert_eq!(model.loading_state(), &LoadingState::Loaded);
    }

    #[tokio::test]
    async fn load_only_runs_when_idle() {
        let mut model = AppModel::default();
        model.load_destinations().await;
        let count = model.destinations().len();
        model.load_destinations().await;
        assert_eq!(model.destinations().len(), count);
    }

    #[tokio::test]
    async fn load_failure_is_recorded() {
        let mut model = AppModel::new(Arc::new(FailingService));
        model.load_destinations().await;
        assert!(matches!(
            model.loading_state(),
            LoadingState::Failed(msg) if msg.contains("offline")
        ));
        assert!(model.destinations().is_empty());
    }

    #[tokio::test]
    async fn select_and_clear() {
        let mut model = AppModel::default();
        model.load_destinations().await;
        let dest = model.destinations()[0].clone();

        model.select_destination(dest.clone());
        assert_eq!(model.selected(), Some(&dest));
        assert!(model.is_showing_detail());

        model.clear_selection();
        assert!(model.selected().is_none());
        assert!(!model.is_showing_detail());
    }
}
