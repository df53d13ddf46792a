//! Destination records, their data source and the selection model

mod app_model;
mod model;
mod service;

pub use app_model::{AppModel, DestinationSelector, LoadingState};
pub use model::{Destination, PriceRange};
pub use service::{CatalogService, DestinationService};
