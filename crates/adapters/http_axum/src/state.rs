//! Shared application state for axum handlers.

use std::sync::Arc;

use places_app::ports::{MediaHost, PlaceRepository};
use places_app::services::place_service::PlaceService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository and media host to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone` — only the `Arc` wrapper is cloned.
pub struct AppState<R, M> {
    /// Places use-cases.
    pub place_service: Arc<PlaceService<R, M>>,
}

impl<R, M> Clone for AppState<R, M> {
    fn clone(&self) -> Self {
        Self {
            place_service: Arc::clone(&self.place_service),
        }
    }
}

impl<R, M> AppState<R, M>
where
    R: PlaceRepository + Send + Sync + 'static,
    M: MediaHost + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(place_service: PlaceService<R, M>) -> Self {
        Self {
            place_service: Arc::new(place_service),
        }
    }
}
