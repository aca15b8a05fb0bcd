//! Storage port — whole-document persistence for places.

use std::future::Future;
use std::sync::Arc;

use places_domain::error::PlacesError;
use places_domain::place::Place;

/// Reads and writes the complete, ordered sequence of [`Place`]s.
///
/// There is no per-record access: callers load everything, change it in
/// memory, and save everything back.
pub trait PlaceRepository {
    /// Read and parse the whole sequence.
    fn load(&self) -> impl Future<Output = Result<Vec<Place>, PlacesError>> + Send;

    /// Replace the stored sequence with `places`.
    fn save(&self, places: &[Place]) -> impl Future<Output = Result<(), PlacesError>> + Send;
}

impl<T: PlaceRepository + Send + Sync> PlaceRepository for Arc<T> {
    fn load(&self) -> impl Future<Output = Result<Vec<Place>, PlacesError>> + Send {
        (**self).load()
    }

    fn save(&self, places: &[Place]) -> impl Future<Output = Result<(), PlacesError>> + Send {
        (**self).save(places)
    }
}
