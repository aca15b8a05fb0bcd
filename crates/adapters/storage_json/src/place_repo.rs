//! JSON file implementation of [`PlaceRepository`].

use std::future::Future;

use places_app::ports::PlaceRepository;
use places_domain::error::PlacesError;
use places_domain::place::Place;

use crate::file::JsonFile;

/// Place repository backed by one JSON document.
///
/// Holds no cached state: every `load` goes back to disk.
pub struct JsonFilePlaceRepository {
    file: JsonFile,
}

impl JsonFilePlaceRepository {
    /// Create a new repository over the given document.
    #[must_use]
    pub fn new(file: JsonFile) -> Self {
        Self { file }
    }
}

impl PlaceRepository for JsonFilePlaceRepository {
    fn load(&self) -> impl Future<Output = Result<Vec<Place>, PlacesError>> + Send {
        let file = self.file.clone();
        async move { Ok(file.read().await?) }
    }

    fn save(&self, places: &[Place]) -> impl Future<Output = Result<(), PlacesError>> + Send {
        let file = self.file.clone();
        async move {
            file.write(places).await?;
            tracing::debug!(path = %file.path().display(), count = places.len(), "places saved");
            Ok(())
        }
    }
}
