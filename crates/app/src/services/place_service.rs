//! Place service — list, search, create, update and delete places.
//!
//! Every operation reads the full sequence from the repository. Mutations
//! change it in memory and write the full sequence back.

use serde_json::Value;
use tokio::sync::Mutex;

use places_domain::error::{NotFoundError, PlacesError};
use places_domain::id::PlaceId;
use places_domain::place::{NewPlace, Place, PlacePatch};
use places_domain::time::now;

use crate::ports::{ImageUpload, MediaHost, PlaceRepository};

/// Application service for the places resource.
pub struct PlaceService<R, M> {
    repo: R,
    media: M,
    /// Held across every load→save cycle so writers in this process never
    /// overwrite each other.
    write_lock: Mutex<()>,
}

fn not_found(id: &PlaceId) -> PlacesError {
    NotFoundError {
        entity: "Place",
        id: id.to_string(),
    }
    .into()
}

impl<R: PlaceRepository, M: MediaHost> PlaceService<R, M> {
    /// Create a new service backed by the given repository and media host.
    pub fn new(repo: R, media: M) -> Self {
        Self {
            repo,
            media,
            write_lock: Mutex::new(()),
        }
    }

    /// List every place, or only those whose title equals `title` exactly.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_places(&self, title: Option<&str>) -> Result<Vec<Place>, PlacesError> {
        let places = self.repo.load().await?;
        let places: Vec<Place> = match title {
            Some(title) => places.into_iter().filter(|p| p.has_title(title)).collect(),
            None => places,
        };
        tracing::debug!(count = places.len(), "listed places");
        Ok(places)
    }

    /// Every place whose id, title, city, zipcode or country equals `token`.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn search_places(&self, token: &str) -> Result<Vec<Place>, PlacesError> {
        let places: Vec<Place> = self
            .repo
            .load()
            .await?
            .into_iter()
            .filter(|p| p.matches_token(token))
            .collect();
        tracing::debug!(count = places.len(), "searched places");
        Ok(places)
    }

    /// Validate `payload`, upload `images`, and append the new place.
    ///
    /// Images are uploaded in order and only after validation passed.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Validation`] for a bad payload, a media error
    /// if an upload fails, or a storage error from the repository.
    #[tracing::instrument(skip_all, fields(images = images.len()))]
    pub async fn create_place(
        &self,
        payload: Value,
        images: Vec<ImageUpload>,
    ) -> Result<Place, PlacesError> {
        let draft = NewPlace::from_json(payload)?;

        let mut urls = Vec::with_capacity(images.len());
        for image in images {
            urls.push(self.media.upload(image).await?);
        }

        let _guard = self.write_lock.lock().await;
        let mut places = self.repo.load().await?;

        let mut id = PlaceId::new();
        while places.iter().any(|p| p.id == id) {
            id = PlaceId::new();
        }

        let place = draft.into_place(id, urls, now());
        places.push(place.clone());
        self.repo.save(&places).await?;

        tracing::info!(id = %place.id, "place created");
        Ok(place)
    }

    /// Shallow-merge `patch` over the place with `id`, returning the whole
    /// updated sequence.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Validation`] for a bad patch,
    /// [`PlacesError::NotFound`] when no place has `id`, or a storage error.
    #[tracing::instrument(skip(self, id, patch), fields(id = %id))]
    pub async fn update_place(
        &self,
        id: &PlaceId,
        patch: Value,
    ) -> Result<Vec<Place>, PlacesError> {
        let patch = PlacePatch::from_json(patch)?;

        let _guard = self.write_lock.lock().await;
        let mut places = self.repo.load().await?;
        let place = places
            .iter_mut()
            .find(|p| p.id == *id)
            .ok_or_else(|| not_found(id))?;
        place.apply(patch, now());
        self.repo.save(&places).await?;

        tracing::info!("place updated");
        Ok(places)
    }

    /// Remove the place with `id`, returning the remaining sequence.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::NotFound`] when no place has `id` (nothing is
    /// written), or a storage error.
    #[tracing::instrument(skip(self, id), fields(id = %id))]
    pub async fn delete_place(&self, id: &PlaceId) -> Result<Vec<Place>, PlacesError> {
        let _guard = self.write_lock.lock().await;
        let mut places = self.repo.load().await?;
        let index = places
            .iter()
            .position(|p| p.id == *id)
            .ok_or_else(|| not_found(id))?;
        places.remove(index);
        self.repo.save(&places).await?;

        tracing::info!(remaining = places.len(), "place deleted");
        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use places_domain::error::ValidationError;
    use places_domain::place::Address;
    use serde_json::json;
    use std::future::Future;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct InMemoryPlaceRepo {
        store: StdMutex<Vec<Place>>,
        saves: AtomicUsize,
    }

    impl InMemoryPlaceRepo {
        fn with(places: Vec<Place>) -> Self {
            Self {
                store: StdMutex::new(places),
                saves: AtomicUsize::new(0),
            }
        }
    }

    impl PlaceRepository for InMemoryPlaceRepo {
        fn load(&self) -> impl Future<Output = Result<Vec<Place>, PlacesError>> + Send {
            let result = self.store.lock().unwrap().clone();
            async { Ok(result) }
        }

        fn save(&self, places: &[Place]) -> impl Future<Output = Result<(), PlacesError>> + Send {
            *self.store.lock().unwrap() = places.to_vec();
            self.saves.fetch_add(1, Ordering::SeqCst);
            async { Ok(()) }
        }
    }

    #[derive(Default)]
    struct RecordingMediaHost {
        uploads: StdMutex<Vec<String>>,
    }

    impl MediaHost for RecordingMediaHost {
        fn upload(
            &self,
            image: ImageUpload,
        ) -> impl Future<Output = Result<String, PlacesError>> + Send {
            self.uploads.lock().unwrap().push(image.file_name.clone());
            async move { Ok(format!("https://media.test/{}", image.file_name)) }
        }
    }

    struct FailingMediaHost;

    impl MediaHost for FailingMediaHost {
        fn upload(
            &self,
            _image: ImageUpload,
        ) -> impl Future<Output = Result<String, PlacesError>> + Send {
            async {
                Err(PlacesError::Media(Box::new(std::io::Error::other(
                    "upload rejected",
                ))))
            }
        }
    }

    type Service = PlaceService<InMemoryPlaceRepo, RecordingMediaHost>;

    fn address(city: &str, zipcode: &str, country: &str) -> Address {
        Address {
            street: "1 Main Street".to_string(),
            city: city.to_string(),
            zipcode: zipcode.to_string(),
            country: country.to_string(),
            latitude: 10.5,
            longitude: 20.25,
            extra: serde_json::Map::new(),
        }
    }

    fn place(title: &str, city: &str) -> Place {
        Place::builder()
            .title(title)
            .description("A nice place")
            .price(100.0)
            .address(address(city, "00100", "Finland"))
            .build()
            .unwrap()
    }

    fn payload(title: &str) -> Value {
        json!({
            "title": title,
            "description": "Sea view",
            "price": 150,
            "address": {
                "street": "Harbour 2",
                "city": "Helsinki",
                "zipcode": "00100",
                "country": "Finland",
                "latitude": 60.5,
                "longitude": 24.75
            }
        })
    }

    fn image(name: &str) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            content_type: Some("image/png".to_string()),
            bytes: vec![1, 2, 3],
        }
    }

    fn make_service(places: Vec<Place>) -> Service {
        PlaceService::new(
            InMemoryPlaceRepo::with(places),
            RecordingMediaHost::default(),
        )
    }

    #[tokio::test]
    async fn should_list_all_places_without_filter() {
        let svc = make_service(vec![place("Loft", "Turku"), place("Cabin", "Oulu")]);
        let all = svc.list_places(None).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn should_filter_list_by_exact_title() {
        let svc = make_service(vec![
            place("Loft", "Turku"),
            place("Cabin", "Oulu"),
            place("loft", "Oulu"),
        ]);
        let lofts = svc.list_places(Some("Loft")).await.unwrap();
        assert_eq!(lofts.len(), 1);
        assert_eq!(lofts[0].title, "Loft");
    }

    #[tokio::test]
    async fn should_search_by_city_case_sensitively() {
        let svc = make_service(vec![
            place("Loft", "Turku"),
            place("Cabin", "Oulu"),
            place("Villa", "Turku"),
            place("Barn", "turku"),
        ]);
        let found = svc.search_places("Turku").await.unwrap();
        let titles: Vec<&str> = found.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Loft", "Villa"]);
    }

    #[tokio::test]
    async fn should_return_empty_search_result_when_nothing_matches() {
        let svc = make_service(vec![place("Loft", "Turku")]);
        assert!(svc.search_places("Tur").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_create_place_with_uploaded_images() {
        let svc = make_service(vec![]);
        let created = svc
            .create_place(payload("Harbour flat"), vec![image("a.png"), image("b.png")])
            .await
            .unwrap();

        assert_eq!(
            created.images,
            vec!["https://media.test/a.png", "https://media.test/b.png"]
        );
        assert!(created.bookings.is_empty());
        assert!(created.reviews.is_empty());

        let found = svc.search_places(created.id.as_str()).await.unwrap();
        assert_eq!(found, vec![created]);
    }

    #[tokio::test]
    async fn should_reject_create_without_title_and_leave_store_unchanged() {
        let svc = make_service(vec![place("Loft", "Turku")]);
        let mut body = payload("ignored");
        body.as_object_mut().unwrap().remove("title");

        let result = svc.create_place(body, vec![image("a.png")]).await;

        assert!(matches!(
            result,
            Err(PlacesError::Validation(ValidationError::Fields(_)))
        ));
        assert_eq!(svc.repo.saves.load(Ordering::SeqCst), 0);
        assert!(svc.media.uploads.lock().unwrap().is_empty());
        assert_eq!(svc.list_places(None).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_not_persist_when_upload_fails() {
        let repo = InMemoryPlaceRepo::default();
        let svc = PlaceService::new(repo, FailingMediaHost);

        let result = svc
            .create_place(payload("Harbour flat"), vec![image("a.png")])
            .await;

        assert!(matches!(result, Err(PlacesError::Media(_))));
        assert_eq!(svc.repo.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_merge_only_supplied_fields_on_update() {
        let original = place("Loft", "Turku");
        let other = place("Cabin", "Oulu");
        let svc = make_service(vec![original.clone(), other.clone()]);

        let updated = svc
            .update_place(&original.id, json!({ "price": 75 }))
            .await
            .unwrap();

        assert_eq!(updated.len(), 2);
        let changed = &updated[0];
        assert_eq!(changed.price, Some(75.0));
        assert_eq!(changed.title, original.title);
        assert_eq!(changed.description, original.description);
        assert_eq!(changed.address, original.address);
        assert_eq!(changed.created_at, original.created_at);
        assert_eq!(updated[1], other);
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_place() {
        let svc = make_service(vec![place("Loft", "Turku")]);
        let result = svc
            .update_place(&PlaceId::new(), json!({ "title": "New" }))
            .await;
        assert!(matches!(result, Err(PlacesError::NotFound(_))));
        assert_eq!(svc.repo.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn should_reject_invalid_patch_before_lookup() {
        let svc = make_service(vec![]);
        let result = svc
            .update_place(&PlaceId::new(), json!({ "description": "" }))
            .await;
        assert!(matches!(result, Err(PlacesError::Validation(_))));
    }

    #[tokio::test]
    async fn should_delete_exactly_one_place() {
        let first = place("Loft", "Turku");
        let second = place("Cabin", "Oulu");
        let third = place("Villa", "Espoo");
        let svc = make_service(vec![first.clone(), second.clone(), third.clone()]);

        let remaining = svc.delete_place(&second.id).await.unwrap();

        assert_eq!(remaining, vec![first, third]);
        assert_eq!(svc.list_places(None).await.unwrap(), remaining);
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_missing_place() {
        let existing = place("Loft", "Turku");
        let svc = make_service(vec![existing.clone()]);

        let result = svc.delete_place(&PlaceId::new()).await;

        assert!(matches!(result, Err(PlacesError::NotFound(_))));
        assert_eq!(svc.repo.saves.load(Ordering::SeqCst), 0);
        assert_eq!(svc.list_places(None).await.unwrap(), vec![existing]);
    }
}
