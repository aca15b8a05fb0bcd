//! Axum router assembly.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use places_app::ports::{MediaHost, PlaceRepository};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Mounts the places API under `/places`. Request bodies, multipart uploads
/// included, are capped at `max_body_bytes`. Includes a [`TraceLayer`] that
/// logs each HTTP request/response at the `DEBUG` level using the `tracing`
/// ecosystem.
pub fn build<R, M>(state: AppState<R, M>, max_body_bytes: usize) -> Router
where
    R: PlaceRepository + Send + Sync + 'static,
    M: MediaHost + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/places", crate::api::routes())
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::places::{IMAGES_FIELD, PLACE_FIELD};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use places_app::ports::ImageUpload;
    use places_app::services::place_service::PlaceService;
    use places_domain::error::PlacesError;
    use places_domain::place::{Address, Place};
    use serde_json::{Value, json};
    use std::future::Future;
    use std::sync::Mutex;
    use tower::ServiceExt;

    const BOUNDARY: &str = "X-PLACES-BOUNDARY";

    #[derive(Default)]
    struct StubRepo {
        store: Mutex<Vec<Place>>,
    }

    struct StubMediaHost;

    impl PlaceRepository for StubRepo {
        fn load(&self) -> impl Future<Output = Result<Vec<Place>, PlacesError>> + Send {
            let places = self.store.lock().unwrap().clone();
            async { Ok(places) }
        }

        fn save(&self, places: &[Place]) -> impl Future<Output = Result<(), PlacesError>> + Send {
            *self.store.lock().unwrap() = places.to_vec();
            async { Ok(()) }
        }
    }

    impl MediaHost for StubMediaHost {
        fn upload(
            &self,
            image: ImageUpload,
        ) -> impl Future<Output = Result<String, PlacesError>> + Send {
            async move { Ok(format!("https://media.test/{}", image.file_name)) }
        }
    }

    fn seeded() -> Place {
        Place::builder()
            .title("Loft")
            .description("Bright loft")
            .address(Address {
                street: "Main 1".to_string(),
                city: "Vienna".to_string(),
                zipcode: "1010".to_string(),
                country: "Austria".to_string(),
                latitude: 48.25,
                longitude: 16.375,
                extra: serde_json::Map::new(),
            })
            .build()
            .unwrap()
    }

    fn app_with(places: Vec<Place>, max_body_bytes: usize) -> Router {
        let repo = StubRepo {
            store: Mutex::new(places),
        };
        build(
            AppState::new(PlaceService::new(repo, StubMediaHost)),
            max_body_bytes,
        )
    }

    fn app(places: Vec<Place>) -> Router {
        app_with(places, 1024 * 1024)
    }

    fn multipart(place: &str, images: &[(&str, &[u8])]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{PLACE_FIELD}\"\r\n\r\n{place}\r\n"
            )
            .as_bytes(),
        );
        for (name, bytes) in images {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{IMAGES_FIELD}\"; filename=\"{name}\"\r\nContent-Type: image/png\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/places")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::CONTENT_LENGTH, body.len())
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let response = app(vec![])
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_list_places_as_json_array() {
        let response = app(vec![seeded()])
            .oneshot(
                Request::builder()
                    .uri("/places")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["title"], "Loft");
    }

    #[tokio::test]
    async fn should_treat_empty_title_filter_as_absent() {
        let response = app(vec![seeded()])
            .oneshot(
                Request::builder()
                    .uri("/places?title=")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_create_place_from_multipart_form() {
        let place = json!({
            "title": "Studio",
            "description": "Small studio",
            "address": {
                "street": "Ring 3", "city": "Graz", "zipcode": "8010",
                "country": "Austria", "latitude": 47.0, "longitude": 15.5
            }
        });
        let response = app(vec![])
            .oneshot(multipart(&place.to_string(), &[("a.png", b"\x89PNG".as_slice())]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert!(body["_id"].as_str().is_some_and(|id| !id.is_empty()));
    }

    #[tokio::test]
    async fn should_report_field_errors_on_invalid_create() {
        let response = app(vec![])
            .oneshot(multipart(r#"{"description": "no title"}"#, &[]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        let fields: Vec<&str> = body["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["title", "address"]);
    }

    #[tokio::test]
    async fn should_reject_place_field_that_is_not_json() {
        let response = app(vec![])
            .oneshot(multipart("title=Loft", &[]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_answer_json_error_when_create_is_not_multipart() {
        let response = app(vec![])
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/places")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"title": "Loft"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
        assert!(json_body(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn should_reject_body_over_limit() {
        let big = vec![0_u8; 4096];
        let response = app_with(vec![], 1024)
            .oneshot(multipart("{}", &[("big.png", big.as_slice())]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_unknown_id() {
        let response = app(vec![seeded()])
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/places/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_reject_update_with_unreadable_json() {
        let existing = seeded();
        let response = app(vec![existing.clone()])
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/places/{}", existing.id))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["error"].is_string());
    }
}
