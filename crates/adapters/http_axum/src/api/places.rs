//! JSON REST handlers for places.

use std::str::FromStr;

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use places_app::ports::{ImageUpload, MediaHost, PlaceRepository};
use places_domain::error::ValidationError;
use places_domain::id::PlaceId;
use places_domain::place::Place;

use crate::error::ApiError;
use crate::state::AppState;

/// Multipart field carrying the JSON-encoded place.
pub const PLACE_FIELD: &str = "place";
/// Multipart field name shared by every uploaded image.
pub const IMAGES_FIELD: &str = "images";

/// Query string of the list endpoint.
#[derive(Deserialize)]
pub struct ListQuery {
    pub title: Option<String>,
}

/// Body returned after a successful create.
#[derive(Serialize)]
pub struct CreatedBody {
    #[serde(rename = "_id")]
    pub id: PlaceId,
}

/// Possible responses from the list, search, update and delete endpoints.
pub enum ListResponse {
    Ok(Json<Vec<Place>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<CreatedBody>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

fn parse_id(raw: &str) -> Result<PlaceId, ApiError> {
    PlaceId::from_str(raw).map_err(|err| ValidationError::malformed(err.to_string()).into())
}

/// Split a create form into the place payload and its images.
async fn read_create_form(
    mut multipart: Multipart,
) -> Result<(Value, Vec<ImageUpload>), ApiError> {
    let mut payload = None;
    let mut images = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            PLACE_FIELD => {
                let text = field.text().await?;
                let value: Value = serde_json::from_str(&text).map_err(|err| {
                    ValidationError::malformed(format!("`{PLACE_FIELD}` is not valid JSON: {err}"))
                })?;
                payload = Some(value);
            }
            IMAGES_FIELD => {
                let file_name = field.file_name().unwrap_or("image").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?.to_vec();
                images.push(ImageUpload {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            _ => tracing::debug!(field = %name, "ignoring unknown form field"),
        }
    }

    let payload = payload.ok_or_else(|| {
        ValidationError::malformed(format!("missing `{PLACE_FIELD}` form field"))
    })?;
    Ok((payload, images))
}

/// `GET /places` — all places, or those whose title matches `?title=` exactly.
pub async fn list<R, M>(
    State(state): State<AppState<R, M>>,
    Query(query): Query<ListQuery>,
) -> Result<ListResponse, ApiError>
where
    R: PlaceRepository + Send + Sync + 'static,
    M: MediaHost + Send + Sync + 'static,
{
    let title = query.title.as_deref().filter(|t| !t.is_empty());
    let places = state.place_service.list_places(title).await?;
    Ok(ListResponse::Ok(Json(places)))
}

/// `GET /places/:token` — exact match on id, title, city, zipcode or country.
pub async fn search<R, M>(
    State(state): State<AppState<R, M>>,
    Path(token): Path<String>,
) -> Result<ListResponse, ApiError>
where
    R: PlaceRepository + Send + Sync + 'static,
    M: MediaHost + Send + Sync + 'static,
{
    let places = state.place_service.search_places(&token).await?;
    Ok(ListResponse::Ok(Json(places)))
}

/// `POST /places` — multipart form with a `place` JSON field and `images` files.
pub async fn create<R, M>(
    State(state): State<AppState<R, M>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<CreateResponse, ApiError>
where
    R: PlaceRepository + Send + Sync + 'static,
    M: MediaHost + Send + Sync + 'static,
{
    let (payload, images) = read_create_form(multipart?).await?;
    let place = state.place_service.create_place(payload, images).await?;
    Ok(CreateResponse::Created(Json(CreatedBody { id: place.id })))
}

/// `PUT /places/:id` — shallow merge, returns the whole updated collection.
pub async fn update<R, M>(
    State(state): State<AppState<R, M>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<ListResponse, ApiError>
where
    R: PlaceRepository + Send + Sync + 'static,
    M: MediaHost + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let Json(patch) = payload?;
    let places = state.place_service.update_place(&id, patch).await?;
    Ok(ListResponse::Ok(Json(places)))
}

/// `DELETE /places/:id` — returns the remaining collection.
pub async fn delete<R, M>(
    State(state): State<AppState<R, M>>,
    Path(id): Path<String>,
) -> Result<ListResponse, ApiError>
where
    R: PlaceRepository + Send + Sync + 'static,
    M: MediaHost + Send + Sync + 'static,
{
    let id = parse_id(&id)?;
    let places = state.place_service.delete_place(&id).await?;
    Ok(ListResponse::Ok(Json(places)))
}
