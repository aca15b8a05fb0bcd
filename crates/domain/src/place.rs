//! Place — the single persisted resource.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FieldError, PlacesError, ValidationError};
use crate::id::PlaceId;
use crate::time::Timestamp;
use crate::validation::{validate_new_place, validate_place_patch};

/// Postal address and coordinates of a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zipcode: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Keys this service does not model, kept as found.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A rentable place, as stored in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(rename = "_id")]
    pub id: PlaceId,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub address: Address,
    /// Public URLs returned by the media host.
    #[serde(default)]
    pub images: Vec<String>,
    /// Booking references. Never populated by this service.
    #[serde(default)]
    pub bookings: Vec<String>,
    /// Review references. Never populated by this service.
    #[serde(default)]
    pub reviews: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Keys this service does not model, kept as found.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Document keys that map to typed [`Place`] fields or are owned by the
/// server. Never taken from a client's extra keys.
const RESERVED_KEYS: &[&str] = &[
    "_id",
    "title",
    "description",
    "price",
    "address",
    "images",
    "bookings",
    "reviews",
    "createdAt",
    "updatedAt",
];

fn without_reserved(mut extra: Map<String, Value>) -> Map<String, Value> {
    extra.retain(|key, _| !RESERVED_KEYS.contains(&key.as_str()));
    extra
}

/// Client-supplied fields of a place that does not exist yet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewPlace {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub price: Option<f64>,
    pub address: Address,
    /// Additional client keys, stored alongside the typed fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fields replaced by an update. Server-owned keys are not represented and
/// are therefore ignored if a client sends them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlacePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    /// Additional client keys, merged over the stored ones.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn typed<T: DeserializeOwned>(body: Value) -> Result<T, PlacesError> {
    serde_json::from_value(body)
        .map_err(|err| ValidationError::malformed(err.to_string()).into())
}

impl NewPlace {
    /// Validate a raw JSON payload and convert it.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Validation`] listing every violated rule.
    pub fn from_json(body: Value) -> Result<Self, PlacesError> {
        validate_new_place(&body)?;
        let mut draft: Self = typed(body)?;
        draft.extra = without_reserved(draft.extra);
        Ok(draft)
    }

    /// Turn the payload into a stored record.
    #[must_use]
    pub fn into_place(self, id: PlaceId, images: Vec<String>, now: Timestamp) -> Place {
        Place {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
            address: self.address,
            images,
            bookings: Vec::new(),
            reviews: Vec::new(),
            created_at: now,
            updated_at: now,
            extra: self.extra,
        }
    }
}

impl PlacePatch {
    /// Validate a raw JSON patch and convert it.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Validation`] listing every violated rule.
    pub fn from_json(body: Value) -> Result<Self, PlacesError> {
        validate_place_patch(&body)?;
        let mut patch: Self = typed(body)?;
        patch.extra = without_reserved(patch.extra);
        Ok(patch)
    }

    /// Whether the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Place {
    /// Create a builder for constructing a [`Place`].
    #[must_use]
    pub fn builder() -> PlaceBuilder {
        PlaceBuilder::default()
    }

    /// Check domain invariants against the same rules as a create payload.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Validation`] when a field breaks a rule.
    pub fn validate(&self) -> Result<(), PlacesError> {
        let body = serde_json::to_value(self)
            .map_err(|err| ValidationError::malformed(err.to_string()))?;
        validate_new_place(&body)?;
        Ok(())
    }

    /// Shallow merge: every supplied field replaces the old one.
    pub fn apply(&mut self, patch: PlacePatch, now: Timestamp) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = Some(price);
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        self.extra.extend(patch.extra);
        self.updated_at = now;
    }

    /// Exact, case-sensitive title comparison.
    #[must_use]
    pub fn has_title(&self, title: &str) -> bool {
        self.title == title
    }

    /// Whether `token` equals the id, title, city, zipcode, or country.
    #[must_use]
    pub fn matches_token(&self, token: &str) -> bool {
        self.id == *token
            || self.title == token
            || self.address.city == token
            || self.address.zipcode == token
            || self.address.country == token
    }
}

/// Step-by-step builder for [`Place`].
#[derive(Debug, Default)]
pub struct PlaceBuilder {
    id: Option<PlaceId>,
    title: Option<String>,
    description: Option<String>,
    price: Option<f64>,
    address: Option<Address>,
    images: Vec<String>,
    extra: Map<String, Value>,
    created_at: Option<Timestamp>,
}

impl PlaceBuilder {
    #[must_use]
    pub fn id(mut self, id: PlaceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    #[must_use]
    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    #[must_use]
    pub fn extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn created_at(mut self, at: Timestamp) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Consume the builder, validate, and return a [`Place`].
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Validation`] if a required field is missing or
    /// breaks a rule.
    pub fn build(self) -> Result<Place, PlacesError> {
        let Some(address) = self.address else {
            let missing = FieldError::new("address", "Address is required");
            return Err(ValidationError::Fields(vec![missing]).into());
        };
        let now = self.created_at.unwrap_or_else(crate::time::now);
        let place = NewPlace {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            price: self.price,
            address,
            extra: without_reserved(self.extra),
        }
        .into_place(self.id.unwrap_or_default(), self.images, now);
        place.validate()?;
        Ok(place)
    }
}
