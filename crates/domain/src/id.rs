//! Place identifiers.
//!
//! New identifiers are random v4 UUIDs, but any non-empty string read back
//! from the store is accepted so documents written by other tools still load.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Unique identifier for a [`Place`](crate::place::Place).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PlaceId(String);

impl Default for PlaceId {
    fn default() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl PlaceId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returned when parsing an empty identifier.
#[derive(Debug, thiserror::Error)]
#[error("place identifier cannot be empty")]
pub struct EmptyIdError;

impl FromStr for PlaceId {
    type Err = EmptyIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(EmptyIdError);
        }
        Ok(Self(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for PlaceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

impl PartialEq<str> for PlaceId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_unique_ids_when_called_twice() {
        let a = PlaceId::new();
        let b = PlaceId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn should_generate_uuid_shaped_ids() {
        let id = PlaceId::new();
        assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = PlaceId::new();
        let parsed: PlaceId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn should_accept_legacy_non_uuid_ids() {
        let id: PlaceId = "kfz3p1ab".parse().unwrap();
        assert_eq!(id.as_str(), "kfz3p1ab");
    }

    #[test]
    fn should_serialize_as_plain_string() {
        let id: PlaceId = "abc".parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }

    #[test]
    fn should_return_error_when_parsing_empty_string() {
        assert!(PlaceId::from_str("").is_err());
    }

    #[test]
    fn should_reject_empty_id_when_deserializing() {
        let err = serde_json::from_str::<PlaceId>("\"\"").unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn should_deserialize_legacy_id() {
        let id: PlaceId = serde_json::from_str("\"kfz3p1ab\"").unwrap();
        assert_eq!(id.as_str(), "kfz3p1ab");
    }
}
