//! Request validator — declarative field rules checked against raw JSON.
//!
//! Rules run on the untyped [`Value`] before deserialization so every
//! violation is reported at once, with a message per field, instead of
//! stopping at the first serde error.
//!
//! The same [`PLACE_RULES`] table serves both paths:
//! - [`Mode::Create`] enforces every required rule.
//! - [`Mode::Patch`] only checks top-level fields that are supplied. A
//!   supplied `address` replaces the old one wholesale, so its sub-fields
//!   are still all required.

use serde_json::{Map, Value};

use crate::error::{FieldError, ValidationError};

/// Which request the rules are applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Full payload of a new record.
    Create,
    /// Partial update; absent top-level fields are skipped.
    Patch,
}

/// Expected JSON shape of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kind {
    /// Non-empty string.
    Text,
    /// Finite number inside `min..=max`.
    Number { min: f64, max: f64 },
    /// JSON object whose members have their own rules.
    Object,
    /// Array of strings.
    TextList,
}

/// One named field rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRule {
    /// Dotted path from the body root.
    pub path: &'static str,
    /// Human label used in messages.
    pub label: &'static str,
    pub kind: Kind,
    pub required: bool,
}

impl FieldRule {
    const fn text(path: &'static str, label: &'static str) -> Self {
        Self {
            path,
            label,
            kind: Kind::Text,
            required: true,
        }
    }

    const fn number(path: &'static str, label: &'static str, min: f64, max: f64) -> Self {
        Self {
            path,
            label,
            kind: Kind::Number { min, max },
            required: true,
        }
    }

    const fn object(path: &'static str, label: &'static str) -> Self {
        Self {
            path,
            label,
            kind: Kind::Object,
            required: true,
        }
    }

    const fn text_list(path: &'static str, label: &'static str) -> Self {
        Self {
            path,
            label,
            kind: Kind::TextList,
            required: true,
        }
    }

    const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    fn is_nested(&self) -> bool {
        self.path.contains('.')
    }

    fn check(&self, value: &Value, errors: &mut Vec<FieldError>) {
        let message = match self.kind {
            Kind::Text => match value.as_str() {
                None => Some(format!("{} must be a string", self.label)),
                Some(text) if text.trim().is_empty() => {
                    Some(format!("{} cannot be empty", self.label))
                }
                Some(_) => None,
            },
            Kind::Number { min, max } => match value.as_f64() {
                None => Some(format!("{} must be a number", self.label)),
                Some(n) if n < min || n > max => Some(if max.is_infinite() {
                    format!("{} must be at least {min}", self.label)
                } else {
                    format!("{} must be between {min} and {max}", self.label)
                }),
                Some(_) => None,
            },
            Kind::Object => {
                (!value.is_object()).then(|| format!("{} must be an object", self.label))
            }
            Kind::TextList => {
                let ok = value
                    .as_array()
                    .is_some_and(|items| items.iter().all(Value::is_string));
                (!ok).then(|| format!("{} must be a list of strings", self.label))
            }
        };

        if let Some(message) = message {
            errors.push(FieldError::new(self.path, message));
        }
    }
}

/// Rules for a Place payload.
pub const PLACE_RULES: &[FieldRule] = &[
    FieldRule::text("title", "Title"),
    FieldRule::text("description", "Description"),
    FieldRule::number("price", "Price", 0.0, f64::INFINITY).optional(),
    FieldRule::object("address", "Address"),
    FieldRule::text("address.street", "Street"),
    FieldRule::text("address.city", "City"),
    FieldRule::text("address.zipcode", "Zip code"),
    FieldRule::text("address.country", "Country"),
    FieldRule::number("address.latitude", "Latitude", -90.0, 90.0),
    FieldRule::number("address.longitude", "Longitude", -180.0, 180.0),
    FieldRule::text_list("images", "Images").optional(),
];

enum Lookup<'a> {
    Found(&'a Value),
    Missing,
    /// A parent is absent or not an object; the parent's own rule reports it.
    ParentUnavailable,
}

fn lookup<'a>(root: &'a Map<String, Value>, path: &str) -> Lookup<'a> {
    let mut current = root;
    let mut segments = path.split('.').peekable();

    while let Some(segment) = segments.next() {
        let value = current.get(segment).filter(|v| !v.is_null());
        if segments.peek().is_none() {
            return value.map_or(Lookup::Missing, Lookup::Found);
        }
        match value.and_then(Value::as_object) {
            Some(object) => current = object,
            None => return Lookup::ParentUnavailable,
        }
    }

    Lookup::Missing
}

/// Apply `rules` to `body`.
///
/// A JSON `null` counts as absent.
///
/// # Errors
///
/// Returns [`ValidationError::Fields`] listing every violated rule.
pub fn validate(rules: &[FieldRule], body: &Value, mode: Mode) -> Result<(), ValidationError> {
    let Some(root) = body.as_object() else {
        return Err(ValidationError::Fields(vec![FieldError::new(
            "body",
            "Body must be a JSON object",
        )]));
    };

    let mut errors = Vec::new();
    for rule in rules {
        match lookup(root, rule.path) {
            Lookup::Found(value) => rule.check(value, &mut errors),
            Lookup::Missing => {
                let enforced = mode == Mode::Create || rule.is_nested();
                if rule.required && enforced {
                    errors.push(FieldError::new(
                        rule.path,
                        format!("{} is required", rule.label),
                    ));
                }
            }
            Lookup::ParentUnavailable => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Fields(errors))
    }
}

/// Validate the payload of a new place.
///
/// # Errors
///
/// Returns [`ValidationError::Fields`] listing every violated rule.
pub fn validate_new_place(body: &Value) -> Result<(), ValidationError> {
    validate(PLACE_RULES, body, Mode::Create)
}

/// Validate an update patch.
///
/// # Errors
///
/// Returns [`ValidationError::Fields`] listing every violated rule.
pub fn validate_place_patch(body: &Value) -> Result<(), ValidationError> {
    validate(PLACE_RULES, body, Mode::Patch)
}
