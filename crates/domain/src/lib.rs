//! # places-domain
//!
//! Pure domain model for the places service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the **Place** record and its **Address**
//! - Define the **validator**: one declarative rule set applied to create
//!   payloads and update patches alike
//! - Contain the matching and merge logic used by the use-case layer
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod place;
pub mod validation;
