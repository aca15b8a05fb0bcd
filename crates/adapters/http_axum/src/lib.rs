//! # places-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **places REST API** under `/places`
//!   (list, search, create with image uploads, update, delete)
//! - Map HTTP requests (query strings, JSON bodies, multipart forms) into
//!   application service calls (driving adapter)
//! - Map application results and errors into JSON responses
//!
//! ## Dependency rule
//! Depends on `places-app` (for port traits and services) and `places-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
