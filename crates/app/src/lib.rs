//! # places-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `PlaceRepository` — load and save the whole place sequence
//!   - `MediaHost` — upload an image and return its public URL
//! - Define the **driving/inbound** use-case struct `PlaceService`:
//!   list, search, create, update, delete
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `places-domain` only (plus `tokio::sync` for the write lock).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
