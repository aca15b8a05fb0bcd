//! # places-adapter-media-cloudinary
//!
//! Media host adapter for [Cloudinary](https://cloudinary.com).
//!
//! ## Responsibilities
//! - Implement the `MediaHost` port defined in `places-app::ports::media`
//! - Sign upload requests with the account's API secret
//! - Map Cloudinary responses to public image URLs
//!
//! ## Dependency rule
//! Depends on `places-app` (for port traits) and `places-domain` (for error types).

pub mod client;
pub mod config;
pub mod error;

pub use client::CloudinaryMediaHost;
pub use config::CloudinaryConfig;
pub use error::MediaError;
