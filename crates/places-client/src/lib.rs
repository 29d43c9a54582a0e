//! Async client for the places REST API and the reverse geocoder.
//!
//! This crate provides:
//! - `PlacesClient` for `/api/places`, `/featured`, `/search`, `/:id` and `/:id/gallery`
//! - `Geocoder` for turning the user's coordinates into country/state/city
//! - `ClientConfig` read from the environment
//!
//! Responses are mapped into `place_data::Place`; nothing here filters or
//! ranks places.

pub mod client;
pub mod config;
pub mod error;
pub mod geocode;

pub use client::{PlacesClient, PlacesPage, PlacesQuery};
pub use config::{ClientConfig, DEFAULT_API_URL, DEFAULT_GEOCODER_URL};
pub use error::{ClientError, Result};
pub use geocode::{Geocoder, UserLocation};
