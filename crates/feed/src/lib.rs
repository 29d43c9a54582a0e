//! Home feed for the Spotnere place browser.
//!
//! This crate contains the orchestrator that fetches places from a
//! `PlaceSource` (the live API or a loaded snapshot) and derives the
//! landing-page carousels from them.

pub mod orchestrator;
pub mod source;

pub use orchestrator::{Carousel, Carousels, HomeFeed, CAROUSEL_LEN, CATEGORY_CAROUSELS, FEED_FETCH_LIMIT};
pub use source::PlaceSource;
