//! Test fixtures for transit-route-view.
//!
//! Provides:
//! - Step builders for hand-made itineraries
//! - A realistic multi-leg itinerary payload (Algiers bus network)

pub mod itineraries;

pub use itineraries::*;
