//! transit-route-view core
//!
//! Turns journey-planner itineraries into map-renderable stops, segments and
//! line labels, and manages how a route is shown on a map surface.

pub mod traits;
pub mod polyline;
pub mod model;
pub mod stops;
pub mod segments;
pub mod labels;
pub mod bounds;
pub mod overlay;
pub mod display;
pub mod summary;
pub mod bridge;
pub mod client;
pub mod config;
pub mod settings;
pub mod positions;

pub use bounds::compute_bounds;
pub use labels::place_line_labels;
pub use segments::project_polylines;
pub use stops::derive_stops;
