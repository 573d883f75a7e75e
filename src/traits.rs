//! Seams between the route core and its host.
//!
//! The core never talks to a concrete map library, HTTP stack or storage
//! backend directly. Hosts implement these for their own platform.

use crate::model::RouteData;
use crate::overlay::RouteOverlay;
use crate::polyline::Coordinate;

/// Options for fitting the viewport around a set of points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FitOptions {
    /// Pixel padding (x, y) kept around the fitted region.
    pub padding: Option<(u32, u32)>,
    pub max_zoom: Option<u8>,
}

/// The interactive map's camera.
pub trait MapViewport {
    fn fit_bounds(&mut self, points: &[Coordinate], options: FitOptions);

    fn zoom_in(&mut self);

    fn zoom_out(&mut self);
}

/// Receives the artifacts to draw for the current route.
pub trait OverlaySink {
    fn render(&mut self, overlay: &RouteOverlay);

    /// Removes everything previously rendered.
    fn clear(&mut self);
}

/// Source of itineraries (the journey-planning backend).
pub trait JourneyPlanner {
    type Error;

    /// Route from a free position to a named destination stop.
    fn plan_journey(&self, start: Coordinate, end_stop: &str) -> Result<RouteData, Self::Error>;

    /// Route between two named stops.
    fn find_route(&self, start_stop: &str, end_stop: &str) -> Result<RouteData, Self::Error>;
}

/// String key-value persistence (browser local storage or equivalent).
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&mut self, key: &str, value: String);

    fn remove_item(&mut self, key: &str);

    fn clear(&mut self);
}
