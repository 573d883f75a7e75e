//! Everything drawn for one route on one map surface.

use std::time::Duration;

use serde::Serialize;

use crate::bounds::compute_bounds;
use crate::labels::{place_line_labels, LineLabel};
use crate::model::RouteData;
use crate::polyline::Coordinate;
use crate::segments::{project_polylines_styled, Segment, SegmentStyle};
use crate::stops::{derive_stops, DerivedStop};
use crate::traits::FitOptions;

/// Map center used when a route offers no coordinate at all.
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(36.7538, 3.0588);

/// Lets the map finish laying out before the viewport is fitted.
pub const FIT_DELAY: Duration = Duration::from_millis(300);

/// Per-surface presentation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceStyle {
    pub segments: SegmentStyle,
    pub fit: FitOptions,
    pub fit_delay: Duration,
}

impl SurfaceStyle {
    /// The persistent map the route is drawn over.
    pub fn live_map() -> Self {
        Self {
            segments: SegmentStyle::live_map(),
            fit: FitOptions {
                padding: Some((50, 50)),
                max_zoom: Some(16),
            },
            fit_delay: FIT_DELAY,
        }
    }

    /// The full-view route review map.
    pub fn review() -> Self {
        Self {
            segments: SegmentStyle::review(),
            fit: FitOptions {
                padding: Some((80, 80)),
                max_zoom: None,
            },
            fit_delay: FIT_DELAY,
        }
    }
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self::live_map()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOverlay {
    pub segments: Vec<Segment>,
    pub labels: Vec<LineLabel>,
    pub stops: Vec<DerivedStop>,
    /// Points the viewport should enclose.
    pub bounds: Vec<Coordinate>,
}

impl RouteOverlay {
    pub fn build(route: &RouteData, style: &SurfaceStyle) -> Self {
        Self {
            segments: project_polylines_styled(route, &style.segments),
            labels: place_line_labels(route),
            stops: derive_stops(route),
            bounds: compute_bounds(route),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.labels.is_empty() && self.stops.is_empty()
    }
}

/// Where to center a fresh map showing `route` before its bounds are fitted.
pub fn initial_center(route: &RouteData) -> Coordinate {
    route
        .steps
        .first()
        .and_then(|step| step.polyline.first().or_else(|| step.location()))
        .unwrap_or(DEFAULT_CENTER)
}
