//! Renderable line segments for each leg of an itinerary.

use serde::Serialize;

use crate::model::RouteData;
use crate::polyline::Polyline;

/// Color for legs that do not carry one.
pub const DEFAULT_LINE_COLOR: &str = "#0c4a6e";

pub const WALK_COLOR: &str = "#6B7280";

pub const WALK_DASH: &str = "10, 10";

/// Presentation constants for projected segments.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentStyle {
    /// Overrides the leg color for walk legs when set.
    pub walk_color: Option<String>,
    pub walk_weight: f64,
    pub line_weight: f64,
    pub opacity: f64,
}

impl SegmentStyle {
    /// Style of route overlays drawn on the live map.
    pub fn live_map() -> Self {
        Self {
            walk_color: Some(WALK_COLOR.to_string()),
            walk_weight: 4.0,
            line_weight: 6.0,
            opacity: 0.9,
        }
    }

    /// Style of the full-view route review map.
    pub fn review() -> Self {
        Self {
            walk_color: None,
            walk_weight: 6.0,
            line_weight: 6.0,
            opacity: 0.9,
        }
    }
}

impl Default for SegmentStyle {
    fn default() -> Self {
        Self::live_map()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub positions: Polyline,
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    pub dash_array: Option<String>,
    pub is_walk: bool,
}

/// One segment per step with a non-empty polyline, in step order, styled
/// for the live map.
pub fn project_polylines(route: &RouteData) -> Vec<Segment> {
    project_polylines_styled(route, &SegmentStyle::live_map())
}

pub fn project_polylines_styled(route: &RouteData, style: &SegmentStyle) -> Vec<Segment> {
    route
        .steps
        .iter()
        .filter(|step| !step.polyline.is_empty())
        .map(|step| {
            let is_walk = step.is_walk();
            let leg_color = step.color.as_deref().unwrap_or(DEFAULT_LINE_COLOR);
            let color = match (&style.walk_color, is_walk) {
                (Some(walk_color), true) => walk_color.as_str(),
                _ => leg_color,
            };

            Segment {
                positions: step.polyline.clone(),
                color: color.to_string(),
                weight: if is_walk { style.walk_weight } else { style.line_weight },
                opacity: style.opacity,
                dash_array: is_walk.then(|| WALK_DASH.to_string()),
                is_walk,
            }
        })
        .collect()
}
