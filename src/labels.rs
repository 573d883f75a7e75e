//! Line-name badges placed along travel legs.

use serde::Serialize;

use crate::model::{RouteData, StepKind};
use crate::polyline::Coordinate;

pub const DEFAULT_LABEL_COLOR: &str = "#FBBC04";

/// Fraction of the leg's vertex count at which its label sits.
pub const LABEL_POSITION: f64 = 0.15;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineLabel {
    pub location: Coordinate,
    pub line: String,
    pub color: String,
}

/// One label per travel leg that has a line name and a path.
///
/// Labels are not merged by line: an itinerary riding the same line twice
/// shows two badges.
pub fn place_line_labels(route: &RouteData) -> Vec<LineLabel> {
    route
        .steps
        .iter()
        .filter_map(|step| {
            let StepKind::Travel { line: Some(line), .. } = &step.kind else {
                return None;
            };
            let location = step.polyline.sample(LABEL_POSITION)?;
            Some(LineLabel {
                location,
                line: line.clone(),
                color: step.color.clone().unwrap_or_else(|| DEFAULT_LABEL_COLOR.to_string()),
            })
        })
        .collect()
}
