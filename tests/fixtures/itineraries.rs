//! Itinerary builders and a realistic backend payload.
//!
//! The payload follows the shape the journey-planning backend returns for a
//! walk + two-bus trip across central Algiers.

#![allow(dead_code)]

use serde_json::{json, Value};

use transit_route_view::model::{RouteData, RouteStep, StepKind};
use transit_route_view::polyline::{Coordinate, Polyline};

// ============================================================================
// Step builders
// ============================================================================

pub fn walk(from: &str, to: &str, points: &[(f64, f64)]) -> RouteStep {
    RouteStep::new(StepKind::Walk {
        to: Some(to.to_string()),
        location: None,
    })
    .with_from(from)
    .with_polyline(Polyline::from(points.to_vec()))
}

pub fn board(at: &str, line: &str) -> RouteStep {
    RouteStep::new(StepKind::Board {
        at: Some(at.to_string()),
        line: Some(line.to_string()),
    })
}

pub fn travel(line: &str, stops_between: &[&str], points: &[(f64, f64)]) -> RouteStep {
    RouteStep::new(StepKind::Travel {
        line: Some(line.to_string()),
        stops: Some(stops_between.len() as u32 + 1),
        stops_between: stops_between.iter().map(|name| name.to_string()).collect(),
    })
    .with_polyline(Polyline::from(points.to_vec()))
}

pub fn transfer(at: &str, location: (f64, f64)) -> RouteStep {
    RouteStep::new(StepKind::Transfer {
        at: Some(at.to_string()),
        to: None,
        location: Some(location.into()),
    })
}

pub fn arrive(at: &str, location: (f64, f64)) -> RouteStep {
    RouteStep::new(StepKind::Arrive {
        at: Some(at.to_string()),
        location: Some(location.into()),
    })
}

pub fn route(steps: Vec<RouteStep>) -> RouteData {
    RouteData::from_steps(steps)
}

/// `polyline[floor(((idx + 1) / (n + 1)) * (m - 1))]`.
pub fn interpolated(points: &[(f64, f64)], idx: usize, n: usize) -> Coordinate {
    let progress = (idx + 1) as f64 / (n + 1) as f64;
    let index = (progress * (points.len() - 1) as f64).floor() as usize;
    points[index].into()
}

// ============================================================================
// Realistic payload: Place des Martyrs -> El Biar
// ============================================================================

pub const WALK_PATH: &[(f64, f64)] = &[(36.7880, 3.0640), (36.7872, 3.0633), (36.7865, 3.0625)];

pub const L12_PATH: &[(f64, f64)] = &[
    (36.7865, 3.0625),
    (36.7851, 3.0611),
    (36.7838, 3.0598),
    (36.7824, 3.0584),
    (36.7810, 3.0571),
    (36.7797, 3.0557),
    (36.7783, 3.0544),
    (36.7769, 3.0530),
    (36.7756, 3.0517),
    (36.7742, 3.0503),
    (36.7728, 3.0490),
];

pub const L7_PATH: &[(f64, f64)] = &[
    (36.7728, 3.0490),
    (36.7712, 3.0468),
    (36.7695, 3.0447),
    (36.7679, 3.0425),
    (36.7662, 3.0404),
    (36.7646, 3.0382),
];

pub const L12_STOPS: &[&str] = &["Bab Azzoun", "Square Port Said", "Grande Poste", "Didouche Mourad"];

pub const L7_STOPS: &[&str] = &["Sacre-Coeur", "Telemly"];

fn path(points: &[(f64, f64)]) -> Vec<[f64; 2]> {
    points.iter().map(|&(lat, lng)| [lat, lng]).collect()
}

pub fn algiers_payload() -> Value {
    let walk_path = path(WALK_PATH);
    let l12_path = path(L12_PATH);
    let l7_path = path(L7_PATH);

    json!({
        "success": true,
        "type": "transit",
        "summary": "L12 then L7 to El Biar",
        "total_time": 38,
        "total_price": 100,
        "total_distance": 6.2,
        "steps": [
            {
                "action": "walk",
                "type": "walk",
                "from": "Current location",
                "to": "Place des Martyrs",
                "duration": 3,
                "distance": 0.21,
                "polyline": walk_path
            },
            { "action": "board", "line": "L12", "at": "Place des Martyrs", "buses_available": [] },
            {
                "action": "travel",
                "line": "L12",
                "color": "#e11d48",
                "stops": 5,
                "stops_between": L12_STOPS,
                "duration": 18,
                "distance": 3.4,
                "polyline": l12_path
            },
            {
                "action": "transfer",
                "at": "Didouche Mourad",
                "from": "L12",
                "to": "L7",
                "location": [36.7728, 3.0490],
                "duration": 4
            },
            {
                "action": "travel",
                "line": "L7",
                "stops": 3,
                "stops_between": L7_STOPS,
                "duration": 13,
                "distance": 2.6,
                "polyline": l7_path
            },
            { "action": "arrive", "at": "El Biar", "location": [36.7646, 3.0382] }
        ],
        "metadata": {
            "transfers": 1,
            "lines_used": ["L12", "L7"],
            "total_stops": 8,
            "warning": null
        }
    })
}

pub fn algiers_route() -> RouteData {
    RouteData::from_value(algiers_payload()).expect("fixture payload parses")
}
