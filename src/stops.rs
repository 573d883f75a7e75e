//! Stop markers derived from an itinerary.
//!
//! The backend names the stops a journey touches but only gives
//! coordinates for some of them. [`derive_stops`] reconciles the step list
//! into one marker per named stop, classified by the role it plays.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::model::{RouteData, RouteStep, StepKind};
use crate::polyline::Coordinate;

/// Role a stop plays in the journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StopRole {
    /// Walking origin, typically the user's own position.
    Walk,
    /// Journey origin: the first boarding stop.
    Board,
    /// Stop passed through while riding.
    Travel,
    Transfer,
    Arrive,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedStop {
    pub location: Coordinate,
    pub role: StopRole,
    /// Also the dedup key: no two derived stops share a name.
    pub name: String,
    pub line: Option<String>,
}

/// Derives the ordered, deduplicated stop markers for a route.
///
/// Board, transfer and arrive stops found anywhere in the itinerary take
/// precedence over the same name listed as an intermediate stop of a travel
/// leg. Steps missing what their action needs are skipped.
pub fn derive_stops(route: &RouteData) -> Vec<DerivedStop> {
    let special = special_stops(&route.steps);
    let mut deriver = Deriver {
        special: &special,
        processed: HashSet::new(),
        stops: Vec::new(),
    };

    let mut is_first_boarding = true;
    for (index, step) in route.steps.iter().enumerate() {
        if index == 0 {
            deriver.walk_origin(step);
        }

        match &step.kind {
            StepKind::Board { at: Some(at), line } if is_first_boarding => {
                if deriver.board(&route.steps[index + 1..], at, line.as_deref()) {
                    is_first_boarding = false;
                }
            }
            StepKind::Transfer {
                at: Some(at),
                location: Some(location),
                ..
            } => deriver.push(*location, StopRole::Transfer, at, None),
            StepKind::Travel {
                line, stops_between, ..
            } if !step.polyline.is_empty() => deriver.intermediate(step, stops_between, line.as_deref()),
            StepKind::Arrive {
                at: Some(at),
                location: Some(location),
            } => deriver.push(*location, StopRole::Arrive, at, None),
            _ => {}
        }
    }

    tracing::debug!(
        total = deriver.stops.len(),
        board = count(&deriver.stops, StopRole::Board),
        travel = count(&deriver.stops, StopRole::Travel),
        transfer = count(&deriver.stops, StopRole::Transfer),
        arrive = count(&deriver.stops, StopRole::Arrive),
        "derived route stops"
    );

    deriver.stops
}

/// First pass: names that are the origin, a transfer point or the
/// destination. Later transfer/arrive entries overwrite earlier ones.
fn special_stops(steps: &[RouteStep]) -> HashMap<&str, StopRole> {
    let mut special = HashMap::new();
    let mut is_first_boarding = true;

    for step in steps {
        match &step.kind {
            StepKind::Board { at: Some(at), .. } if is_first_boarding => {
                special.insert(at.as_str(), StopRole::Board);
                is_first_boarding = false;
            }
            StepKind::Transfer { at: Some(at), .. } => {
                special.insert(at.as_str(), StopRole::Transfer);
            }
            StepKind::Arrive { at: Some(at), .. } => {
                special.insert(at.as_str(), StopRole::Arrive);
            }
            _ => {}
        }
    }

    special
}

struct Deriver<'a> {
    special: &'a HashMap<&'a str, StopRole>,
    processed: HashSet<String>,
    stops: Vec<DerivedStop>,
}

impl Deriver<'_> {
    /// Emits a stop unless its name was already emitted.
    fn push(&mut self, location: Coordinate, role: StopRole, name: &str, line: Option<&str>) {
        if self.processed.contains(name) {
            return;
        }
        self.processed.insert(name.to_string());
        self.stops.push(DerivedStop {
            location,
            role,
            name: name.to_string(),
            line: line.map(str::to_string),
        });
    }

    /// Marks where a journey that starts on foot begins.
    fn walk_origin(&mut self, step: &RouteStep) {
        if !step.is_walk() {
            return;
        }
        if let (Some(from), Some(start)) = (step.origin(), step.polyline.first()) {
            self.push(start, StopRole::Walk, from, None);
        }
    }

    /// Places the origin at the start of the next travel leg with a path.
    /// Returns false when there is no such leg.
    fn board(&mut self, rest: &[RouteStep], at: &str, line: Option<&str>) -> bool {
        let start = rest
            .iter()
            .filter(|step| matches!(step.kind, StepKind::Travel { .. }))
            .find_map(|step| step.polyline.first());

        match start {
            Some(location) => {
                self.push(location, StopRole::Board, at, line);
                true
            }
            None => {
                tracing::warn!(stop = at, "boarding stop has no following travel polyline");
                false
            }
        }
    }

    /// Spreads the leg's intermediate stops evenly along its polyline.
    fn intermediate(&mut self, step: &RouteStep, names: &[String], line: Option<&str>) {
        let count = names.len() as f64;
        for (idx, name) in names.iter().enumerate() {
            if self.processed.contains(name) || self.special.contains_key(name.as_str()) {
                continue;
            }
            let progress = (idx + 1) as f64 / (count + 1.0);
            if let Some(location) = step.polyline.interpolate(progress) {
                self.push(location, StopRole::Travel, name, line);
            }
        }
    }
}

fn count(stops: &[DerivedStop], role: StopRole) -> usize {
    stops.iter().filter(|stop| stop.role == role).count()
}
