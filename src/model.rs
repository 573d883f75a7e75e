//! Itinerary payloads delivered by the journey-planning backend.
//!
//! The backend sends one loosely-shaped record per step; here each step is
//! decoded into a [`StepKind`] variant keyed by its `action`, so consumers
//! match on the variant instead of probing optional fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::polyline::{Coordinate, Polyline};

/// Secondary classifier value that marks a walking leg.
const WALK: &str = "walk";

#[derive(Debug, Error)]
pub enum RouteDataError {
    #[error("invalid route payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("route payload has no steps array")]
    MissingSteps,
}

/// Action-specific part of a step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepKind {
    Walk {
        to: Option<String>,
        location: Option<Coordinate>,
    },
    /// Boarding never has a location of its own; it is inferred from the
    /// following travel leg.
    Board {
        at: Option<String>,
        line: Option<String>,
    },
    Travel {
        line: Option<String>,
        stops: Option<u32>,
        /// Stops passed through, excluding the boarding and alighting stop.
        stops_between: Vec<String>,
    },
    Transfer {
        at: Option<String>,
        to: Option<String>,
        location: Option<Coordinate>,
    },
    Arrive {
        at: Option<String>,
        location: Option<Coordinate>,
    },
    /// Any action this crate does not know about. Ignored by derivations.
    Other {
        action: String,
        location: Option<Coordinate>,
    },
}

/// One leg of an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawStep", into = "RawStep")]
pub struct RouteStep {
    pub kind: StepKind,
    /// Where the leg starts. Any action may carry one; walk legs use it to
    /// name the journey's starting point.
    pub from: Option<String>,
    /// Empty when the leg has no path.
    pub polyline: Polyline,
    pub color: Option<String>,
    /// Minutes.
    pub duration: Option<f64>,
    /// Kilometers.
    pub distance: Option<f64>,
    /// The wire `type` field.
    pub step_type: Option<String>,
}

impl RouteStep {
    pub fn new(kind: StepKind) -> Self {
        Self {
            kind,
            from: None,
            polyline: Polyline::default(),
            color: None,
            duration: None,
            distance: None,
            step_type: None,
        }
    }

    pub fn with_polyline(mut self, polyline: impl Into<Polyline>) -> Self {
        self.polyline = polyline.into();
        self
    }

    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// The wire name of the action.
    pub fn action(&self) -> &str {
        match &self.kind {
            StepKind::Walk { .. } => "walk",
            StepKind::Board { .. } => "board",
            StepKind::Travel { .. } => "travel",
            StepKind::Transfer { .. } => "transfer",
            StepKind::Arrive { .. } => "arrive",
            StepKind::Other { action, .. } => action,
        }
    }

    /// Walk legs are flagged either by action or by the secondary `type`.
    pub fn is_walk(&self) -> bool {
        matches!(self.kind, StepKind::Walk { .. }) || self.step_type.as_deref() == Some(WALK)
    }

    /// Explicit position of the step's point, if the payload gave one.
    pub fn location(&self) -> Option<Coordinate> {
        match &self.kind {
            StepKind::Walk { location, .. }
            | StepKind::Transfer { location, .. }
            | StepKind::Arrive { location, .. }
            | StepKind::Other { location, .. } => *location,
            StepKind::Board { .. } | StepKind::Travel { .. } => None,
        }
    }

    pub fn line(&self) -> Option<&str> {
        match &self.kind {
            StepKind::Board { line, .. } | StepKind::Travel { line, .. } => line.as_deref(),
            _ => None,
        }
    }

    pub fn origin(&self) -> Option<&str> {
        self.from.as_deref()
    }

    /// Named stop the step happens at.
    pub fn at(&self) -> Option<&str> {
        match &self.kind {
            StepKind::Board { at, .. } | StepKind::Transfer { at, .. } | StepKind::Arrive { at, .. } => {
                at.as_deref()
            }
            _ => None,
        }
    }
}

/// Wire shape of a step: every field optional, unknown fields ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct RawStep {
    action: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    step_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stops: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stops_between: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    polyline: Option<Polyline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<Coordinate>,
}

impl From<RawStep> for RouteStep {
    fn from(raw: RawStep) -> Self {
        let kind = match raw.action.as_str() {
            "walk" => StepKind::Walk {
                to: raw.to,
                location: raw.location,
            },
            "board" => {
                if raw.location.is_some() {
                    tracing::debug!(at = ?raw.at, "ignoring explicit location on board step");
                }
                StepKind::Board {
                    at: raw.at,
                    line: raw.line,
                }
            }
            "travel" => StepKind::Travel {
                line: raw.line,
                stops: raw.stops,
                stops_between: raw.stops_between.unwrap_or_default(),
            },
            "transfer" => StepKind::Transfer {
                at: raw.at,
                to: raw.to,
                location: raw.location,
            },
            "arrive" => StepKind::Arrive {
                at: raw.at,
                location: raw.location,
            },
            _ => StepKind::Other {
                action: raw.action,
                location: raw.location,
            },
        };

        Self {
            kind,
            from: raw.from,
            polyline: raw.polyline.unwrap_or_default(),
            color: raw.color,
            duration: raw.duration,
            distance: raw.distance,
            step_type: raw.step_type,
        }
    }
}

impl From<RouteStep> for RawStep {
    fn from(step: RouteStep) -> Self {
        let mut raw = RawStep {
            action: step.action().to_string(),
            step_type: step.step_type,
            from: step.from,
            polyline: (!step.polyline.is_empty()).then_some(step.polyline),
            color: step.color,
            duration: step.duration,
            distance: step.distance,
            ..RawStep::default()
        };

        match step.kind {
            StepKind::Walk { to, location } => {
                raw.to = to;
                raw.location = location;
            }
            StepKind::Board { at, line } => {
                raw.at = at;
                raw.line = line;
            }
            StepKind::Travel {
                line,
                stops,
                stops_between,
            } => {
                raw.line = line;
                raw.stops = stops;
                raw.stops_between = (!stops_between.is_empty()).then_some(stops_between);
            }
            StepKind::Transfer { at, to, location } => {
                raw.at = at;
                raw.to = to;
                raw.location = location;
            }
            StepKind::Arrive { at, location } => {
                raw.at = at;
                raw.location = location;
            }
            StepKind::Other { location, .. } => {
                raw.location = location;
            }
        }

        raw
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteMetadata {
    pub transfers: Option<u32>,
    pub lines_used: Option<Vec<String>>,
    pub total_stops: Option<u32>,
    pub warning: Option<String>,
}

/// A full itinerary as returned by the routing backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteData {
    #[serde(default)]
    pub success: bool,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub route_type: Option<String>,
    #[serde(default)]
    pub summary: String,
    /// Minutes.
    #[serde(default)]
    pub total_time: f64,
    #[serde(default)]
    pub total_price: f64,
    /// Kilometers.
    #[serde(default)]
    pub total_distance: f64,
    pub steps: Vec<RouteStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RouteMetadata>,
    /// Backend explanation when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RouteData {
    /// An itinerary made of `steps` with every other field defaulted.
    pub fn from_steps(steps: Vec<RouteStep>) -> Self {
        Self {
            success: true,
            steps,
            ..Self::default()
        }
    }

    /// Parses a backend response, rejecting payloads without a `steps` array.
    pub fn from_json(body: &str) -> Result<Self, RouteDataError> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, RouteDataError> {
        if !value.get("steps").is_some_and(serde_json::Value::is_array) {
            return Err(RouteDataError::MissingSteps);
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn transfers(&self) -> u32 {
        self.metadata.as_ref().and_then(|m| m.transfers).unwrap_or(0)
    }

    pub fn warning(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.warning.as_deref())
    }
}
