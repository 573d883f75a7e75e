//! Step-by-step text breakdown shown in the route details panel.

use crate::model::{RouteData, RouteStep, StepKind};
use crate::segments::DEFAULT_LINE_COLOR;

const WALK_STEP_COLOR: &str = "#6b7280";
const TRANSFER_STEP_COLOR: &str = "#f59e0b";
const ARRIVE_STEP_COLOR: &str = "#10b981";

/// Stop lists longer than this start collapsed.
const COLLAPSE_ABOVE: usize = 5;
const COLLAPSED_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub title: String,
    pub transfer_text: String,
    pub total_time: f64,
    /// Kilometers, one decimal.
    pub distance_text: String,
    pub transfers: u32,
    pub warning: Option<String>,
    pub steps: Vec<StepCard>,
}

impl RouteSummary {
    pub fn from_route(route: &RouteData) -> Self {
        let transfers = route.transfers();
        Self {
            title: route.summary.clone(),
            transfer_text: transfer_text(transfers),
            total_time: route.total_time,
            distance_text: format!("{:.1}", route.total_distance),
            transfers,
            warning: route.warning().map(str::to_string),
            steps: route.steps.iter().map(StepCard::from_step).collect(),
        }
    }
}

fn transfer_text(transfers: u32) -> String {
    match transfers {
        0 => "Direct route".to_string(),
        1 => "1 transfer required".to_string(),
        n => format!("{n} transfers required"),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepCard {
    pub title: String,
    pub color: String,
    pub duration: Option<String>,
    pub details: Vec<String>,
    pub stops: Option<StopsList>,
}

impl StepCard {
    pub fn from_step(step: &RouteStep) -> Self {
        let mut details = Vec::new();
        let mut stops = None;

        let title = match &step.kind {
            StepKind::Walk { to, .. } => {
                if let Some(distance) = nonzero(step.distance) {
                    details.push(format!("{distance:.2} km"));
                }
                if let Some(from) = &step.from {
                    details.push(format!("From: {from}"));
                }
                if let Some(to) = to {
                    details.push(format!("To: {to}"));
                }
                "Walk".to_string()
            }
            StepKind::Board { at, line } => {
                if let Some(at) = at {
                    details.push(format!("At: {at}"));
                }
                format!("Board {}", line.as_deref().unwrap_or_default())
            }
            StepKind::Travel {
                line,
                stops: count,
                stops_between,
            } => {
                if let Some(count) = count.filter(|&count| count > 0) {
                    details.push(format!("{count} stops"));
                }
                if let Some(distance) = nonzero(step.distance) {
                    details.push(format!("{distance:.1} km"));
                }
                if !stops_between.is_empty() {
                    stops = Some(StopsList::new(stops_between.clone()));
                }
                line.clone().unwrap_or_default()
            }
            StepKind::Transfer { at, to, .. } => {
                if let Some(at) = at {
                    details.push(format!("At: {at}"));
                }
                if let Some(to) = to {
                    details.push(format!("Change to: {to}"));
                }
                "Transfer at".to_string()
            }
            StepKind::Arrive { at, .. } => {
                details.extend(at.clone());
                "Arrive".to_string()
            }
            StepKind::Other { action, .. } => action.clone(),
        };

        Self {
            title,
            color: step_color(step).to_string(),
            duration: nonzero(step.duration).map(|minutes| format!("{minutes} min")),
            details,
            stops,
        }
    }
}

/// The leg's own color, or the color of its action.
pub fn step_color(step: &RouteStep) -> &str {
    if let Some(color) = &step.color {
        return color;
    }
    match step.kind {
        StepKind::Board { .. } | StepKind::Travel { .. } => DEFAULT_LINE_COLOR,
        StepKind::Transfer { .. } => TRANSFER_STEP_COLOR,
        StepKind::Arrive { .. } => ARRIVE_STEP_COLOR,
        StepKind::Walk { .. } | StepKind::Other { .. } => WALK_STEP_COLOR,
    }
}

fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|&v| v != 0.0)
}

/// Intermediate stops of a travel leg, collapsible when long.
#[derive(Debug, Clone, PartialEq)]
pub struct StopsList {
    stops: Vec<String>,
    expanded: bool,
}

impl StopsList {
    pub fn new(stops: Vec<String>) -> Self {
        let expanded = stops.len() <= COLLAPSE_ABOVE;
        Self { stops, expanded }
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn is_collapsible(&self) -> bool {
        self.stops.len() > COLLAPSE_ABOVE
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn toggle(&mut self) {
        if self.is_collapsible() {
            self.expanded = !self.expanded;
        }
    }

    pub fn visible(&self) -> &[String] {
        if self.expanded {
            &self.stops
        } else {
            &self.stops[..COLLAPSED_LEN.min(self.stops.len())]
        }
    }

    pub fn hidden_count(&self) -> usize {
        self.stops.len() - self.visible().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RouteMetadata;

    #[test]
    fn test_transfer_text() {
        assert_eq!(transfer_text(0), "Direct route");
        assert_eq!(transfer_text(1), "1 transfer required");
        assert_eq!(transfer_text(3), "3 transfers required");
    }

    #[test]
    fn test_summary_header() {
        let mut route = RouteData::from_steps(Vec::new());
        route.summary = "Take line 12".into();
        route.total_distance = 7.46;
        route.metadata = Some(RouteMetadata {
            transfers: Some(2),
            warning: Some("Service ends at 22:00".into()),
            ..RouteMetadata::default()
        });

        let summary = RouteSummary::from_route(&route);
        assert_eq!(summary.distance_text, "7.5");
        assert_eq!(summary.transfer_text, "2 transfers required");
        assert_eq!(summary.warning.as_deref(), Some("Service ends at 22:00"));
    }

    #[test]
    fn test_walk_card() {
        let mut step = RouteStep::new(StepKind::Walk {
            to: Some("Central".into()),
            location: None,
        })
        .with_from("Home");
        step.distance = Some(0.456);
        step.duration = Some(6.0);

        let card = StepCard::from_step(&step);
        assert_eq!(card.title, "Walk");
        assert_eq!(card.color, WALK_STEP_COLOR);
        assert_eq!(card.duration.as_deref(), Some("6 min"));
        assert_eq!(card.details, vec!["0.46 km", "From: Home", "To: Central"]);
    }

    #[test]
    fn test_travel_card_uses_leg_color_and_stop_list() {
        let step = RouteStep::new(StepKind::Travel {
            line: Some("12".into()),
            stops: Some(7),
            stops_between: (1..=7).map(|i| format!("S{i}")).collect(),
        })
        .with_color("#ff0000");

        let card = StepCard::from_step(&step);
        assert_eq!(card.title, "12");
        assert_eq!(card.color, "#ff0000");
        assert_eq!(card.details, vec!["7 stops"]);

        let mut stops = card.stops.unwrap();
        assert!(!stops.is_expanded());
        assert_eq!(stops.visible(), &["S1", "S2", "S3"]);
        assert_eq!(stops.hidden_count(), 4);
        stops.toggle();
        assert_eq!(stops.visible().len(), 7);
    }

    #[test]
    fn test_short_stop_list_is_not_collapsible() {
        let mut stops = StopsList::new(vec!["A".into(), "B".into()]);
        stops.toggle();
        assert!(stops.is_expanded());
        assert_eq!(stops.hidden_count(), 0);
    }

    #[test]
    fn test_unknown_action_card() {
        let step = RouteStep::new(StepKind::Other {
            action: "ferry".into(),
            location: None,
        });
        let card = StepCard::from_step(&step);
        assert_eq!(card.title, "ferry");
        assert_eq!(card.color, WALK_STEP_COLOR);
    }
}
