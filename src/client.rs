//! HTTP adapter for the journey-planning backend.

use serde::Serialize;
use thiserror::Error;

use crate::model::{RouteData, RouteDataError};
use crate::polyline::Coordinate;
use crate::traits::JourneyPlanner;

const NO_ROUTE_MESSAGE: &str = "No route found";
const FAILED_MESSAGE: &str = "Failed to find route";

#[derive(Debug, Clone)]
pub struct RoutingConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("routing request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Payload(#[from] RouteDataError),

    /// The backend answered but found no itinerary.
    #[error("{0}")]
    NoRoute(String),
}

#[derive(Debug, Clone)]
pub struct RoutingClient {
    config: RoutingConfig,
    client: reqwest::blocking::Client,
}

#[derive(Serialize)]
struct PlanJourneyRequest<'a> {
    start_lat: f64,
    start_lng: f64,
    end_stop: &'a str,
}

impl RoutingClient {
    pub fn new(config: RoutingConfig) -> Result<Self, RoutingError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Reads the body even on error statuses: the backend explains failures
    /// in the same JSON shape.
    fn read_route(response: reqwest::blocking::Response) -> Result<RouteData, RoutingError> {
        let status = response.status();
        let body = response.text()?;
        tracing::debug!(%status, bytes = body.len(), "routing response");

        let value: serde_json::Value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(_) if !status.is_success() => return Err(RoutingError::NoRoute(FAILED_MESSAGE.to_string())),
            Err(err) => return Err(RouteDataError::from(err).into()),
        };
        let success = value.get("success").and_then(serde_json::Value::as_bool).unwrap_or(false);
        if !status.is_success() || !success {
            let message = ["message", "error"]
                .iter()
                .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
                .unwrap_or(NO_ROUTE_MESSAGE);
            return Err(RoutingError::NoRoute(message.to_string()));
        }

        Ok(RouteData::from_value(value)?)
    }
}

impl JourneyPlanner for RoutingClient {
    type Error = RoutingError;

    fn plan_journey(&self, start: Coordinate, end_stop: &str) -> Result<RouteData, Self::Error> {
        let request = PlanJourneyRequest {
            start_lat: start.lat,
            start_lng: start.lng,
            end_stop,
        };
        let response = self.client.post(self.url("plan-journey")).json(&request).send()?;
        Self::read_route(response)
    }

    fn find_route(&self, start_stop: &str, end_stop: &str) -> Result<RouteData, Self::Error> {
        let response = self
            .client
            .get(self.url("find-route"))
            .query(&[("start", start_stop), ("end", end_stop)])
            .send()?;
        Self::read_route(response)
    }
}
