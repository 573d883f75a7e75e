//! Messages exchanged with a host mobile shell when embedded in a WebView,
//! and the screen-level controller they drive.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::display::RouteDisplay;
use crate::model::{RouteData, RouteDataError};
use crate::polyline::Coordinate;
use crate::traits::{MapViewport, OverlaySink};

pub const DEFAULT_LANGUAGE: &str = "en";

/// Languages laid out right-to-left.
const RTL_LANGUAGES: &[&str] = &["ar"];

const KNOWN_TYPES: &[&str] = &["LOCATION_UPDATE", "LANGUAGE_CHANGE", "ROUTE_DATA", "CLEAR_ROUTE"];

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("malformed host message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("host message is not a JSON object")]
    NotAnObject,

    #[error("invalid route in host message: {0}")]
    Route(#[from] RouteDataError),
}

/// A message received from the host shell.
#[derive(Debug, Clone, PartialEq)]
pub enum HostMessage {
    LocationUpdate(Coordinate),
    LanguageChange(String),
    RouteData(RouteData),
    ClearRoute,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
enum Tagged {
    LocationUpdate { latitude: f64, longitude: f64 },
    LanguageChange { language: String },
    RouteData {
        #[serde(rename = "routeData", default)]
        route_data: serde_json::Value,
    },
    ClearRoute,
}

/// Older hosts post bare positions without a `type`.
#[derive(Deserialize)]
struct UntypedLocation {
    latitude: f64,
    longitude: f64,
}

impl HostMessage {
    /// Decodes a raw host message. Messages of a type this crate does not
    /// handle yield `Ok(None)`.
    pub fn parse(raw: &str) -> Result<Option<Self>, BridgeError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(BridgeError::NotAnObject);
        }

        let Some(kind) = value.get("type") else {
            let location: UntypedLocation = serde_json::from_value(value)?;
            return Ok(Some(Self::LocationUpdate(Coordinate::new(
                location.latitude,
                location.longitude,
            ))));
        };

        if !kind.as_str().is_some_and(|kind| KNOWN_TYPES.contains(&kind)) {
            tracing::warn!(kind = %kind, "ignoring unknown host message");
            return Ok(None);
        }

        let message = match serde_json::from_value(value)? {
            Tagged::LocationUpdate { latitude, longitude } => {
                Self::LocationUpdate(Coordinate::new(latitude, longitude))
            }
            Tagged::LanguageChange { language } if language.is_empty() => return Ok(None),
            Tagged::LanguageChange { language } => Self::LanguageChange(language),
            Tagged::RouteData { route_data } if route_data.is_null() => return Ok(None),
            Tagged::RouteData { route_data } => Self::RouteData(RouteData::from_value(route_data)?),
            Tagged::ClearRoute => Self::ClearRoute,
        };
        Ok(Some(message))
    }
}

/// A message posted to the host shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutboundMessage {
    /// The map has loaded its initial data.
    WebAppReady,
}

impl OutboundMessage {
    pub fn to_json(&self) -> Result<String, BridgeError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Owns the route being shown on the main map together with the user's
/// position and UI language.
pub struct ScreenController<V: MapViewport, S: OverlaySink> {
    display: RouteDisplay<V, S>,
    location: Option<Coordinate>,
    language: String,
}

impl<V: MapViewport, S: OverlaySink> ScreenController<V, S> {
    pub fn new(display: RouteDisplay<V, S>) -> Self {
        Self {
            display,
            location: None,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn handle(&mut self, message: HostMessage, now: Instant) {
        match message {
            HostMessage::LocationUpdate(location) => self.location = Some(location),
            HostMessage::LanguageChange(language) => {
                tracing::info!(%language, "language changed");
                self.language = language;
            }
            HostMessage::RouteData(route) => self.display.show(route, now),
            HostMessage::ClearRoute => self.display.clear(),
        }
    }

    /// Parses and applies a raw host message.
    pub fn handle_raw(&mut self, raw: &str, now: Instant) -> Result<(), BridgeError> {
        if let Some(message) = HostMessage::parse(raw)? {
            self.handle(message, now);
        }
        Ok(())
    }

    /// Shows a route returned by a search made from this screen.
    pub fn show_route(&mut self, route: RouteData, now: Instant) {
        self.display.show(route, now);
    }

    pub fn clear_route(&mut self) {
        self.display.clear();
    }

    /// Drives deferred work; call when [`RouteDisplay::next_deadline`] passes.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.display.poll(now)
    }

    pub fn location(&self) -> Option<Coordinate> {
        self.location
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn is_rtl(&self) -> bool {
        RTL_LANGUAGES.contains(&self.language.as_str())
    }

    pub fn display(&self) -> &RouteDisplay<V, S> {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut RouteDisplay<V, S> {
        &mut self.display
    }
}
