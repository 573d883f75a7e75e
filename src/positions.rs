//! Live vehicle positions.
//!
//! Frames from the tracking server's socket are decoded into [`FeedEvent`]s
//! and sent over a channel; the UI loop drains that channel and folds the
//! updates into its current position set with [`merge_positions`].

use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::polyline::Coordinate;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("malformed feed frame: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: i64,
    pub device_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub speed: f64,
    /// Heading in degrees.
    #[serde(default)]
    pub course: f64,
    #[serde(default)]
    pub fix_time: Option<String>,
    #[serde(default)]
    pub outdated: bool,
    #[serde(default)]
    pub valid: bool,
}

impl Position {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// A decoded socket frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    Positions(Vec<Position>),
    Devices(Vec<Device>),
}

#[derive(Deserialize)]
struct Frame {
    positions: Option<Vec<Position>>,
    devices: Option<Vec<Device>>,
}

impl FeedEvent {
    /// Frames carrying neither positions nor devices yield `Ok(None)`.
    pub fn parse(frame: &str) -> Result<Option<Self>, FeedError> {
        let frame: Frame = serde_json::from_str(frame)?;
        Ok(match (frame.positions, frame.devices) {
            (Some(positions), _) => Some(Self::Positions(positions)),
            (None, Some(devices)) => Some(Self::Devices(devices)),
            (None, None) => None,
        })
    }
}

/// Moves known vehicles to their reported position and heading.
///
/// Updates are matched by device id; updates for devices not in `current`
/// are ignored until the next full fetch brings them in.
pub fn merge_positions(current: &mut [Position], updates: &[Position]) -> usize {
    let mut moved = 0;
    for position in current.iter_mut() {
        if let Some(update) = updates.iter().find(|update| update.device_id == position.device_id) {
            position.latitude = update.latitude;
            position.longitude = update.longitude;
            position.course = update.course;
            moved += 1;
        }
    }
    moved
}

/// Receiving end of the live position subscription.
pub struct PositionFeed {
    events: Receiver<FeedEvent>,
}

impl PositionFeed {
    /// Creates a feed and the sender a socket reader pushes decoded frames into.
    pub fn channel() -> (Sender<FeedEvent>, Self) {
        let (sender, events) = mpsc::channel();
        (sender, Self { events })
    }

    /// Applies every event received so far without blocking. Returns the
    /// number of vehicles moved.
    pub fn drain_into(&self, positions: &mut [Position]) -> usize {
        let mut moved = 0;
        for event in self.events.try_iter() {
            match event {
                FeedEvent::Positions(updates) => moved += merge_positions(positions, &updates),
                FeedEvent::Devices(devices) => {
                    tracing::debug!(count = devices.len(), "ignoring device frame");
                }
            }
        }
        moved
    }
}

/// A vehicle to draw on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleMarker {
    pub device_id: i64,
    pub name: String,
    pub location: Coordinate,
    pub course: f64,
}

/// Pairs each device with its latest position. Devices without one are
/// left out.
pub fn vehicle_markers(devices: &[Device], positions: &[Position]) -> Vec<VehicleMarker> {
    devices
        .iter()
        .filter_map(|device| {
            let position = positions.iter().find(|position| position.device_id == device.id)?;
            Some(VehicleMarker {
                device_id: device.id,
                name: device.name.clone(),
                location: position.coordinate(),
                course: position.course,
            })
        })
        .collect()
}
