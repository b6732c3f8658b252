//! Event — an immutable record of something that happened.
//!
//! Events are produced when the alarm or arming status changes, when a
//! sensor reports, and when a camera frame has been classified.

use serde::{Deserialize, Serialize};

use crate::id::{EventId, ImageId, SensorId};
use crate::status::{AlarmStatus, ArmingStatus};
use crate::time::{Timestamp, now};

/// What happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    AlarmStatusChanged { status: AlarmStatus },
    ArmingStatusChanged { status: ArmingStatus },
    SensorStatusChanged { sensor_id: SensorId, active: bool },
    SensorAdded { sensor_id: SensorId },
    SensorRemoved { sensor_id: SensorId },
    CatDetected { image_id: ImageId, detected: bool },
}

/// A timestamped [`EventKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub kind: EventKind,
    pub timestamp: Timestamp,
}

impl Event {
    /// Record `kind` as happening now.
    #[must_use]
    pub fn new(kind: EventKind) -> Self {
        Self {
            id: EventId::new(),
            kind,
            timestamp: now(),
        }
    }
}
