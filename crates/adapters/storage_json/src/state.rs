//! On-disk state document.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use catpoint_domain::id::SensorId;
use catpoint_domain::sensor::Sensor;
use catpoint_domain::status::{AlarmStatus, ArmingStatus};

/// In-memory mirror of the state file.
#[derive(Debug, Clone, Default)]
pub(crate) struct State {
    pub alarm_status: AlarmStatus,
    pub arming_status: ArmingStatus,
    pub sensors: HashMap<SensorId, Sensor>,
}

/// Serialized form; sensors are stored as a list sorted for stable diffs.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct Document {
    alarm_status: AlarmStatus,
    arming_status: ArmingStatus,
    sensors: Vec<Sensor>,
}

impl State {
    pub(crate) fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let doc: Document = serde_json::from_str(content)?;
        Ok(Self {
            alarm_status: doc.alarm_status,
            arming_status: doc.arming_status,
            sensors: doc.sensors.into_iter().map(|s| (s.id, s)).collect(),
        })
    }

    pub(crate) fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut sensors: Vec<Sensor> = self.sensors.values().cloned().collect();
        sensors.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        serde_json::to_string_pretty(&Document {
            alarm_status: self.alarm_status,
            arming_status: self.arming_status,
            sensors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_fill_missing_fields_with_defaults() {
        let state = State::from_json("{}").unwrap();
        assert_eq!(state.alarm_status, AlarmStatus::NoAlarm);
        assert_eq!(state.arming_status, ArmingStatus::Disarmed);
        assert!(state.sensors.is_empty());
    }

    #[test]
    fn should_keep_last_sensor_when_ids_repeat() {
        let first = Sensor::builder().name("Door").build().unwrap();
        let mut second = first.clone();
        second.active = true;
        let json = serde_json::json!({
            "sensors": [&first, &second],
        })
        .to_string();

        let state = State::from_json(&json).unwrap();

        assert_eq!(state.sensors.len(), 1);
        assert!(state.sensors[&first.id].active);
    }

    #[test]
    fn should_write_snake_case_statuses() {
        let state = State {
            alarm_status: AlarmStatus::PendingAlarm,
            arming_status: ArmingStatus::ArmedHome,
            sensors: HashMap::new(),
        };
        let json = state.to_json().unwrap();
        assert!(json.contains("\"pending_alarm\""));
        assert!(json.contains("\"armed_home\""));
    }

    #[test]
    fn should_reject_unknown_status() {
        assert!(State::from_json(r#"{"alarm_status": "panic"}"#).is_err());
    }
}
