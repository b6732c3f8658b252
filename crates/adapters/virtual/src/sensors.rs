//! Simulated house sensors.

use catpoint_domain::error::CatpointError;
use catpoint_domain::sensor::{Sensor, SensorType};

const LAYOUT: [(&str, SensorType); 4] = [
    ("Front door", SensorType::Door),
    ("Back door", SensorType::Door),
    ("Living room window", SensorType::Window),
    ("Hallway motion", SensorType::Motion),
];

/// A fixed set of simulated sensors, all starting inactive.
pub struct VirtualSensors {
    sensors: Vec<Sensor>,
}

impl VirtualSensors {
    /// Build the default house layout.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a sensor descriptor is invalid.
    pub fn new() -> Result<Self, CatpointError> {
        let sensors = LAYOUT
            .iter()
            .map(|(name, sensor_type)| {
                Sensor::builder()
                    .name(*name)
                    .sensor_type(*sensor_type)
                    .build()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { sensors })
    }

    /// Sensors to register with the security service.
    #[must_use]
    pub fn discover(&self) -> Vec<Sensor> {
        self.sensors.clone()
    }

    /// Look a simulated sensor up by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Sensor> {
        self.sensors.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_provide_one_sensor_per_layout_entry() {
        let sensors = VirtualSensors::new().unwrap().discover();
        assert_eq!(sensors.len(), LAYOUT.len());
        assert!(sensors.iter().all(|s| !s.active));
    }

    #[test]
    fn should_cover_every_sensor_type() {
        let sensors = VirtualSensors::new().unwrap().discover();
        for kind in [SensorType::Door, SensorType::Window, SensorType::Motion] {
            assert!(sensors.iter().any(|s| s.sensor_type == kind), "{kind}");
        }
    }

    #[test]
    fn should_keep_ids_stable_between_discoveries() {
        let virtual_sensors = VirtualSensors::new().unwrap();
        let first: Vec<_> = virtual_sensors.discover().iter().map(|s| s.id).collect();
        let second: Vec<_> = virtual_sensors.discover().iter().map(|s| s.id).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn should_find_sensor_by_name() {
        let virtual_sensors = VirtualSensors::new().unwrap();
        let hallway = virtual_sensors.by_name("Hallway motion").unwrap();
        assert_eq!(hallway.sensor_type, SensorType::Motion);
        assert!(virtual_sensors.by_name("Garage").is_none());
    }
}
