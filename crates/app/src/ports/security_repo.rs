//! Security repository port — durable alarm, arming and sensor state.

use catpoint_domain::error::CatpointError;
use catpoint_domain::id::SensorId;
use catpoint_domain::sensor::Sensor;
use catpoint_domain::status::{AlarmStatus, ArmingStatus};

/// Store for the current statuses and the set of known sensors.
///
/// Sensors are unique by [`SensorId`]. Implementations must make every write
/// visible to the next read.
pub trait SecurityRepository {
    /// Current alarm status.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Storage`] if the state cannot be read.
    fn alarm_status(&self) -> Result<AlarmStatus, CatpointError>;

    /// Replace the alarm status.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Storage`] if the state cannot be written.
    fn set_alarm_status(&self, status: AlarmStatus) -> Result<(), CatpointError>;

    /// Current arming status.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Storage`] if the state cannot be read.
    fn arming_status(&self) -> Result<ArmingStatus, CatpointError>;

    /// Replace the arming status.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Storage`] if the state cannot be written.
    fn set_arming_status(&self, status: ArmingStatus) -> Result<(), CatpointError>;

    /// All known sensors, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Storage`] if the state cannot be read.
    fn sensors(&self) -> Result<Vec<Sensor>, CatpointError>;

    /// Register a sensor, replacing any sensor with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Storage`] if the state cannot be written.
    fn add_sensor(&self, sensor: Sensor) -> Result<(), CatpointError>;

    /// Unregister a sensor. Returns whether a sensor with this id existed;
    /// unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Storage`] if the state cannot be written.
    fn remove_sensor(&self, id: SensorId) -> Result<bool, CatpointError>;

    /// Persist the current state of an already registered sensor.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::NotFound`] if no sensor has this id, or
    /// [`CatpointError::Storage`] if the state cannot be written.
    fn update_sensor(&self, sensor: Sensor) -> Result<(), CatpointError>;
}

impl<T: SecurityRepository + ?Sized> SecurityRepository for std::sync::Arc<T> {
    fn alarm_status(&self) -> Result<AlarmStatus, CatpointError> {
        (**self).alarm_status()
    }

    fn set_alarm_status(&self, status: AlarmStatus) -> Result<(), CatpointError> {
        (**self).set_alarm_status(status)
    }

    fn arming_status(&self) -> Result<ArmingStatus, CatpointError> {
        (**self).arming_status()
    }

    fn set_arming_status(&self, status: ArmingStatus) -> Result<(), CatpointError> {
        (**self).set_arming_status(status)
    }

    fn sensors(&self) -> Result<Vec<Sensor>, CatpointError> {
        (**self).sensors()
    }

    fn add_sensor(&self, sensor: Sensor) -> Result<(), CatpointError> {
        (**self).add_sensor(sensor)
    }

    fn remove_sensor(&self, id: SensorId) -> Result<bool, CatpointError> {
        (**self).remove_sensor(id)
    }

    fn update_sensor(&self, sensor: Sensor) -> Result<(), CatpointError> {
        (**self).update_sensor(sensor)
    }
}
