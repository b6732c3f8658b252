//! Security service — the alarm decision engine.
//!
//! Derives the [`AlarmStatus`] from sensor activity, camera frames and the
//! arming mode, and keeps the repository in sync. Every operation runs to
//! completion against the repository before returning; callers serialize
//! access when sharing a service between threads.

use catpoint_domain::error::{CatpointError, NotFoundError};
use catpoint_domain::event::{Event, EventKind};
use catpoint_domain::id::SensorId;
use catpoint_domain::image::Image;
use catpoint_domain::sensor::Sensor;
use catpoint_domain::status::{AlarmStatus, ArmingStatus};

use crate::config::SecurityConfig;
use crate::ports::{EventPublisher, ImageClassifier, SecurityRepository};

/// Application service owning all alarm-status transitions.
pub struct SecurityService<R, C, P> {
    repo: R,
    classifier: C,
    publisher: P,
    config: SecurityConfig,
}

impl<R, C, P> SecurityService<R, C, P>
where
    R: SecurityRepository,
    C: ImageClassifier,
    P: EventPublisher,
{
    /// Create a new service.
    pub fn new(repo: R, classifier: C, publisher: P, config: SecurityConfig) -> Self {
        Self {
            repo,
            classifier,
            publisher,
            config,
        }
    }

    /// Current alarm status.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub fn alarm_status(&self) -> Result<AlarmStatus, CatpointError> {
        self.repo.alarm_status()
    }

    /// Current arming status.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub fn arming_status(&self) -> Result<ArmingStatus, CatpointError> {
        self.repo.arming_status()
    }

    /// All sensors, ordered by name, then type, then id.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub fn sensors(&self) -> Result<Vec<Sensor>, CatpointError> {
        let mut sensors = self.repo.sensors()?;
        sensors.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        Ok(sensors)
    }

    /// Register a new sensor after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, sensor), fields(sensor_name = %sensor.name))]
    pub fn add_sensor(&self, sensor: Sensor) -> Result<(), CatpointError> {
        sensor.validate()?;
        let sensor_id = sensor.id;
        self.repo.add_sensor(sensor)?;
        self.publish(EventKind::SensorAdded { sensor_id });
        Ok(())
    }

    /// Unregister a sensor. Removing an unknown sensor is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub fn remove_sensor(&self, sensor_id: SensorId) -> Result<(), CatpointError> {
        if self.repo.remove_sensor(sensor_id)? {
            self.publish(EventKind::SensorRemoved { sensor_id });
        } else {
            tracing::debug!("sensor not registered, nothing to remove");
        }
        Ok(())
    }

    /// Record a sensor turning on or off and escalate or clear the alarm.
    ///
    /// While the alarm is ringing only the sensor flag changes. Otherwise a
    /// fresh activation on an armed system escalates one step, a repeated
    /// activation while pending escalates to [`AlarmStatus::Alarm`], and the
    /// last active sensor turning off clears a pending alarm.
    ///
    /// # Errors
    ///
    /// Returns [`CatpointError::NotFound`] when no sensor has `sensor_id`, or
    /// a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub fn change_sensor_activation_status(
        &self,
        sensor_id: SensorId,
        active: bool,
    ) -> Result<(), CatpointError> {
        let alarm = self.repo.alarm_status()?;
        let sensors = self.repo.sensors()?;
        let mut sensor = sensors
            .iter()
            .find(|s| s.id == sensor_id)
            .cloned()
            .ok_or_else(|| NotFoundError {
                entity: "Sensor",
                id: sensor_id.to_string(),
            })?;

        let next = if alarm == AlarmStatus::Alarm {
            None
        } else {
            match (sensor.active, active) {
                (false, true) => {
                    if self.repo.arming_status()?.is_armed() {
                        Some(alarm.escalate())
                    } else {
                        None
                    }
                }
                (true, true) => {
                    if alarm == AlarmStatus::PendingAlarm && self.repo.arming_status()?.is_armed()
                    {
                        Some(AlarmStatus::Alarm)
                    } else {
                        None
                    }
                }
                (true, false) => {
                    let others_active = sensors.iter().any(|s| s.id != sensor_id && s.active);
                    if alarm == AlarmStatus::PendingAlarm && !others_active {
                        Some(AlarmStatus::NoAlarm)
                    } else {
                        None
                    }
                }
                (false, false) => None,
            }
        };

        tracing::debug!(was_active = sensor.active, active, %alarm, ?next, "sensor activation");

        sensor.active = active;
        self.repo.update_sensor(sensor)?;
        self.publish(EventKind::SensorStatusChanged { sensor_id, active });

        if let Some(status) = next {
            self.set_alarm_status(status)?;
        }
        Ok(())
    }

    /// Classify a camera frame and react to a cat sighting.
    ///
    /// A cat while armed-home always rings the alarm. A frame without a cat
    /// clears the alarm only when no sensor is active. Sensors are never
    /// touched.
    ///
    /// # Errors
    ///
    /// Returns a classifier error, or a storage error from the repository.
    #[tracing::instrument(skip(self, image), fields(image_id = %image.id()))]
    pub fn process_image(&self, image: &Image) -> Result<(), CatpointError> {
        let detected = self
            .classifier
            .contains_cat(image, self.config.cat_confidence_threshold)?;
        tracing::debug!(
            detected,
            threshold = self.config.cat_confidence_threshold,
            "image classified"
        );
        self.publish(EventKind::CatDetected {
            image_id: image.id(),
            detected,
        });

        if detected {
            if self.repo.arming_status()? == ArmingStatus::ArmedHome {
                self.set_alarm_status(AlarmStatus::Alarm)?;
            }
        } else if !self.repo.sensors()?.iter().any(|s| s.active) {
            self.set_alarm_status(AlarmStatus::NoAlarm)?;
        }
        Ok(())
    }

    /// Change the arming mode.
    ///
    /// Disarming clears any alarm. Arming resets every sensor to inactive,
    /// one repository update per sensor, without touching the alarm status.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub fn set_arming_status(&self, status: ArmingStatus) -> Result<(), CatpointError> {
        self.repo.set_arming_status(status)?;
        tracing::info!(%status, "arming status changed");
        self.publish(EventKind::ArmingStatusChanged { status });

        if status.is_armed() {
            for mut sensor in self.repo.sensors()? {
                let was_active = sensor.active;
                sensor.active = false;
                let sensor_id = sensor.id;
                self.repo.update_sensor(sensor)?;
                if was_active {
                    self.publish(EventKind::SensorStatusChanged {
                        sensor_id,
                        active: false,
                    });
                }
            }
        } else {
            self.set_alarm_status(AlarmStatus::NoAlarm)?;
        }
        Ok(())
    }

    fn set_alarm_status(&self, status: AlarmStatus) -> Result<(), CatpointError> {
        self.repo.set_alarm_status(status)?;
        tracing::info!(%status, "alarm status changed");
        self.publish(EventKind::AlarmStatusChanged { status });
        Ok(())
    }

    fn publish(&self, kind: EventKind) {
        if let Err(err) = self.publisher.publish(Event::new(kind)) {
            tracing::warn!(%err, "failed to publish security event");
        }
    }
}
