//! JSON-file implementation of [`SecurityRepository`].

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use catpoint_app::ports::SecurityRepository;
use catpoint_domain::error::{CatpointError, NotFoundError};
use catpoint_domain::id::SensorId;
use catpoint_domain::sensor::Sensor;
use catpoint_domain::status::{AlarmStatus, ArmingStatus};

use crate::error::StorageError;
use crate::state::State;

/// File-backed security repository.
///
/// Reads are served from memory. Every write produces the next state, stores
/// it to disk through a temporary file + rename, and only then replaces the
/// in-memory copy, so memory and file never disagree after a failed write.
pub struct JsonSecurityRepository {
    path: PathBuf,
    state: Mutex<State>,
}

impl JsonSecurityRepository {
    /// Load the repository from `path`.
    ///
    /// A missing file yields a disarmed system with no alarm and no sensors;
    /// the file is created on the first write.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file exists but cannot be read or is
    /// not a valid state document.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let state = match std::fs::read_to_string(&path) {
            Ok(content) => State::from_json(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no state file, starting fresh");
                State::default()
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, StorageError> {
        self.state.lock().map_err(|_| StorageError::LockPoisoned)
    }

    fn read<T>(&self, f: impl FnOnce(&State) -> T) -> Result<T, CatpointError> {
        let guard = self.lock()?;
        Ok(f(&guard))
    }

    fn write(
        &self,
        f: impl FnOnce(&mut State) -> Result<(), CatpointError>,
    ) -> Result<(), CatpointError> {
        let mut guard = self.lock()?;
        let mut next = guard.clone();
        f(&mut next)?;
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }

    fn persist(&self, state: &State) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, state.to_json()?)?;
        std::fs::rename(&tmp, &self.path)?;
        tracing::trace!(path = %self.path.display(), "state file written");
        Ok(())
    }
}

impl SecurityRepository for JsonSecurityRepository {
    fn alarm_status(&self) -> Result<AlarmStatus, CatpointError> {
        self.read(|state| state.alarm_status)
    }

    fn set_alarm_status(&self, status: AlarmStatus) -> Result<(), CatpointError> {
        self.write(|state| {
            state.alarm_status = status;
            Ok(())
        })
    }

    fn arming_status(&self) -> Result<ArmingStatus, CatpointError> {
        self.read(|state| state.arming_status)
    }

    fn set_arming_status(&self, status: ArmingStatus) -> Result<(), CatpointError> {
        self.write(|state| {
            state.arming_status = status;
            Ok(())
        })
    }

    fn sensors(&self) -> Result<Vec<Sensor>, CatpointError> {
        self.read(|state| state.sensors.values().cloned().collect())
    }

    fn add_sensor(&self, sensor: Sensor) -> Result<(), CatpointError> {
        self.write(|state| {
            state.sensors.insert(sensor.id, sensor);
            Ok(())
        })
    }

    fn remove_sensor(&self, id: SensorId) -> Result<bool, CatpointError> {
        if !self.read(|state| state.sensors.contains_key(&id))? {
            return Ok(false);
        }
        self.write(|state| {
            state.sensors.remove(&id);
            Ok(())
        })?;
        Ok(true)
    }

    fn update_sensor(&self, sensor: Sensor) -> Result<(), CatpointError> {
        self.write(|state| match state.sensors.get_mut(&sensor.id) {
            Some(slot) => {
                *slot = sensor;
                Ok(())
            }
            None => Err(NotFoundError {
                entity: "Sensor",
                id: sensor.id.to_string(),
            }
            .into()),
        })
    }
}
