//! End-to-end tests for the alarm engine on top of the JSON repository.
//!
//! Each test wires the real repository (in a temporary directory), the
//! virtual classifier and sensors, and the in-process event bus into a
//! `SecurityService`.

use std::path::Path;
use std::sync::Arc;

use catpoint_adapter_storage_json::{Config, JsonSecurityRepository};
use catpoint_adapter_virtual::{VirtualCatClassifier, VirtualSensors};
use catpoint_app::config::SecurityConfig;
use catpoint_app::event_bus::InProcessEventBus;
use catpoint_app::services::security_service::SecurityService;
use catpoint_domain::event::EventKind;
use catpoint_domain::image::Image;
use catpoint_domain::status::{AlarmStatus, ArmingStatus};

type Service = SecurityService<
    JsonSecurityRepository,
    Arc<VirtualCatClassifier>,
    Arc<InProcessEventBus>,
>;

struct Setup {
    svc: Service,
    classifier: Arc<VirtualCatClassifier>,
    bus: Arc<InProcessEventBus>,
    sensors: VirtualSensors,
}

fn setup(path: &Path, sensors: VirtualSensors) -> Setup {
    let repo = Config {
        path: path.to_path_buf(),
    }
    .build()
    .expect("state file should open");
    let classifier = Arc::new(VirtualCatClassifier::default());
    let bus = Arc::new(InProcessEventBus::new(64));
    let svc = SecurityService::new(
        repo,
        Arc::clone(&classifier),
        Arc::clone(&bus),
        SecurityConfig::default(),
    );
    Setup {
        svc,
        classifier,
        bus,
        sensors,
    }
}

fn fresh(path: &Path) -> Setup {
    let setup = setup(path, VirtualSensors::new().unwrap());
    for sensor in setup.sensors.discover() {
        setup.svc.add_sensor(sensor).unwrap();
    }
    setup
}

fn frame() -> Image {
    Image::from_bytes(vec![0x42; 32])
}

// ---------------------------------------------------------------------------
// Sensor escalation
// ---------------------------------------------------------------------------

#[test]
fn should_escalate_to_alarm_when_two_sensors_trip_while_armed_away() {
    let dir = tempfile::tempdir().unwrap();
    let s = fresh(&dir.path().join("state.json"));
    let front = s.sensors.by_name("Front door").unwrap().id;
    let window = s.sensors.by_name("Living room window").unwrap().id;

    s.svc.set_arming_status(ArmingStatus::ArmedAway).unwrap();
    s.svc.change_sensor_activation_status(front, true).unwrap();
    assert_eq!(s.svc.alarm_status().unwrap(), AlarmStatus::PendingAlarm);

    s.svc.change_sensor_activation_status(window, true).unwrap();
    assert_eq!(s.svc.alarm_status().unwrap(), AlarmStatus::Alarm);

    // sensor churn does not clear a ringing alarm
    s.svc.change_sensor_activation_status(front, false).unwrap();
    s.svc.change_sensor_activation_status(window, false).unwrap();
    assert_eq!(s.svc.alarm_status().unwrap(), AlarmStatus::Alarm);

    s.svc.set_arming_status(ArmingStatus::Disarmed).unwrap();
    assert_eq!(s.svc.alarm_status().unwrap(), AlarmStatus::NoAlarm);
}

#[test]
fn should_clear_pending_alarm_when_last_sensor_closes() {
    let dir = tempfile::tempdir().unwrap();
    let s = fresh(&dir.path().join("state.json"));
    let front = s.sensors.by_name("Front door").unwrap().id;

    s.svc.set_arming_status(ArmingStatus::ArmedHome).unwrap();
    s.svc.change_sensor_activation_status(front, true).unwrap();
    s.svc.change_sensor_activation_status(front, false).unwrap();

    assert_eq!(s.svc.alarm_status().unwrap(), AlarmStatus::NoAlarm);
}

#[test]
fn should_reset_sensors_when_arming() {
    let dir = tempfile::tempdir().unwrap();
    let s = fresh(&dir.path().join("state.json"));
    let back = s.sensors.by_name("Back door").unwrap().id;

    s.svc.change_sensor_activation_status(back, true).unwrap();
    assert_eq!(s.svc.alarm_status().unwrap(), AlarmStatus::NoAlarm);

    s.svc.set_arming_status(ArmingStatus::ArmedHome).unwrap();

    assert!(s.svc.sensors().unwrap().iter().all(|sensor| !sensor.active));
    assert_eq!(s.svc.alarm_status().unwrap(), AlarmStatus::NoAlarm);
}

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

#[test]
fn should_ring_alarm_when_cat_seen_while_armed_home() {
    let dir = tempfile::tempdir().unwrap();
    let s = fresh(&dir.path().join("state.json"));
    s.svc.set_arming_status(ArmingStatus::ArmedHome).unwrap();
    s.classifier.push_scores([0.93]).unwrap();

    s.svc.process_image(&frame()).unwrap();

    assert_eq!(s.svc.alarm_status().unwrap(), AlarmStatus::Alarm);
}

#[test]
fn should_clear_alarm_when_cat_leaves_and_no_sensor_active() {
    let dir = tempfile::tempdir().unwrap();
    let s = fresh(&dir.path().join("state.json"));
    s.svc.set_arming_status(ArmingStatus::ArmedHome).unwrap();
    s.classifier.push_scores([0.93, 0.02]).unwrap();

    s.svc.process_image(&frame()).unwrap();
    s.svc.process_image(&frame()).unwrap();

    assert_eq!(s.svc.alarm_status().unwrap(), AlarmStatus::NoAlarm);
}

#[test]
fn should_keep_alarm_when_cat_leaves_but_sensor_active() {
    let dir = tempfile::tempdir().unwrap();
    let s = fresh(&dir.path().join("state.json"));
    let hallway = s.sensors.by_name("Hallway motion").unwrap().id;
    s.svc.set_arming_status(ArmingStatus::ArmedHome).unwrap();
    s.classifier.push_scores([0.93, 0.02]).unwrap();

    s.svc.process_image(&frame()).unwrap();
    s.svc.change_sensor_activation_status(hallway, true).unwrap();
    s.svc.process_image(&frame()).unwrap();

    assert_eq!(s.svc.alarm_status().unwrap(), AlarmStatus::Alarm);
}

#[test]
fn should_ignore_cat_while_armed_away() {
    let dir = tempfile::tempdir().unwrap();
    let s = fresh(&dir.path().join("state.json"));
    s.svc.set_arming_status(ArmingStatus::ArmedAway).unwrap();
    s.classifier.push_scores([0.99]).unwrap();

    s.svc.process_image(&frame()).unwrap();

    assert_eq!(s.svc.alarm_status().unwrap(), AlarmStatus::NoAlarm);
}

// ---------------------------------------------------------------------------
// Persistence and events
// ---------------------------------------------------------------------------

#[test]
fn should_restore_state_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let sensors = VirtualSensors::new().unwrap();
    let front = sensors.by_name("Front door").unwrap().id;
    {
        let s = setup(&path, sensors);
        for sensor in s.sensors.discover() {
            s.svc.add_sensor(sensor).unwrap();
        }
        s.svc.set_arming_status(ArmingStatus::ArmedHome).unwrap();
        s.svc.change_sensor_activation_status(front, true).unwrap();
    }

    let restarted = setup(&path, VirtualSensors::new().unwrap());

    assert_eq!(restarted.svc.arming_status().unwrap(), ArmingStatus::ArmedHome);
    assert_eq!(restarted.svc.alarm_status().unwrap(), AlarmStatus::PendingAlarm);
    let sensors = restarted.svc.sensors().unwrap();
    assert_eq!(sensors.len(), 4);
    assert!(sensors.iter().any(|s| s.id == front && s.active));

    // the restored pending alarm escalates on the next trigger
    restarted
        .svc
        .change_sensor_activation_status(front, true)
        .unwrap();
    assert_eq!(restarted.svc.alarm_status().unwrap(), AlarmStatus::Alarm);
}

#[test]
fn should_publish_alarm_transitions_on_bus() {
    let dir = tempfile::tempdir().unwrap();
    let s = fresh(&dir.path().join("state.json"));
    let front = s.sensors.by_name("Front door").unwrap().id;
    s.svc.set_arming_status(ArmingStatus::ArmedAway).unwrap();
    let mut rx = s.bus.subscribe();

    s.svc.change_sensor_activation_status(front, true).unwrap();
    s.svc.set_arming_status(ArmingStatus::Disarmed).unwrap();

    let mut alarm_changes = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let EventKind::AlarmStatusChanged { status } = event.kind {
            alarm_changes.push(status);
        }
    }
    assert_eq!(
        alarm_changes,
        vec![AlarmStatus::PendingAlarm, AlarmStatus::NoAlarm]
    );
}
