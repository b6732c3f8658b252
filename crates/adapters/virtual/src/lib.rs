//! # catpoint-adapter-virtual
//!
//! Virtual/demo adapter that stands in for the camera classifier and the
//! physical sensors, for testing and demonstration purposes.
//!
//! ## Provided devices
//!
//! | Device | Behaviour |
//! |--------|-----------|
//! | [`VirtualCatClassifier`] | Replays scripted confidence scores, one per frame |
//! | [`VirtualSensors`] | A fixed house layout: two doors, a window, a motion detector |
//!
//! ## Dependency rule
//!
//! Depends on `catpoint-app` (port traits) and `catpoint-domain` only.

mod classifier;
mod sensors;

pub use classifier::{ClassifierError, VirtualCatClassifier};
pub use sensors::VirtualSensors;
