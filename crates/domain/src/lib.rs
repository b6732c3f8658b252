//! # catpoint-domain
//!
//! Pure domain model for the catpoint home security controller.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **statuses** (alarm escalation level, arming mode)
//! - Define **Sensors** (door, window and motion devices with an activation flag)
//! - Define **Images** (opaque camera frames handed to the classifier)
//! - Define **Events** (status-change records)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod event;
pub mod image;
pub mod sensor;
pub mod status;
