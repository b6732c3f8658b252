//! # catpoint-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `SecurityRepository` — alarm status, arming status and the sensor set
//!   - `ImageClassifier` — decides whether a camera frame shows a cat
//!   - `EventPublisher` — fan-out of status-change events
//! - Define the **driving/inbound** use-case: `SecurityService`, the alarm
//!   decision engine
//! - Provide **in-process infrastructure** (event bus, configuration loading)
//!   that doesn't need adapters
//!
//! ## Dependency rule
//! Depends on `catpoint-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod config;
pub mod event_bus;
pub mod ports;
pub mod services;
