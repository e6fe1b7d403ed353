//! Core installation types.
//!
//! This module contains the side-effect-free part of the controller:
//! - World state via the `WorldState` trait
//! - Sensor events and their substring classification
//! - Bounded event history
//! - Track and volume values
//!
//! Nothing here touches a device; effects live in `actions` and `devices`.

mod classifier;
mod event;
mod history;
mod track;
mod volume;
mod world;

pub use classifier::{EventClassifier, MatchRule};
pub use event::SensorEvent;
pub use history::{EventHistory, EventRecord, DEFAULT_HISTORY_CAPACITY};
pub use track::Track;
pub use volume::Volume;
pub use world::{InstallationState, WorldState};
