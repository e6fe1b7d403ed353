//! Pythia: an interactive installation controller
//!
//! A serial sensor reports when visitors come near, start talking or fall
//! silent. Pythia turns those reports into events and reacts with music,
//! volume changes and LED lighting.
//!
//! The heart of the crate is a small action vocabulary: factories capture
//! their configuration and device handles without doing anything, and the
//! resulting actions run later against a world state.
//!
//! # Core Concepts
//!
//! - **World state**: mutable host state handed to every action
//! - **Actions**: deferred effects built by side-effect-free factories
//! - **Devices**: audio player, LED lighter and sensor behind traits
//! - **Controller**: the read, classify, react loop
//!
//! # Example
//!
//! ```rust
//! use pythia::actions::{play_random_speech, set_volume};
//! use pythia::builder::ControllerBuilder;
//! use pythia::core::{InstallationState, SensorEvent, Track, Volume};
//! use pythia::devices::{AudioPlayer, RecordingPlayer, ScriptedSensor};
//! use std::sync::Arc;
//!
//! let player = Arc::new(RecordingPlayer::new());
//! let handle: Arc<dyn AudioPlayer> = player.clone();
//!
//! let mut controller = ControllerBuilder::new()
//!     .world(InstallationState::new())
//!     .sensor(ScriptedSensor::new(["isNear", "talking"]))
//!     .on(SensorEvent::Near, play_random_speech(handle.clone(), vec![Track::from("music/a.mp3")]))
//!     .on(SensorEvent::Talking, set_volume(handle, Volume::HUSHED))
//!     .build()
//!     .unwrap();
//!
//! controller.run().unwrap();
//!
//! assert_eq!(player.loaded(), Some(Track::from("music/a.mp3")));
//! assert_eq!(player.volume(), Some(Volume::HUSHED));
//! ```

pub mod actions;
pub mod assets;
pub mod builder;
pub mod config;
pub mod controller;
pub mod core;
pub mod devices;
pub mod error;
pub mod installation;

// Re-export commonly used types
pub use actions::{Action, ActionError};
pub use config::Config;
pub use controller::{Controller, StepOutcome};
pub use crate::core::{InstallationState, SensorEvent, Track, Volume, WorldState};
pub use error::Error;
