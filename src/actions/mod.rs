//! Composable actions over a world state and device collaborators.
//!
//! An action is built by a factory, which captures configuration and
//! device handles without touching anything, and is later run with a
//! mutable world handle. The run is where effects happen: playback,
//! volume, LEDs, world mutations.
//!
//! # Key Concepts
//!
//! - **Deferred effects**: construction is pure, running is not
//! - **Explicit collaborators**: players and lighters are factory arguments,
//!   never globals
//! - **Composition**: [`chain`] runs actions in order and propagates the
//!   first failure

mod action;
mod error;
mod library;

pub use action::{Action, ActionFn};
pub use error::ActionError;
pub use library::{
    chain, do_nothing, higher_volume, increment_aphorism_count, light_leds, light_random_leds,
    lower_volume, play_random_music, play_random_speech, play_track, reset_aphorism_count,
    set_volume, stop_playing,
};
