//! World state shared by every action.
//!
//! The world is owned by the host application and handed to actions by
//! mutable reference at invocation time. Actions never create or drop it;
//! they only go through the methods published here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mutable handle that actions observe and update.
///
/// # Example
///
/// ```rust
/// use pythia::core::{InstallationState, WorldState};
///
/// let mut world = InstallationState::new();
/// world.aphorism_played();
/// world.aphorism_played();
/// assert_eq!(world.aphorism_count(), 2);
///
/// world.reset_aphorism_count();
/// assert_eq!(world.aphorism_count(), 0);
/// ```
pub trait WorldState {
    /// Record that one more aphorism has been played.
    fn aphorism_played(&mut self);

    /// Zero the aphorism counter.
    fn reset_aphorism_count(&mut self);

    /// Number of aphorisms played since the last reset.
    fn aphorism_count(&self) -> usize;
}

/// World state of a running installation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InstallationState {
    aphorisms: usize,
    last_aphorism_at: Option<DateTime<Utc>>,
}

impl InstallationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// When the most recent aphorism was played, if any since startup.
    ///
    /// Resetting the counter does not forget this timestamp.
    pub fn last_aphorism_at(&self) -> Option<DateTime<Utc>> {
        self.last_aphorism_at
    }
}

impl WorldState for InstallationState {
    fn aphorism_played(&mut self) {
        self.aphorisms += 1;
        self.last_aphorism_at = Some(Utc::now());
    }

    fn reset_aphorism_count(&mut self) {
        self.aphorisms = 0;
    }

    fn aphorism_count(&self) -> usize {
        self.aphorisms
    }
}
