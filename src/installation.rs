//! The proximity installation: configuration and devices wired into a
//! controller.
//!
//! Reactions:
//! - a visitor comes near: full volume, a random track from the music
//!   folder, and the configured LED response
//! - talking: volume drops to the talking level
//! - silence: volume returns to full
//!
//! When enabled, the first track (by path) plays as soon as the loop starts.

use crate::actions::{
    do_nothing, light_leds, light_random_leds, play_random_speech, play_track, set_volume, Action,
};
use crate::builder::ControllerBuilder;
use crate::config::{Config, LedMode};
use crate::controller::Controller;
use crate::core::{InstallationState, SensorEvent, Track};
use crate::devices::{
    AudioPlayer, LedLighter, LineSensor, LoggingLedLighter, LoggingPlayer, Mpg123Player,
    SensorLine,
};
use crate::error::Error;
use std::sync::Arc;

/// Device handles shared by the installation's actions.
#[derive(Clone)]
pub struct Devices {
    pub player: Arc<dyn AudioPlayer>,
    pub leds: Arc<dyn LedLighter>,
}

impl Devices {
    /// Open the configured devices. `dry_run` replaces the audio backend
    /// with one that only logs.
    pub fn open(config: &Config, dry_run: bool) -> Result<Self, Error> {
        let player: Arc<dyn AudioPlayer> = if dry_run {
            tracing::info!("dry run: audio commands are logged, not played");
            Arc::new(LoggingPlayer::new())
        } else {
            Arc::new(Mpg123Player::spawn_with(&config.audio.player)?)
        };
        let leds: Arc<dyn LedLighter> = Arc::new(LoggingLedLighter::new(config.leds.groups.clone()));

        Ok(Self { player, leds })
    }
}

/// Open the configured sensor port, or stdin when the port is `-`.
pub fn open_sensor(config: &Config) -> Result<LineSensor, Error> {
    let sensor = if config.sensor.reads_stdin() {
        LineSensor::from_reader(std::io::stdin(), "stdin")?
    } else {
        LineSensor::open(&config.sensor.port, config.sensor.baud_rate)?
    };
    Ok(sensor)
}

/// A controller together with the devices its actions drive.
pub struct Installation<S> {
    controller: Controller<InstallationState, S>,
    devices: Devices,
}

impl<S: SensorLine> Installation<S> {
    /// Wire `config` into a controller. `tracks` must not be empty.
    pub fn assemble(
        config: &Config,
        tracks: Vec<Track>,
        devices: Devices,
        sensor: S,
    ) -> Result<Self, Error> {
        let player = Arc::clone(&devices.player);
        let full = config.audio.full_volume();

        let near = crate::chain![
            set_volume(Arc::clone(&player), full),
            play_random_speech(Arc::clone(&player), tracks.clone()),
            led_response(config, Arc::clone(&devices.leds)),
        ];

        let mut builder = ControllerBuilder::new()
            .world(InstallationState::new())
            .sensor(sensor)
            .rules(config.sensor.rules.clone())
            .read_timeout(config.sensor.read_timeout())
            .history_capacity(config.history_capacity)
            .on(SensorEvent::Near, near)
            .on(
                SensorEvent::Talking,
                set_volume(Arc::clone(&player), config.audio.talking_volume()),
            )
            .on(SensorEvent::Silence, set_volume(Arc::clone(&player), full));

        if config.audio.play_on_startup {
            if let Some(first) = tracks.first() {
                builder = builder.startup(crate::chain![
                    set_volume(Arc::clone(&player), full),
                    play_track(Arc::clone(&player), first.clone()),
                ]);
            }
        }

        Ok(Self {
            controller: builder.build()?,
            devices,
        })
    }

    /// Run until the sensor closes, then stop playback.
    pub fn run(&mut self) -> Result<(), Error> {
        let result = self.controller.run();
        if let Err(err) = self.devices.player.stop() {
            tracing::warn!(error = %err, "failed to stop playback");
        }
        Ok(result?)
    }

    pub fn controller(&self) -> &Controller<InstallationState, S> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<InstallationState, S> {
        &mut self.controller
    }
}

fn led_response(config: &Config, leds: Arc<dyn LedLighter>) -> Action<InstallationState> {
    match config.leds.mode {
        LedMode::Off => do_nothing(),
        LedMode::Random => light_random_leds(leds),
        LedMode::Groups => light_leds(leds, config.leds.groups.clone()),
    }
}
