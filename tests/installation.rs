//! End-to-end runs of the proximity installation with in-memory devices.

use pythia::config::{Config, LedMode};
use pythia::core::{SensorEvent, Track, Volume, WorldState};
use pythia::devices::{
    AudioPlayer, LedCall, LedLighter, PlayerCall, RecordingLeds, RecordingPlayer, ScriptedSensor,
};
use pythia::installation::{Devices, Installation};
use pythia::StepOutcome;
use std::sync::Arc;

struct Rig {
    player: Arc<RecordingPlayer>,
    leds: Arc<RecordingLeds>,
    devices: Devices,
}

fn rig() -> Rig {
    let player = Arc::new(RecordingPlayer::new());
    let leds = Arc::new(RecordingLeds::new());
    let devices = Devices {
        player: player.clone() as Arc<dyn AudioPlayer>,
        leds: leds.clone() as Arc<dyn LedLighter>,
    };
    Rig {
        player,
        leds,
        devices,
    }
}

fn songs() -> Vec<Track> {
    vec![Track::from("music/a.mp3"), Track::from("music/b.mp3")]
}

fn quiet_start() -> Config {
    let mut config = Config::default();
    config.audio.play_on_startup = false;
    config
}

#[test]
fn startup_plays_first_track_at_full_volume() {
    let rig = rig();
    let mut installation = Installation::assemble(
        &Config::default(),
        songs(),
        rig.devices.clone(),
        ScriptedSensor::default(),
    )
    .unwrap();

    installation.run().unwrap();

    let calls = rig.player.calls();
    assert_eq!(
        &calls[..3],
        &[
            PlayerCall::SetVolume(Volume::FULL),
            PlayerCall::Load(Track::from("music/a.mp3")),
            PlayerCall::Play,
        ]
    );
    // Playback is stopped when the sensor closes.
    assert_eq!(calls.last(), Some(&PlayerCall::Stop));
}

#[test]
fn near_plays_a_random_song_at_full_volume() {
    let rig = rig();
    let mut installation = Installation::assemble(
        &quiet_start(),
        songs(),
        rig.devices.clone(),
        ScriptedSensor::new(["isNear"]),
    )
    .unwrap();

    let outcome = installation.controller_mut().step().unwrap();

    assert_eq!(outcome, StepOutcome::Dispatched(SensorEvent::Near));
    assert_eq!(rig.player.volume(), Some(Volume::FULL));
    assert!(songs().contains(&rig.player.loaded().unwrap()));
    assert_eq!(rig.player.play_count(), 1);
    assert!(rig.leds.calls().is_empty());
}

#[test]
fn talking_and_silence_move_volume() {
    let rig = rig();
    let mut installation = Installation::assemble(
        &quiet_start(),
        songs(),
        rig.devices.clone(),
        ScriptedSensor::new(["talking", "silence"]),
    )
    .unwrap();

    installation.controller_mut().step().unwrap();
    assert_eq!(rig.player.volume(), Some(Volume::HUSHED));

    installation.controller_mut().step().unwrap();
    assert_eq!(rig.player.volume(), Some(Volume::FULL));
}

#[test]
fn overlapping_line_follows_rule_order() {
    let rig = rig();
    let mut installation = Installation::assemble(
        &quiet_start(),
        songs(),
        rig.devices.clone(),
        ScriptedSensor::new(["silence after talking"]),
    )
    .unwrap();

    let outcome = installation.controller_mut().step().unwrap();
    assert_eq!(outcome, StepOutcome::Dispatched(SensorEvent::Talking));
}

#[test]
fn led_groups_light_on_near() {
    let rig = rig();
    let mut config = quiet_start();
    config.leds.mode = LedMode::Groups;
    config.leds.groups = vec!["halo".to_string()];

    let mut installation = Installation::assemble(
        &config,
        songs(),
        rig.devices.clone(),
        ScriptedSensor::new(["isNear"]),
    )
    .unwrap();
    installation.run().unwrap();

    assert_eq!(
        rig.leds.calls(),
        vec![LedCall::Groups(vec!["halo".to_string()])]
    );
}

#[test]
fn random_leds_light_on_near() {
    let rig = rig();
    let mut config = quiet_start();
    config.leds.mode = LedMode::Random;

    let mut installation = Installation::assemble(
        &config,
        songs(),
        rig.devices.clone(),
        ScriptedSensor::new(["isNear", "isNear"]),
    )
    .unwrap();
    installation.run().unwrap();

    assert_eq!(rig.leds.calls(), vec![LedCall::Random, LedCall::Random]);
}

#[test]
fn noise_timeouts_and_device_failures_do_not_stop_the_run() {
    let rig = rig();
    rig.player.set_unavailable(true);

    let sensor = ScriptedSensor::new(["garbage", "isNear"])
        .with_timeout()
        .with_line("talking");
    let mut installation =
        Installation::assemble(&quiet_start(), songs(), rig.devices.clone(), sensor).unwrap();

    installation.run().unwrap();

    let history = installation.controller().history();
    assert_eq!(history.count(SensorEvent::Near), 1);
    assert_eq!(history.count(SensorEvent::Talking), 1);
    assert_eq!(installation.controller().world().aphorism_count(), 0);
}

#[test]
fn custom_rules_from_config() {
    let rig = rig();
    let config = Config::parse(
        r#"
        [sensor]
        read_timeout_secs = 1.0

        [[sensor.rules]]
        pattern = "PRESENCE"
        event = "near"

        [audio]
        play_on_startup = false
        "#,
    )
    .unwrap();

    let mut installation = Installation::assemble(
        &config,
        songs(),
        rig.devices.clone(),
        ScriptedSensor::new(["isNear", "PRESENCE=1"]),
    )
    .unwrap();

    let controller = installation.controller_mut();
    assert_eq!(
        controller.step().unwrap(),
        StepOutcome::Unrecognized("isNear".to_string())
    );
    assert_eq!(
        controller.step().unwrap(),
        StepOutcome::Dispatched(SensorEvent::Near)
    );
}
