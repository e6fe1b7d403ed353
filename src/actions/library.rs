//! Action factories.
//!
//! Every factory captures its configuration and device handles and returns
//! an [`Action`]; nothing happens until the action is run. Factories that
//! pick at random fail at run time with [`ActionError::EmptySelection`]
//! when given nothing to pick from.

use super::action::Action;
use super::error::ActionError;
use crate::core::{Track, Volume, WorldState};
use crate::devices::{lock, AudioPlayer, LedLighter};
use rand::seq::SliceRandom;
use std::sync::{Arc, Mutex};

/// Run `actions` in order against the same world.
///
/// Each action observes the mutations of those before it. The first
/// failure stops the chain and is returned.
///
/// ```rust
/// use pythia::actions::{chain, Action};
///
/// let push = |tag: &'static str| {
///     Action::new(tag, move |log: &mut Vec<&'static str>| {
///         log.push(tag);
///         Ok(())
///     })
/// };
///
/// let mut log = Vec::new();
/// chain(vec![push("a"), push("b"), push("c")]).run(&mut log).unwrap();
/// assert_eq!(log, ["a", "b", "c"]);
/// ```
pub fn chain<W: 'static>(actions: impl IntoIterator<Item = Action<W>>) -> Action<W> {
    let actions: Vec<Action<W>> = actions.into_iter().collect();
    let names: Vec<&str> = actions.iter().map(Action::name).collect();
    let name = format!("chain({})", names.join(", "));

    Action::new(name, move |world: &mut W| {
        for action in &actions {
            action.run(world)?;
        }
        Ok(())
    })
}

/// Shuffle the captured music and keep it flowing.
///
/// Every run reshuffles the list the action owns. When the player is idle
/// one track is picked at random and started. Afterwards the whole list is
/// queued in its new order, the started track included.
pub fn play_random_music<W: 'static>(
    player: Arc<dyn AudioPlayer>,
    tracks: Vec<Track>,
) -> Action<W> {
    let tracks = Mutex::new(tracks);

    Action::new("play_random_music", move |_: &mut W| {
        let mut tracks = lock(&tracks);
        if tracks.is_empty() {
            return Err(ActionError::EmptySelection {
                action: "play_random_music",
            });
        }

        let mut rng = rand::thread_rng();
        tracks.shuffle(&mut rng);

        if !player.is_busy() {
            if let Some(track) = tracks.choose(&mut rng) {
                player.load(track)?;
                player.play()?;
                tracing::info!(track = %track.file_name(), "playing music");
            }
        }

        for track in tracks.iter() {
            player.queue(track)?;
        }
        tracing::debug!(queued = tracks.len(), "music queued");
        Ok(())
    })
}

/// Start one of `speeches` at random, interrupting whatever is playing.
pub fn play_random_speech<W: 'static>(
    player: Arc<dyn AudioPlayer>,
    speeches: Vec<Track>,
) -> Action<W> {
    Action::new("play_random_speech", move |_: &mut W| {
        let speech = speeches
            .choose(&mut rand::thread_rng())
            .ok_or(ActionError::EmptySelection {
                action: "play_random_speech",
            })?;
        player.load(speech)?;
        player.play()?;
        tracing::info!(track = %speech.file_name(), "playing speech");
        Ok(())
    })
}

/// Start a fixed track, interrupting whatever is playing.
pub fn play_track<W: 'static>(player: Arc<dyn AudioPlayer>, track: Track) -> Action<W> {
    Action::new(format!("play_track({})", track.file_name()), move |_: &mut W| {
        player.load(&track)?;
        player.play()?;
        tracing::info!(track = %track.file_name(), "playing track");
        Ok(())
    })
}

pub fn set_volume<W: 'static>(player: Arc<dyn AudioPlayer>, volume: Volume) -> Action<W> {
    volume_action(format!("set_volume({volume})"), player, volume)
}

/// Drop the volume to 30%.
pub fn lower_volume<W: 'static>(player: Arc<dyn AudioPlayer>) -> Action<W> {
    volume_action("lower_volume".to_string(), player, Volume::QUIET)
}

/// Raise the volume to 100%.
pub fn higher_volume<W: 'static>(player: Arc<dyn AudioPlayer>) -> Action<W> {
    volume_action("higher_volume".to_string(), player, Volume::FULL)
}

fn volume_action<W: 'static>(
    name: String,
    player: Arc<dyn AudioPlayer>,
    volume: Volume,
) -> Action<W> {
    Action::new(name, move |_: &mut W| {
        player.set_volume(volume)?;
        tracing::debug!(%volume, "volume set");
        Ok(())
    })
}

pub fn stop_playing<W: 'static>(player: Arc<dyn AudioPlayer>) -> Action<W> {
    Action::new("stop_playing", move |_: &mut W| {
        player.stop()?;
        tracing::debug!("playback stopped");
        Ok(())
    })
}

pub fn increment_aphorism_count<W: WorldState + 'static>() -> Action<W> {
    Action::new("increment_aphorism_count", |world: &mut W| {
        world.aphorism_played();
        Ok(())
    })
}

pub fn reset_aphorism_count<W: WorldState + 'static>() -> Action<W> {
    Action::new("reset_aphorism_count", |world: &mut W| {
        world.reset_aphorism_count();
        Ok(())
    })
}

/// Light the named LED groups. An empty group list is passed through.
pub fn light_leds<W, I, G>(lighter: Arc<dyn LedLighter>, groups: I) -> Action<W>
where
    W: 'static,
    I: IntoIterator<Item = G>,
    G: Into<String>,
{
    let groups: Vec<String> = groups.into_iter().map(Into::into).collect();
    Action::new(format!("light_leds({})", groups.join(", ")), move |_: &mut W| {
        lighter.light_led_groups(&groups)?;
        Ok(())
    })
}

pub fn light_random_leds<W: 'static>(lighter: Arc<dyn LedLighter>) -> Action<W> {
    Action::new("light_random_leds", move |_: &mut W| {
        lighter.light_random_leds()?;
        Ok(())
    })
}

/// Placeholder that does nothing.
pub fn do_nothing<W: 'static>() -> Action<W> {
    Action::new("do_nothing", |_: &mut W| Ok(()))
}
