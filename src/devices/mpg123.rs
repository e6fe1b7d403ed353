//! Audio playback through `mpg123` in remote-control mode.
//!
//! `mpg123 -R` reads commands on stdin (`LOAD`, `STOP`, `VOLUME`, ...) and
//! reports playback state on stdout (`@P 0` stopped, `@P 1` paused, `@P 2`
//! playing, `@E` errors). A status thread follows stdout to keep the busy
//! flag current and to start the next queued track when one finishes.

use super::{lock, AudioPlayer, DeviceError};
use crate::core::{Track, Volume};
use std::collections::VecDeque;
use std::ffi::OsStr;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const DEVICE: &str = "mpg123";

/// How long `Drop` waits for the child to exit after `QUIT`.
const QUIT_GRACE: Duration = Duration::from_millis(500);

/// Playback state reported by mpg123.
#[derive(Clone, Debug, PartialEq, Eq)]
enum Status {
    Stopped,
    Paused,
    Playing,
    Error(String),
}

fn parse_status(line: &str) -> Option<Status> {
    let line = line.trim();
    match line {
        "@P 0" => Some(Status::Stopped),
        "@P 1" => Some(Status::Paused),
        "@P 2" => Some(Status::Playing),
        _ => line
            .strip_prefix("@E")
            .map(|message| Status::Error(message.trim().to_string())),
    }
}

/// Command channel and queue shared with the status thread.
///
/// mpg123 answers `STOP` with the same `@P 0` it prints when a track runs
/// out. `pending_stops` counts the answers still owed so the status thread
/// does not mistake them for a finished track and advance the queue.
struct Remote {
    stdin: ChildStdin,
    loaded: Option<Track>,
    queue: VecDeque<Track>,
    active: bool,
    pending_stops: usize,
}

impl Remote {
    fn send(&mut self, command: &str) -> Result<(), DeviceError> {
        writeln!(self.stdin, "{command}")?;
        self.stdin.flush()?;
        Ok(())
    }

    fn start(&mut self, track: &Track) -> Result<(), DeviceError> {
        self.send(&format!("LOAD {}", track.path().display()))?;
        self.active = true;
        Ok(())
    }

    /// Stop playback. mpg123 only acknowledges a stop while a track is
    /// loaded, so an idle stop owes no answer.
    fn halt(&mut self) -> Result<(), DeviceError> {
        self.queue.clear();
        self.send("STOP")?;
        if self.active {
            self.pending_stops += 1;
            self.active = false;
        }
        Ok(())
    }
}

pub struct Mpg123Player {
    remote: Arc<Mutex<Remote>>,
    busy: Arc<AtomicBool>,
    child: Child,
}

impl Mpg123Player {
    /// Spawn `mpg123` from `PATH`.
    pub fn spawn() -> Result<Self, DeviceError> {
        Self::spawn_with(DEVICE)
    }

    /// Spawn a specific mpg123-compatible binary.
    pub fn spawn_with(program: impl AsRef<OsStr>) -> Result<Self, DeviceError> {
        let mut child = Command::new(program)
            .arg("-R")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| DeviceError::unavailable(DEVICE, err))?;

        let (stdin, stdout) = match (child.stdin.take(), child.stdout.take()) {
            (Some(stdin), Some(stdout)) => (stdin, stdout),
            _ => {
                let _ = child.kill();
                return Err(DeviceError::unavailable(DEVICE, "pipes not captured"));
            }
        };

        let remote = Arc::new(Mutex::new(Remote {
            stdin,
            loaded: None,
            queue: VecDeque::new(),
            active: false,
            pending_stops: 0,
        }));
        let busy = Arc::new(AtomicBool::new(false));

        // Frame-by-frame progress output is noise for us.
        lock(&remote).send("SILENCE")?;

        let watcher = {
            let remote = Arc::clone(&remote);
            let busy = Arc::clone(&busy);
            thread::Builder::new()
                .name("mpg123-status".to_string())
                .spawn(move || watch_status(stdout, remote, busy))
        };
        if let Err(err) = watcher {
            let _ = child.kill();
            return Err(DeviceError::unavailable(DEVICE, err));
        }

        tracing::info!(pid = child.id(), "mpg123 player started");
        Ok(Self {
            remote,
            busy,
            child,
        })
    }
}

fn watch_status(stdout: ChildStdout, remote: Arc<Mutex<Remote>>, busy: Arc<AtomicBool>) {
    for line in BufReader::new(stdout).lines() {
        let Ok(line) = line else { break };
        match parse_status(&line) {
            Some(Status::Stopped) => {
                let mut remote = lock(&remote);
                if remote.pending_stops > 0 {
                    remote.pending_stops -= 1;
                    tracing::trace!("stop acknowledged");
                    continue;
                }
                remote.active = false;
                match remote.queue.pop_front() {
                    Some(next) => {
                        tracing::debug!(track = %next.file_name(), "starting queued track");
                        if let Err(err) = remote.start(&next) {
                            tracing::warn!(error = %err, "failed to start queued track");
                            busy.store(false, Ordering::SeqCst);
                        }
                    }
                    None => busy.store(false, Ordering::SeqCst),
                }
            }
            Some(status @ (Status::Paused | Status::Playing)) => {
                // Reports ahead of an owed stop answer describe the stopped track.
                let mut remote = lock(&remote);
                if remote.pending_stops == 0 {
                    remote.active = true;
                    busy.store(status == Status::Playing, Ordering::SeqCst);
                }
            }
            Some(Status::Error(message)) => {
                tracing::warn!(%message, "mpg123 reported an error");
            }
            None => {}
        }
    }
    busy.store(false, Ordering::SeqCst);
    tracing::debug!("mpg123 status stream ended");
}

impl AudioPlayer for Mpg123Player {
    fn load(&self, track: &Track) -> Result<(), DeviceError> {
        lock(&self.remote).loaded = Some(track.clone());
        Ok(())
    }

    fn play(&self) -> Result<(), DeviceError> {
        let mut remote = lock(&self.remote);
        let track = remote
            .loaded
            .clone()
            .ok_or_else(|| DeviceError::Protocol("play called before load".to_string()))?;
        remote.start(&track)?;
        self.busy.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn queue(&self, track: &Track) -> Result<(), DeviceError> {
        lock(&self.remote).queue.push_back(track.clone());
        Ok(())
    }

    fn stop(&self) -> Result<(), DeviceError> {
        lock(&self.remote).halt()?;
        self.busy.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn set_volume(&self, volume: Volume) -> Result<(), DeviceError> {
        lock(&self.remote).send(&format!("VOLUME {}", volume.percent()))
    }

    fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }
}

impl Drop for Mpg123Player {
    fn drop(&mut self) {
        let _ = lock(&self.remote).send("QUIT");

        let step = Duration::from_millis(20);
        let mut waited = Duration::ZERO;
        while waited < QUIT_GRACE {
            if let Ok(Some(_)) = self.child.try_wait() {
                tracing::debug!("mpg123 player released");
                return;
            }
            thread::sleep(step);
            waited += step;
        }

        let _ = self.child.kill();
        let _ = self.child.wait();
        tracing::debug!("mpg123 player killed");
    }
}
