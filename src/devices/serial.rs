//! Line sensor over a byte stream.
//!
//! A pump thread reads newline-terminated lines from the stream and hands
//! them to the controller through a channel, which gives `read_line` its
//! timeout. The stream is usually the sensor's tty device, but any reader
//! works (stdin, a pipe, a recorded session).

use super::{DeviceError, SensorLine};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

pub struct LineSensor {
    lines: Receiver<io::Result<String>>,
    source: String,
}

impl LineSensor {
    /// Open a serial device, setting its baud rate first when given.
    pub fn open(path: &Path, baud_rate: Option<u32>) -> Result<Self, DeviceError> {
        let device = format!("serial port {}", path.display());

        if let Some(baud) = baud_rate {
            configure_tty(path, baud);
        }

        let file = File::open(path).map_err(|err| DeviceError::unavailable(&device, err))?;
        tracing::info!(port = %path.display(), baud = ?baud_rate, "sensor port opened");
        Self::from_reader(file, device)
    }

    /// Read sensor lines from any byte stream.
    pub fn from_reader<R>(reader: R, source: impl Into<String>) -> Result<Self, DeviceError>
    where
        R: Read + Send + 'static,
    {
        let source = source.into();
        let (tx, rx) = mpsc::channel();

        thread::Builder::new()
            .name("sensor-pump".to_string())
            .spawn(move || pump(BufReader::new(reader), tx))
            .map_err(|err| DeviceError::unavailable(&source, err))?;

        Ok(Self { lines: rx, source })
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl SensorLine for LineSensor {
    fn read_line(&mut self, timeout: Duration) -> Result<Option<String>, DeviceError> {
        match self.lines.recv_timeout(timeout) {
            Ok(Ok(line)) => Ok(Some(line)),
            Ok(Err(err)) => Err(DeviceError::Io(err)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(DeviceError::Closed),
        }
    }
}

/// Forward lines until end of stream, a read error, or the receiver is gone.
fn pump<R: BufRead>(mut reader: R, tx: Sender<io::Result<String>>) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                // Sensor firmware occasionally emits non-UTF-8 noise on reset.
                let line = String::from_utf8_lossy(&buf).trim().to_string();
                if tx.send(Ok(line)).is_err() {
                    break;
                }
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                let _ = tx.send(Err(err));
                break;
            }
        }
    }
    tracing::debug!("sensor stream ended");
}

/// Put the tty into raw mode at `baud`. Failure is logged, not fatal: the
/// port may already be configured.
fn configure_tty(path: &Path, baud: u32) {
    let status = Command::new("stty")
        .arg("-F")
        .arg(path)
        .arg(baud.to_string())
        .args(["raw", "-echo"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) if status.success() => {}
        Ok(status) => tracing::warn!(port = %path.display(), %status, "stty rejected port settings"),
        Err(err) => tracing::warn!(port = %path.display(), error = %err, "could not run stty"),
    }
}
