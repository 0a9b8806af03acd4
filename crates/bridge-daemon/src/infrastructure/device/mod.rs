//! Device file monitors.
//!
//! One [`DeviceMonitor`] per physical source. A monitor owns its device
//! path, reads whole records from the open file, and hands each decoded
//! record to its [`EventPump`]. Any failure (open, read error, short block)
//! ends the current session; the monitor sleeps the fixed retry delay and
//! opens the device again, forever.
//!
//! Architecture:
//! - `DeviceMonitor::run` owns the open/reopen loop (session lifecycle).
//! - `run_session` drives exactly one open handle until its stream dies.
//! - The session is generic over [`AsyncRead`] so tests feed it scripted
//!   streams instead of real device nodes.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bridge_core::event::codec::{decode_record, DecodeError, RECORD_SIZE};
use bridge_core::DeviceClass;
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info, warn};

use crate::application::pump::EventPump;

/// Errors that end one monitor session.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// An OS-level read error occurred on the device file.
    #[error("device read error: {0}")]
    Read(#[from] std::io::Error),
    /// The stream ended mid-record or at a record boundary.
    #[error("record decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Monitors one device file and pumps every record it yields.
pub struct DeviceMonitor {
    path: PathBuf,
    class: DeviceClass,
    pump: EventPump,
    retry_delay: Duration,
}

impl DeviceMonitor {
    /// Creates a monitor for one device path.
    pub fn new(path: PathBuf, class: DeviceClass, pump: EventPump, retry_delay: Duration) -> Self {
        Self {
            path,
            class,
            pump,
            retry_delay,
        }
    }

    /// Spawns the monitor as a detached task.
    pub fn spawn(self, running: Arc<AtomicBool>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(running).await })
    }

    /// Runs the open/read/reopen loop until `running` is cleared.
    ///
    /// There is no terminal failure: a missing device node, a dead stream,
    /// and a read error all lead back to the same fixed-delay reopen.
    pub async fn run(self, running: Arc<AtomicBool>) {
        info!("starting {} monitor on {}", self.class, self.path.display());

        while running.load(Ordering::Relaxed) {
            match File::open(&self.path).await {
                Ok(device) => {
                    info!("{} device opened: {}", self.class, self.path.display());
                    match self.run_session(device).await {
                        Err(MonitorError::Decode(DecodeError::IncompleteRecord { .. })) => {
                            info!(
                                "{} device stream ended; reopening in {:?}",
                                self.class, self.retry_delay
                            );
                        }
                        Err(e) => {
                            warn!(
                                "{} monitor error: {e}; reopening in {:?}",
                                self.class, self.retry_delay
                            );
                        }
                        Ok(()) => {}
                    }
                }
                Err(e) => {
                    warn!("could not open {}: {e}", self.path.display());
                }
            }

            if running.load(Ordering::Relaxed) {
                time::sleep(self.retry_delay).await;
            }
        }
    }

    /// Drives one open device handle until the stream dies.
    ///
    /// Dropping the handle on return is what closes the session.
    async fn run_session<R>(&self, mut device: R) -> Result<(), MonitorError>
    where
        R: AsyncRead + Unpin,
    {
        let mut block = [0u8; RECORD_SIZE];
        loop {
            let filled = read_block(&mut device, &mut block).await?;
            // A partial block goes to the decoder so a short read surfaces
            // as IncompleteRecord, the stream-ending condition.
            let record = decode_record(&block[..filled])?;
            debug!(
                "{} event: type={:#04x} code={:#04x} value={}",
                self.class, record.event_type, record.code, record.value
            );
            self.pump.process(&record).await;
        }
    }
}

/// Fills `block` from the device, stopping early only at end-of-stream.
///
/// Device reads normally return whole records, but nothing guarantees it,
/// so partial reads are accumulated until the block is full.
async fn read_block<R>(
    device: &mut R,
    block: &mut [u8; RECORD_SIZE],
) -> Result<usize, std::io::Error>
where
    R: AsyncRead + Unpin,
{
    let mut filled = 0;
    while filled < RECORD_SIZE {
        let n = device.read(&mut block[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
