//! Integration tests for the device monitor's reopen loop.
//!
//! # Purpose
//!
//! The unit tests in `infrastructure::device` drive single sessions over
//! scripted readers; these tests run the whole supervisor loop over real
//! files on disk:
//!
//! - A file of encoded records plays the part of a device that delivers
//!   events and then dies (EOF). The monitor must pump every record, treat
//!   the EOF as a closed stream, and reopen after the fixed delay.
//! - A missing path plays the part of a device that has not enumerated
//!   yet. The monitor must keep retrying without ever terminating.
//! - Clearing the shared running flag must stop the task cleanly in both
//!   situations.
//! - A FIFO whose writer stays silent plays the part of a device that is
//!   idle between hardware events. The monitor parks in a pending read,
//!   and background runtime shutdown must return without waiting for it.
//!
//! Retry delays are set to a few milliseconds so the tests observe several
//! reopen cycles without slowing the suite down.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bridge_core::event::REL_DIAL;
use bridge_core::keymap::codes;
use bridge_core::{encode_record, DeviceClass, EventRecord, InputReport, KeyMap, RECORD_SIZE};
use bridge_daemon::application::pump::{ActionSink, EventPump};
use bridge_daemon::infrastructure::device::DeviceMonitor;

// ── Test fixtures ─────────────────────────────────────────────────────────────

/// A temp file of encoded records standing in for a device node.
///
/// Removed on drop so failed runs do not litter the temp directory.
struct TempDevice {
    path: PathBuf,
}

impl TempDevice {
    fn create(name: &str, records: &[EventRecord]) -> Self {
        let mut bytes = Vec::with_capacity(records.len() * RECORD_SIZE);
        for record in records {
            bytes.extend_from_slice(&encode_record(record));
        }
        let path = std::env::temp_dir().join(format!(
            "input-bridge-{}-{name}.bin",
            std::process::id()
        ));
        std::fs::write(&path, bytes).expect("write temp device file");
        Self { path }
    }
}

impl Drop for TempDevice {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Sink that records every report it is handed.
#[derive(Default)]
struct RecordingSink {
    reports: Mutex<Vec<InputReport>>,
}

impl RecordingSink {
    fn count(&self) -> usize {
        self.reports.lock().unwrap().len()
    }

    fn snapshot(&self) -> Vec<InputReport> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl ActionSink for RecordingSink {
    async fn forward(&self, report: &InputReport) -> Result<(), String> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }
}

fn make_monitor(
    path: PathBuf,
    class: DeviceClass,
    sink: Arc<RecordingSink>,
    retry_delay: Duration,
) -> DeviceMonitor {
    let pump = EventPump::new(class, Arc::new(KeyMap::default()), sink, Duration::ZERO);
    DeviceMonitor::new(path, class, pump, retry_delay)
}

/// Polls until the sink holds at least `at_least` reports.
async fn wait_for_reports(sink: &RecordingSink, at_least: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while sink.count() < at_least {
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    })
    .await
    .unwrap_or_else(|_| {
        panic!(
            "expected at least {at_least} reports, got {} before the deadline",
            sink.count()
        )
    });
}

// ── Reopen loop over a real file ──────────────────────────────────────────────

/// A device stream that ends (EOF) must not end the monitor: after the
/// retry delay it reopens the path and pumps the same records again.
#[tokio::test]
async fn test_monitor_reopens_after_stream_end() {
    // Arrange: one press/release pair on the ESC button.
    let device = TempDevice::create(
        "reopen",
        &[
            EventRecord::key(codes::KEY_ESC, 1),
            EventRecord::key(codes::KEY_ESC, 0),
        ],
    );
    let sink = Arc::new(RecordingSink::default());
    let monitor = make_monitor(
        device.path.clone(),
        DeviceClass::Buttons,
        sink.clone(),
        Duration::from_millis(5),
    );
    let running = Arc::new(AtomicBool::new(true));

    // Act
    let handle = monitor.spawn(running.clone());

    // Assert: four reports means a second session re-read the file, so the
    // EOF was handled as stream-closed-then-reopen rather than termination.
    wait_for_reports(&sink, 4).await;
    let reports = sink.snapshot();
    assert_eq!(reports[0], InputReport::press(codes::VK_BACK));
    assert_eq!(reports[1], InputReport::release(codes::VK_BACK));
    assert_eq!(reports[2], reports[0], "reopened session must replay the file");
    assert_eq!(reports[3], reports[1]);

    // Clearing the flag must stop the task cleanly.
    running.store(false, Ordering::Relaxed);
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("monitor must stop once the flag is cleared")
        .expect("monitor task must not panic");
}

/// A dial tick read from disk must come out the far end as a full pulse,
/// press before release.
#[tokio::test]
async fn test_monitor_pumps_dial_pulse_from_file() {
    let device = TempDevice::create("dial", &[EventRecord::relative(REL_DIAL, -3)]);
    let sink = Arc::new(RecordingSink::default());
    let monitor = make_monitor(
        device.path.clone(),
        DeviceClass::Dial,
        sink.clone(),
        Duration::from_millis(5),
    );
    let running = Arc::new(AtomicBool::new(true));

    let handle = monitor.spawn(running.clone());

    wait_for_reports(&sink, 2).await;
    let reports = sink.snapshot();
    assert_eq!(reports[0], InputReport::press(codes::VK_LEFT));
    assert_eq!(reports[1], InputReport::release(codes::VK_LEFT));

    running.store(false, Ordering::Relaxed);
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("monitor must stop once the flag is cleared")
        .expect("monitor task must not panic");
}

// ── Missing device node ───────────────────────────────────────────────────────

/// A path that cannot be opened (device not enumerated) must keep the
/// monitor alive and retrying, never terminating on its own.
#[tokio::test]
async fn test_monitor_survives_missing_device() {
    let path = std::env::temp_dir().join(format!(
        "input-bridge-{}-no-such-device",
        std::process::id()
    ));
    let sink = Arc::new(RecordingSink::default());
    let monitor = make_monitor(
        path,
        DeviceClass::Buttons,
        sink.clone(),
        Duration::from_millis(3),
    );
    let running = Arc::new(AtomicBool::new(true));

    let handle = monitor.spawn(running.clone());

    // Several retry cycles' worth of time passes and the task is still up.
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(!handle.is_finished(), "monitor must keep retrying, not exit");
    assert_eq!(sink.count(), 0, "nothing to pump from a missing device");

    running.store(false, Ordering::Relaxed);
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("monitor must stop once the flag is cleared")
        .expect("monitor task must not panic");
}

/// Shutdown requested before the device ever opened: the task must still
/// come down promptly instead of waiting out a full open attempt.
#[tokio::test]
async fn test_monitor_stops_promptly_when_flag_cleared() {
    let path = std::env::temp_dir().join(format!(
        "input-bridge-{}-never-opened",
        std::process::id()
    ));
    let sink = Arc::new(RecordingSink::default());
    let monitor = make_monitor(
        path,
        DeviceClass::Dial,
        sink,
        Duration::from_millis(3),
    );
    let running = Arc::new(AtomicBool::new(true));

    let handle = monitor.spawn(running.clone());
    running.store(false, Ordering::Relaxed);

    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("monitor must stop once the flag is cleared")
        .expect("monitor task must not panic");
}

// ── Teardown with a quiet device ──────────────────────────────────────────────

/// A device that is idle between hardware events leaves its monitor parked
/// in a pending read, and that read only returns when the next byte arrives.
/// The entry point therefore shuts its runtime down in the background; this
/// pins down that the call returns promptly with a monitor still mid-read.
#[test]
fn test_shutdown_does_not_wait_for_quiet_device() {
    use std::fs::OpenOptions;
    use std::process::Command;
    use std::time::Instant;

    // Arrange: a FIFO plays the part of the idle device. Holding its write
    // end open without writing keeps the monitor's read pending instead of
    // returning EOF.
    let fifo = std::env::temp_dir().join(format!(
        "input-bridge-{}-quiet-device",
        std::process::id()
    ));
    let status = Command::new("mkfifo")
        .arg(&fifo)
        .status()
        .expect("run mkfifo");
    assert!(status.success(), "mkfifo must create the fifo");

    let runtime = tokio::runtime::Runtime::new().expect("build runtime");
    let sink = Arc::new(RecordingSink::default());
    let monitor = make_monitor(
        fifo.clone(),
        DeviceClass::Buttons,
        sink.clone(),
        Duration::from_millis(5),
    );
    let running = Arc::new(AtomicBool::new(true));
    runtime.spawn(monitor.run(running.clone()));

    // Opening the write end completes once the monitor has the read end
    // open; staying silent from here on parks the monitor in its read.
    let writer = OpenOptions::new()
        .write(true)
        .open(&fifo)
        .expect("open fifo write end");
    std::thread::sleep(Duration::from_millis(100));

    // Act: bring the runtime down the way the entry point does on interrupt.
    running.store(false, Ordering::Relaxed);
    let started = Instant::now();
    runtime.shutdown_background();

    // Assert: teardown returned without waiting for the next device byte.
    assert!(
        started.elapsed() < Duration::from_secs(1),
        "shutdown must not wait on a pending device read (took {:?})",
        started.elapsed()
    );
    assert_eq!(sink.count(), 0, "a silent device pumps nothing");

    drop(writer);
    let _ = std::fs::remove_file(&fifo);
}
