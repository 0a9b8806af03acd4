//! Bridge configuration types.
//!
//! [`BridgeConfig`] is the single source of truth for all runtime settings.
//! The daemon takes no CLI arguments and reads no configuration file; the
//! hardware paths and the UI service address are fixed properties of the
//! device image, so production always runs on [`BridgeConfig::default`].
//!
//! # Design rationale
//!
//! Keeping configuration as a plain struct (no global state, no environment
//! variable reads) means tests can swap in temp-file device paths, local
//! listener addresses, and near-zero delays without touching the code under
//! test. The named `DEFAULT_*` constants document the production values in
//! one place.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Device file the gpio-keys button matrix reports on.
pub const DEFAULT_BUTTON_DEVICE: &str = "/dev/input/event0";

/// Device file the rotary encoder reports on.
pub const DEFAULT_DIAL_DEVICE: &str = "/dev/input/event1";

/// How long one forward may take before it is dropped.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(1);

/// How long a monitor waits after a failed open or a dead session before
/// trying the device again. Fixed delay, no backoff: the expected failure
/// is a device node that does not exist yet at boot.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Gap between the synthesized press and release of one rotary tick. The
/// consumer needs the gap to observe a discrete pulse instead of a held key.
pub const DEFAULT_PULSE_GAP: Duration = Duration::from_millis(10);

/// All runtime configuration for the input bridge.
///
/// Build this struct once at startup and hand its fields to the monitors
/// and the forwarder; nothing reads configuration after startup.
///
/// # Example
///
/// ```rust
/// use bridge_daemon::config::BridgeConfig;
///
/// // Defaults are the production values for the device image:
/// let cfg = BridgeConfig::default();
/// assert_eq!(cfg.server_addr.port(), 3000);
/// ```
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Path of the button matrix device file.
    pub button_device: PathBuf,

    /// Path of the rotary encoder device file.
    pub dial_device: PathBuf,

    /// The TCP address of the UI service that consumes forwarded reports.
    ///
    /// The service always runs on the same host, so this stays loopback in
    /// production; tests point it at a local listener on an ephemeral port.
    pub server_addr: SocketAddr,

    /// Maximum time one forward may take, connect included, before the
    /// report is dropped.
    pub request_timeout: Duration,

    /// Delay between device reopen attempts after a failed open or a dead
    /// session.
    pub retry_delay: Duration,

    /// Delay between the press and release halves of a rotary pulse.
    pub pulse_gap: Duration,
}

impl Default for BridgeConfig {
    /// Returns the production configuration of the device image.
    ///
    /// | Field           | Default               |
    /// |-----------------|-----------------------|
    /// | button_device   | `/dev/input/event0`   |
    /// | dial_device     | `/dev/input/event1`   |
    /// | server_addr     | `127.0.0.1:3000`      |
    /// | request_timeout | 1 second              |
    /// | retry_delay     | 1 second              |
    /// | pulse_gap       | 10 milliseconds       |
    fn default() -> Self {
        Self {
            button_device: PathBuf::from(DEFAULT_BUTTON_DEVICE),
            dial_device: PathBuf::from(DEFAULT_DIAL_DEVICE),
            // The `.parse().unwrap()` call here is safe because this is a
            // compile-time-known valid socket address string.
            server_addr: "127.0.0.1:3000".parse().unwrap(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            retry_delay: DEFAULT_RETRY_DELAY,
            pulse_gap: DEFAULT_PULSE_GAP,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
