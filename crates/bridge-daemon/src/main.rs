//! Binary entry point for the hardware input bridge daemon.
//!
//! Reads raw input event records from the controller's button matrix and
//! rotary encoder, translates them into the logical key space shared with
//! the UI service, and forwards each action as an HTTP POST to the local
//! service. Runs until interrupted; device trouble and transport failures
//! are retried or dropped internally, never fatal.
//!
//! # Usage
//!
//! ```bash
//! input-bridge
//! ```
//!
//! There are no CLI arguments and no configuration file; the device paths
//! and the service address are fixed properties of the device image (see
//! [`bridge_daemon::config::BridgeConfig`]).
//!
//! # Environment variables
//!
//! | Variable   | Effect                                                             |
//! |------------|--------------------------------------------------------------------|
//! | `RUST_LOG` | Log filter, e.g. `debug` or `bridge_daemon=debug` (default: `info`) |

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bridge_core::{DeviceClass, KeyMap};
use bridge_daemon::application::pump::{ActionSink, EventPump};
use bridge_daemon::config::BridgeConfig;
use bridge_daemon::infrastructure::device::DeviceMonitor;
use bridge_daemon::infrastructure::http::HttpForwarder;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run());

    // Between hardware events each monitor sits parked in a blocking device
    // read, and dropping the runtime would wait for those reads to return.
    // Shut down in the background so exit does not wait for the next
    // keypress or dial tick.
    runtime.shutdown_background();
    result
}

/// Brings the bridge up and parks the main task until shutdown is requested.
async fn run() -> anyhow::Result<()> {
    // ── Logging ───────────────────────────────────────────────────────────────
    // Respect RUST_LOG if set, default to info level otherwise.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("hardware input bridge starting");

    // ── Shared state ──────────────────────────────────────────────────────────
    // One key map and one forwarder, shared read-only by both monitors.
    let config = BridgeConfig::default();
    let keymap = Arc::new(KeyMap::default());
    let forwarder: Arc<dyn ActionSink> = Arc::new(HttpForwarder::new(
        config.server_addr,
        config.request_timeout,
    ));

    let running = Arc::new(AtomicBool::new(true));

    // ── Device monitors ───────────────────────────────────────────────────────
    // One detached task per physical source; each owns its reopen loop.
    let button_pump = EventPump::new(
        DeviceClass::Buttons,
        Arc::clone(&keymap),
        Arc::clone(&forwarder),
        config.pulse_gap,
    );
    DeviceMonitor::new(
        config.button_device,
        DeviceClass::Buttons,
        button_pump,
        config.retry_delay,
    )
    .spawn(Arc::clone(&running));

    let dial_pump = EventPump::new(
        DeviceClass::Dial,
        Arc::clone(&keymap),
        Arc::clone(&forwarder),
        config.pulse_gap,
    );
    DeviceMonitor::new(
        config.dial_device,
        DeviceClass::Dial,
        dial_pump,
        config.retry_delay,
    )
    .spawn(Arc::clone(&running));

    // ── Shutdown handling ─────────────────────────────────────────────────────
    let running_clone = Arc::clone(&running);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            running_clone.store(false, Ordering::Relaxed);
        }
    });

    info!(
        "input bridge ready; forwarding to {}. Press Ctrl-C to exit.",
        config.server_addr
    );

    // Keep the main task alive while the monitors run in the background.
    // In-flight forwards are not drained on exit; dropping them is the same
    // fire-and-forget outcome a transport failure gets.
    loop {
        tokio::time::sleep(Duration::from_millis(100)).await;
        if !running.load(Ordering::Relaxed) {
            break;
        }
    }

    info!("input bridge stopped");
    Ok(())
}
