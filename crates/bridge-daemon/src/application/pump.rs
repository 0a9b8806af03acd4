//! EventPump: turns one decoded record into forwarded reports.
//!
//! Each device monitor owns one pump. The pump consults the shared
//! [`KeyMap`], forwards whatever reports come out in order, and inserts the
//! pulse gap between the two halves of a rotary tick.
//!
//! # Architecture
//!
//! The pump depends only on the [`ActionSink`] trait and domain types from
//! `bridge-core`. The HTTP transport is injected at construction time,
//! making the pump fully unit-testable with a recording sink.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bridge_core::{DeviceClass, EventRecord, InputReport, KeyMap, MappedActions};
use tokio::time;
use tracing::{info, warn};

/// Trait for delivering one report to the UI service.
///
/// The production implementation posts over HTTP; test implementations
/// record calls.
#[async_trait]
pub trait ActionSink: Send + Sync {
    /// Sends a single report.
    ///
    /// Implementations must return the failure rather than panic; the pump
    /// decides what a failure means (it drops the report and moves on).
    async fn forward(&self, report: &InputReport) -> Result<(), String>;
}

/// The per-record use case shared by both device monitors.
///
/// Transport failures end here: a dropped report is logged and swallowed,
/// never propagated, so the device read loop is not stalled or restarted by
/// a dead UI service.
pub struct EventPump {
    class: DeviceClass,
    keymap: Arc<KeyMap>,
    sink: Arc<dyn ActionSink>,
    pulse_gap: Duration,
}

impl EventPump {
    /// Creates a pump for one device class.
    pub fn new(
        class: DeviceClass,
        keymap: Arc<KeyMap>,
        sink: Arc<dyn ActionSink>,
        pulse_gap: Duration,
    ) -> Self {
        Self {
            class,
            keymap,
            sink,
            pulse_gap,
        }
    }

    /// Processes one decoded record end to end.
    pub async fn process(&self, record: &EventRecord) {
        match self.keymap.map_event(self.class, record) {
            MappedActions::None => {}
            MappedActions::Single(report) => {
                self.deliver(&report).await;
            }
            MappedActions::Pulse { press, release } => {
                self.deliver(&press).await;
                // The gap is what makes the consumer see a discrete tick
                // instead of a held key; it is ordering, not pacing.
                time::sleep(self.pulse_gap).await;
                self.deliver(&release).await;
            }
        }
    }

    async fn deliver(&self, report: &InputReport) {
        match self.sink.forward(report).await {
            Ok(()) => info!(
                "sent keyCode={} isPressed={}",
                report.key_code, report.is_pressed
            ),
            Err(e) => warn!(
                "dropping keyCode={} isPressed={}: {e}",
                report.key_code, report.is_pressed
            ),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
