//! Raw input event records as emitted by the kernel input drivers.
//!
//! The bridge reads two `/dev/input/event*` character devices. Each read
//! yields whole fixed-size records in the 32-bit target's `input_event`
//! layout; [`codec`] defines the exact byte format.

pub mod codec;

// ── Event type constants ──────────────────────────────────────────────────────

/// Key or button state change.
pub const EV_KEY: u16 = 0x01;

/// Relative axis movement (scroll wheels, rotary encoders).
pub const EV_REL: u16 = 0x02;

/// Axis number the rotary encoder reports its deltas on.
pub const REL_DIAL: u16 = 0x06;

// ── EV_KEY value states ───────────────────────────────────────────────────────

/// `value` of an [`EV_KEY`] record when the key goes up.
pub const KEY_RELEASE: i32 = 0;

/// `value` of an [`EV_KEY`] record when the key goes down.
pub const KEY_PRESS: i32 = 1;

/// `value` of an [`EV_KEY`] record for a driver-generated autorepeat.
pub const KEY_AUTOREPEAT: i32 = 2;

// ── Record struct ─────────────────────────────────────────────────────────────

/// One raw input event record as read from a device file.
///
/// Field widths and order mirror the kernel's `struct input_event` on the
/// 32-bit target (4-byte `time_t`). The timestamp fields are decoded but
/// otherwise unused by the bridge; `event_type`, `code`, and `value` drive
/// the mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRecord {
    /// Seconds part of the kernel timestamp.
    pub tv_sec: i32,
    /// Microseconds part of the kernel timestamp.
    pub tv_usec: i32,
    /// Event class; see [`EV_KEY`] and [`EV_REL`].
    pub event_type: u16,
    /// Hardware scan code for [`EV_KEY`], axis number for [`EV_REL`].
    pub code: u16,
    /// Key state for [`EV_KEY`]; signed delta for [`EV_REL`].
    pub value: i32,
}

impl EventRecord {
    /// Creates a key record with a zeroed timestamp.
    pub fn key(code: u16, value: i32) -> Self {
        Self {
            tv_sec: 0,
            tv_usec: 0,
            event_type: EV_KEY,
            code,
            value,
        }
    }

    /// Creates a relative-axis record with a zeroed timestamp.
    pub fn relative(code: u16, value: i32) -> Self {
        Self {
            tv_sec: 0,
            tv_usec: 0,
            event_type: EV_REL,
            code,
            value,
        }
    }
}
