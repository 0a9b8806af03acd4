//! The JSON report body posted to the UI service for every logical action.
//!
//! The shape is fixed by the consumer and serialized in camelCase:
//!
//! ```json
//! {"deviceId": "input-bridge", "keyCode": 158, "isPressed": true}
//! ```

use serde::{Deserialize, Serialize};

/// Identity string carried in every report, letting the consumer tell
/// hardware input apart from other sources such as on-screen controls.
pub const DEVICE_ID: &str = "input-bridge";

/// One logical press or release, ready for JSON serialization.
///
/// Reports are transient values: created by the key mapper, handed to the
/// forwarder, and dropped. Nothing retains them after the send completes
/// or fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputReport {
    /// Always [`DEVICE_ID`] for reports produced by this bridge.
    pub device_id: String,
    /// Virtual key code; see [`crate::keymap::codes`].
    pub key_code: u16,
    /// `true` for press, `false` for release.
    pub is_pressed: bool,
}

impl InputReport {
    /// Creates a report carrying this bridge's device identity.
    pub fn new(key_code: u16, is_pressed: bool) -> Self {
        Self {
            device_id: DEVICE_ID.to_string(),
            key_code,
            is_pressed,
        }
    }

    /// Shorthand for a press report.
    pub fn press(key_code: u16) -> Self {
        Self::new(key_code, true)
    }

    /// Shorthand for a release report.
    pub fn release(key_code: u16) -> Self {
        Self::new(key_code, false)
    }
}
