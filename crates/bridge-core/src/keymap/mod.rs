//! Hardware-to-logical translation for the two input devices.
//!
//! One fixed table translates button scan codes into the virtual codes the
//! UI service understands. Rotary records need no table at all: only the
//! sign of the delta matters, and it selects a synthesized LEFT or RIGHT
//! pulse. Tables are built once at startup and shared read-only, so lookups
//! need no synchronization.

pub mod codes;

use crate::event::{EventRecord, EV_KEY, EV_REL, KEY_PRESS, KEY_RELEASE, REL_DIAL};
use crate::protocol::report::InputReport;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Which physical source a record came from.
///
/// The class decides how a record is interpreted: the button matrix goes
/// through the scan-code table, the dial through delta-sign handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    /// The gpio-keys button matrix.
    Buttons,
    /// The rotary encoder.
    Dial,
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeviceClass::Buttons => "buttons",
            DeviceClass::Dial => "dial",
        })
    }
}

/// Zero, one, or two logical actions produced from one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappedActions {
    /// The record is not relevant: wrong event type, unmapped code,
    /// autorepeat, or zero delta.
    None,
    /// A single press or release.
    Single(InputReport),
    /// A synthesized press-then-release pair for one rotary tick. The
    /// caller owes a short gap between the two so the consumer observes a
    /// discrete pulse rather than a held key.
    Pulse {
        press: InputReport,
        release: InputReport,
    },
}

impl MappedActions {
    /// Number of reports this mapping will forward.
    pub fn count(&self) -> usize {
        match self {
            MappedActions::None => 0,
            MappedActions::Single(_) => 1,
            MappedActions::Pulse { .. } => 2,
        }
    }

    /// Flattens into forward order (press before release for pulses).
    pub fn into_vec(self) -> Vec<InputReport> {
        match self {
            MappedActions::None => Vec::new(),
            MappedActions::Single(report) => vec![report],
            MappedActions::Pulse { press, release } => vec![press, release],
        }
    }
}

/// Immutable scan-code translation table, built once at startup.
pub struct KeyMap {
    buttons: HashMap<u16, u16>,
}

impl Default for KeyMap {
    /// The production table for the six-button matrix:
    ///
    /// | Hardware            | Virtual          |
    /// |---------------------|------------------|
    /// | `KEY_ESC` (1)       | `VK_BACK` (158)  |
    /// | `KEY_1` (2)         | `VK_BTN_0` (256) |
    /// | `KEY_2` (3)         | `VK_BTN_1` (257) |
    /// | `KEY_3` (4)         | `VK_BTN_2` (258) |
    /// | `KEY_4` (5)         | `VK_BTN_3` (259) |
    /// | `KEY_ENTER` (28)    | `VK_ENTER` (28)  |
    fn default() -> Self {
        use codes::*;

        let buttons = HashMap::from([
            (KEY_ESC, VK_BACK),
            (KEY_1, VK_BTN_0),
            (KEY_2, VK_BTN_1),
            (KEY_3, VK_BTN_2),
            (KEY_4, VK_BTN_3),
            (KEY_ENTER, VK_ENTER),
        ]);
        Self { buttons }
    }
}

impl KeyMap {
    /// Maps one decoded record to its logical actions.
    ///
    /// Never fails: records that do not translate (unknown scan codes,
    /// autorepeats, non-dial axes, zero deltas) map to
    /// [`MappedActions::None`].
    pub fn map_event(&self, class: DeviceClass, record: &EventRecord) -> MappedActions {
        match class {
            DeviceClass::Buttons => self.map_button(record),
            DeviceClass::Dial => Self::map_dial(record),
        }
    }

    fn map_button(&self, record: &EventRecord) -> MappedActions {
        if record.event_type != EV_KEY {
            return MappedActions::None;
        }

        let vk = match self.buttons.get(&record.code) {
            Some(&vk) => vk,
            None => {
                debug!("unmapped button code {:#04x} ignored", record.code);
                return MappedActions::None;
            }
        };

        match record.value {
            KEY_PRESS => MappedActions::Single(InputReport::press(vk)),
            KEY_RELEASE => MappedActions::Single(InputReport::release(vk)),
            // Autorepeats must never forward extra actions.
            _ => MappedActions::None,
        }
    }

    fn map_dial(record: &EventRecord) -> MappedActions {
        if record.event_type != EV_REL || record.code != REL_DIAL {
            return MappedActions::None;
        }

        // Sign only: one tick per record regardless of magnitude.
        let vk = match record.value {
            v if v > 0 => codes::VK_RIGHT,
            v if v < 0 => codes::VK_LEFT,
            _ => return MappedActions::None,
        };

        MappedActions::Pulse {
            press: InputReport::press(vk),
            release: InputReport::release(vk),
        }
    }
}
