//! # bridge-core
//!
//! Shared library for the hardware input bridge containing the raw event
//! record codec, the key mapping tables, and the JSON report type forwarded
//! to the UI service.
//!
//! This crate has zero dependencies on OS APIs, sockets, or the async
//! runtime. Everything here is pure and synchronous, so the daemon crate
//! can drive it from any byte source: device files in production, in-memory
//! buffers in tests.
//!
//! # Data flow (for beginners)
//!
//! The controller hardware exposes two character devices: a gpio-keys
//! button matrix and a rotary encoder. The kernel writes fixed 16-byte
//! records to each whenever hardware state changes. This crate turns those
//! bytes into actions:
//!
//! - **`event`** – decodes one 16-byte block into an [`EventRecord`]
//!   (timestamp, event type, code, value).
//!
//! - **`keymap`** – translates a record into zero, one, or two logical
//!   actions: button scan codes through a fixed table, rotary deltas into
//!   synthesized press/release pulses.
//!
//! - **`protocol`** – the [`InputReport`] JSON body the daemon posts to the
//!   UI service for every action.

// Declare the three top-level modules.  Rust will look for each in a
// subdirectory with the same name (e.g., src/event/mod.rs).
pub mod event;
pub mod keymap;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `bridge_core::EventRecord` instead of `bridge_core::event::EventRecord`.
pub use event::codec::{decode_record, encode_record, DecodeError, RECORD_SIZE};
pub use event::EventRecord;
pub use keymap::{DeviceClass, KeyMap, MappedActions};
pub use protocol::report::{InputReport, DEVICE_ID};
