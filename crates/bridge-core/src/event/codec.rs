//! Binary codec for the fixed-size kernel input event record.
//!
//! # Wire format
//!
//! Records arrive in the device's native byte order with this layout:
//!
//! ```text
//! offset  size  field
//! ──────  ────  ─────────────────────────────────────
//!      0     4  tv_sec      (i32, seconds)
//!      4     4  tv_usec     (i32, microseconds)
//!      8     2  event_type  (u16)
//!     10     2  code        (u16)
//!     12     4  value       (i32, two's complement)
//! ```
//!
//! Total: 16 bytes per record. There is no framing beyond the fixed size.
//! The kernel only ever writes whole records, so a short block means the
//! stream ended mid-record or the device went away, never that more bytes
//! are on the way. Callers must treat [`DecodeError::IncompleteRecord`] as
//! end-of-stream, not as a transient parse error.

use super::EventRecord;
use thiserror::Error;

/// Size in bytes of one record on the wire.
pub const RECORD_SIZE: usize = 16;

/// Errors that can occur while decoding raw device bytes.
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    /// The block holds fewer bytes than one full record.
    #[error("incomplete record: need {needed} bytes, got {available}")]
    IncompleteRecord { needed: usize, available: usize },
}

/// Decodes one record from the start of `bytes`.
///
/// Only the first [`RECORD_SIZE`] bytes are read; trailing bytes are
/// ignored. Every bit pattern of the fixed layout is structurally valid,
/// so a long enough block always decodes. The `value` field is read as
/// two's-complement signed, so a raw `FF FF FF FF` comes out as `-1`
/// without any separate reinterpretation step.
///
/// # Errors
///
/// Returns [`DecodeError::IncompleteRecord`] when `bytes` holds fewer than
/// [`RECORD_SIZE`] bytes.
///
/// # Examples
///
/// ```
/// use bridge_core::event::codec::{decode_record, encode_record};
/// use bridge_core::event::EventRecord;
///
/// let record = EventRecord::key(28, 1);
/// let bytes = encode_record(&record);
/// assert_eq!(decode_record(&bytes), Ok(record));
/// ```
pub fn decode_record(bytes: &[u8]) -> Result<EventRecord, DecodeError> {
    if bytes.len() < RECORD_SIZE {
        return Err(DecodeError::IncompleteRecord {
            needed: RECORD_SIZE,
            available: bytes.len(),
        });
    }

    Ok(EventRecord {
        tv_sec: i32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        tv_usec: i32::from_ne_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        event_type: u16::from_ne_bytes([bytes[8], bytes[9]]),
        code: u16::from_ne_bytes([bytes[10], bytes[11]]),
        value: i32::from_ne_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
    })
}

/// Encodes a record into its fixed 16-byte wire form.
///
/// The production bridge only decodes. The encoder exists so tests and
/// benchmarks can fabricate device streams that are bit-identical to what
/// the kernel would produce.
pub fn encode_record(record: &EventRecord) -> [u8; RECORD_SIZE] {
    let mut buf = [0u8; RECORD_SIZE];
    buf[0..4].copy_from_slice(&record.tv_sec.to_ne_bytes());
    buf[4..8].copy_from_slice(&record.tv_usec.to_ne_bytes());
    buf[8..10].copy_from_slice(&record.event_type.to_ne_bytes());
    buf[10..12].copy_from_slice(&record.code.to_ne_bytes());
    buf[12..16].copy_from_slice(&record.value.to_ne_bytes());
    buf
}
