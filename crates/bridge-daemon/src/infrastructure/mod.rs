//! Infrastructure layer for the bridge daemon.
//!
//! Contains OS-facing adapters: the device file monitors and the HTTP
//! transport to the UI service.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `bridge_core`, but MUST NOT be imported by the `application` layer.

pub mod device;
pub mod http;
