//! Application layer use cases for the bridge daemon.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure mapping rules, here in `bridge-core`) and the infrastructure
//! (device files, sockets).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil one goal (e.g., "turn this
//!   decoded record into forwarded reports, in order, with the pulse gap").
//! - **Depend on abstractions** (traits) rather than concrete
//!   implementations, so the transport can be swapped without changing
//!   this code.
//! - **Contain no file system access and no sockets**.
//!
//! # Sub-modules
//!
//! - **`pump`** – Receives decoded records from a device monitor, maps them
//!   through the key table, and forwards the resulting reports. This is the
//!   hot path — it runs on every button edge and every rotary tick.

pub mod pump;
