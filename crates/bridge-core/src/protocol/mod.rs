//! Wire contract with the UI service that consumes forwarded input.

pub mod report;

pub use report::{InputReport, DEVICE_ID};
