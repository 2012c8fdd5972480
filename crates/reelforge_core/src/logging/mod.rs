//! Per-job logging.
//!
//! Application-level logging goes through `tracing`; each composition job
//! additionally gets a dedicated file log with a tail buffer of toolchain
//! output for error diagnosis.

mod job_logger;
mod types;

pub use job_logger::JobLogger;
pub use types::{LogConfig, LogLevel, MessagePrefix};
