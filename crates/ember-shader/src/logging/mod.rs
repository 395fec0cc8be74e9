//! Logging setup.
//!
//! The library only emits records through the `log` facade. Binaries call
//! [`init_logging`] once near the top of `main` to route them to stderr.

mod init;

pub use init::{init_logging, LoggingConfig};
