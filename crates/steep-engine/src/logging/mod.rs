//! Logging setup.
//!
//! The engine logs through the `log` facade only; `init_logging` installs
//! `env_logger` for applications that have no logger of their own.

mod init;

pub use init::{LoggingConfig, init_logging};
