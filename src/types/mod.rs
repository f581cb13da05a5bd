//! Shared types: configuration and errors.

pub mod config;
pub mod errors;

pub use config::{Protocol, RabbitConfig, TlsIdentity};
pub use errors::{Error, Result};
