//! # RabbitMQ MCP Server
//!
//! Exposes the RabbitMQ HTTP Management API as a catalog of MCP tools for
//! LLM agents. Each tool is a thin declarative wrapper forwarding validated
//! arguments to a single management endpoint; the `--lite` flag reduces the
//! catalog to a curated subset for lightweight development contexts.
//!
//! ## Architecture
//!
//! ```text
//! CLI flags → catalog build → filter/validate → MCP stdio server
//!                                                    │ tools/call
//!                                                    ▼
//!                                           ManagementClient ──HTTP──▶ RabbitMQ
//! ```
//!
//! The catalog, allow-list and client are built once at startup and stay
//! immutable for the process lifetime.

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

// Re-export public API
pub mod cli;
pub mod client;
pub mod server;
pub mod tools;
pub mod types;

// Internal utilities
pub mod observability;

pub use client::ManagementClient;
pub use server::McpToolServer;
pub use types::{Error, RabbitConfig, Result};
