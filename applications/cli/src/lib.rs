//! Cadence CLI
//!
//! Wires the queue engine to a media server, a local download directory,
//! and a console playback device.

pub mod config;
pub mod device;
pub mod downloads;
pub mod error;
pub mod network;

pub use error::{CliError, Result};
