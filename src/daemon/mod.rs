//! Daemon module for Focustick.
//!
//! This module contains the daemon-side plumbing around the engine:
//! - `runner`: the 1 Hz tick driver
//! - `ipc`: Unix-socket server and request handling

pub mod ipc;
pub mod runner;

pub use ipc::{default_socket_path, IpcError, IpcServer, RequestHandler};
pub use runner::TickDriver;
