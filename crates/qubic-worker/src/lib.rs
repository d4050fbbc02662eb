//! JSON-lines search worker
//!
//! Runs `qubic-core` searches on a background thread and talks to a host
//! process over stdin/stdout.

pub mod host;
pub mod output;
pub mod panic;
pub mod protocol;
pub mod session;
pub mod state;
pub mod stdin_reader;
pub mod worker;
