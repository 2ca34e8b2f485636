//! SERF CLI library
//!
//! Commands and context behind the `serf` binary.

pub mod commands;
pub mod context;

pub use context::AppContext;
