//! Real-time delivery server implementation.

mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::{ServerError, router, run};
