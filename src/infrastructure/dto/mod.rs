//! Wire-level data transfer objects.

pub mod http;
pub mod sse;
pub mod websocket;
