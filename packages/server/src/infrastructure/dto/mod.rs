//! Wire formats of the chat server.
//!
//! - `websocket`: client events and server events exchanged over `/ws`
//! - `http`: responses of the `/api` endpoints
//! - `conversion`: mapping from domain types to the wire formats

pub mod conversion;
pub mod http;
pub mod websocket;
