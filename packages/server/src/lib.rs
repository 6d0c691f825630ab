//! Multi-room WebSocket chat server library.
//!
//! This library provides the chat server: connection presence with editable
//! usernames, global / private / room messaging, and room lifecycle management.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
