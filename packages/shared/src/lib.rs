//! Shared utilities for the Kaiwa chat workspace.

pub mod logger;
pub mod time;
