//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Response of `GET /api/status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDto {
    pub status: String,
    /// Server start time (RFC 3339)
    pub started: String,
    /// Seconds since the server started
    pub uptime: u64,
}
