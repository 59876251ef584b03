//! Network messages - communication between App and Network layers

use crate::models::{RequestState, ResponseRecord};
use crate::network::Attempt;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Execute a snapshot of the staged request
    ExecuteRequest { id: u64, request: RequestState },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Completed HTTP exchange, whatever the status
    Success {
        id: u64,
        record: ResponseRecord,
        time_ms: u64,
    },
    /// No status or body could be obtained
    Error {
        id: u64,
        message: String,
        time_ms: u64,
    },
}

impl NetworkResponse {
    pub fn from_attempt(id: u64, attempt: Attempt) -> Self {
        match attempt.outcome {
            Ok(record) => NetworkResponse::Success {
                id,
                record,
                time_ms: attempt.time_ms,
            },
            Err(e) => NetworkResponse::Error {
                id,
                message: e.to_string(),
                time_ms: attempt.time_ms,
            },
        }
    }

    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Success { id, .. } => *id,
            NetworkResponse::Error { id, .. } => *id,
        }
    }
}
