//! Error types for the query controller.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryError {
    /// Back or Forward at the edge of the history.
    #[error("No history entry in that direction")]
    NoHistoryEntry,
}
