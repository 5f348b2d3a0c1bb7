use thiserror::Error;

use crate::container::ContainerKind;
use crate::key::MapKey;

/// BenchError enumerates over all possible errors that this package
/// shall return.
#[derive(Debug, Error, PartialEq)]
pub enum BenchError {
    /// Invalid run parameter, detected before any target starts.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Container population could not allocate its storage. Aborts the
    /// current target, never retried.
    #[error("{kind} container could not reserve {requested} entries: {reason}")]
    ResourceExhaustion {
        kind: ContainerKind,
        requested: usize,
        reason: String,
    },
    /// Fatal case, marked key went missing between populate and lookup.
    /// Timing from such a run would be meaningless.
    #[error("{target}: marked key {key} not found after populate")]
    InvariantViolation { target: String, key: MapKey },
    /// Child process for an isolated fork failed to run or to report.
    #[error("fork failed: {0}")]
    Fork(String),
}
