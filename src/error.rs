use thiserror::Error;

use crate::NodeId;

/// Failure scoped to one source/destination pair. These become inline error
/// markers in the result map instead of failing the whole request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("no path between {0} and {1}")]
    NoPath(NodeId, NodeId),
    #[error("negative cycle detected")]
    NegativeCycle,
}

/// Failure that rejects the whole request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputeError {
    /// The selector does not name any registered algorithm. The message text
    /// is part of the wire contract, trailing period included.
    #[error("Algorithm not recognized.")]
    AlgorithmNotRecognized,
    /// Reserved for selectors that are registered but not runnable. No
    /// current registry entry produces it.
    #[error("Algorithm not supported")]
    AlgorithmNotSupported,
    /// An all-pairs procedure failed before any per-pair slot existed.
    #[error("{algo} failed: {source}")]
    AllPairsFailed {
        algo: String,
        #[source]
        source: PathError,
    },
}
