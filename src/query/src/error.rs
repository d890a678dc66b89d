//! Return values from fallible context calls.

use crate::query::Kind;

/// Memory exhaustion on the host or device side.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum OutOfMemory {
    /// Host memory exhausted.
    #[error("Out of host memory")]
    Host,
    /// Device memory exhausted.
    #[error("Out of device memory")]
    Device,
}

/// Error allocating a query handle.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CreationError {
    /// Out of either host or device memory.
    #[error(transparent)]
    OutOfMemory(#[from] OutOfMemory),
    /// The context does not support queries of this kind.
    #[error("Query kind {0:?} is not supported by the context")]
    Unsupported(Kind),
}
