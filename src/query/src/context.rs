//! The rendering-context seam.

use std::fmt;

use crate::error::CreationError;
use crate::query::Kind;

/// A value read back from the context for a finished query.
///
/// WebGL on Gecko is known to report the result of a query as a
/// boolean where every other implementation reports a number, so reads
/// surface the raw tagged value and the poll normalizes it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RawValue {
    /// A numeric result, already the expected shape.
    Number(u64),
    /// A boolean result from a misbehaving platform.
    Boolean(bool),
}

impl RawValue {
    /// Coerce to a number. Booleans map to `0`/`1`.
    pub fn normalize(self) -> u64 {
        match self {
            RawValue::Number(n) => n,
            RawValue::Boolean(b) => b as u64,
        }
    }
}

/// A rendering context able to service asynchronous queries.
///
/// The context is the only collaborator of [`Query`](crate::Query) and
/// stays fully in charge of the underlying resource: it allocates
/// handles, scopes measurements, answers availability polls, and frees
/// handles. Allocation is the one fallible operation; the rest follow
/// the underlying API's fire-and-forget convention.
pub trait Context {
    /// Opaque query handle allocated by this context.
    type Handle: fmt::Debug;

    /// Allocate a query handle for a measurement of the given kind.
    ///
    /// Contexts that gate certain kinds behind optional extensions may
    /// reject the allocation with [`CreationError::Unsupported`].
    fn create_query(&self, kind: Kind) -> Result<Self::Handle, CreationError>;

    /// Start a measurement of `kind` on `handle`.
    fn begin_measurement(&self, kind: Kind, handle: &Self::Handle);

    /// Close the currently open measurement scope for `kind`.
    fn end_measurement(&self, kind: Kind);

    /// Non-blocking check whether the result can be read.
    fn result_available(&self, handle: &Self::Handle) -> bool;

    /// Read the measurement value. Only valid once
    /// [`result_available`](Self::result_available) reported `true`.
    fn read_result(&self, handle: &Self::Handle) -> RawValue;

    /// Free the handle. It must not be referenced afterwards.
    fn destroy_query(&self, handle: Self::Handle);
}

#[cfg(test)]
mod tests {
    use super::RawValue;

    #[test]
    fn booleans_normalize_to_zero_or_one() {
        assert_eq!(RawValue::Boolean(true).normalize(), 1);
        assert_eq!(RawValue::Boolean(false).normalize(), 0);
        assert_eq!(RawValue::Number(42).normalize(), 42);
    }
}
