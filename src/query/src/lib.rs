#![deny(missing_docs)]

//! Lifecycle tracking for asynchronous rendering-context queries.
//!
//! A [`Query`] owns one opaque query handle allocated from a rendering
//! context and walks it through a begin/end/poll/release cycle. Results
//! are never waited for: the caller polls [`Query::ready`] on its own
//! cadence (typically once per frame) until the context reports the
//! value as available.
//!
//! The context itself is an opaque collaborator behind the [`Context`]
//! trait. Backends adapt concrete graphics APIs to it; the core crate
//! only tracks state.

pub use self::context::{Context, RawValue};
pub use self::error::{CreationError, OutOfMemory};
pub use self::query::{Kind, Query};

pub mod context;
pub mod error;
pub mod query;
