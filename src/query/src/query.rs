//! Query lifecycle state machine.

use std::fmt;

use crate::context::Context;
use crate::error::CreationError;

/// The category of measurement a query performs.
///
/// Fixed at construction for the lifetime of the query. The set mirrors
/// the scoped query targets of GL-family APIs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Kind {
    /// Count of samples that passed the depth test.
    SamplesPassed,
    /// Whether any sample passed the depth test.
    AnySamplesPassed,
    /// Like `AnySamplesPassed`, but the implementation may report
    /// false positives.
    AnySamplesPassedConservative,
    /// Count of primitives emitted by the geometry stage.
    PrimitivesGenerated,
    /// Count of primitives written to transform feedback buffers.
    TransformFeedbackPrimitivesWritten,
    /// Nanoseconds of GPU time spent inside the measurement scope.
    TimeElapsed,
}

/// Where a query is in its measurement cycle.
///
/// `Released` is not represented here; it is carried by the handle
/// being gone.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Idle,
    InFlight,
    Pending,
    Resolved,
}

/// A single asynchronous measurement tracked against a rendering context.
///
/// The cycle is begin → end → repeated non-blocking [`ready`] polls →
/// optionally begin again, reusing the same handle. Out-of-turn calls
/// are silent no-ops rather than errors, matching the forgiving surface
/// of the underlying APIs. [`release`] frees the handle; every
/// operation after that is a no-op.
///
/// ```
/// use probe_backend_empty::DummyContext;
/// use probe_query::{Kind, Query, RawValue};
///
/// let context = DummyContext::new();
/// context.complete_with(RawValue::Number(125_000));
///
/// let mut query = Query::new(&context, Kind::TimeElapsed).unwrap();
/// query.begin();
/// // ... submit GPU work ...
/// query.end();
/// while !query.ready() {
///     // poll again next frame
/// }
/// assert_eq!(query.result(), Some(125_000));
/// query.release();
/// ```
///
/// [`ready`]: Query::ready
/// [`release`]: Query::release
pub struct Query<'a, C: Context> {
    context: &'a C,
    handle: Option<C::Handle>,
    kind: Kind,
    state: State,
    result: Option<u64>,
}

impl<'a, C: Context> Query<'a, C> {
    /// Allocate a query handle from the context.
    ///
    /// Allocation is the only fallible step of the lifecycle; the
    /// context's error passes through untranslated.
    pub fn new(context: &'a C, kind: Kind) -> Result<Self, CreationError> {
        let handle = context.create_query(kind)?;
        Ok(Query {
            context,
            handle: Some(handle),
            kind,
            state: State::Idle,
            result: None,
        })
    }

    /// Start a measurement, discarding any stale result.
    ///
    /// No-op while a measurement is already open or pending, and after
    /// [`release`](Query::release).
    pub fn begin(&mut self) {
        match self.state {
            State::Idle | State::Resolved => {}
            State::InFlight | State::Pending => return,
        }
        if let Some(handle) = &self.handle {
            self.context.begin_measurement(self.kind, handle);
            self.result = None;
            self.state = State::InFlight;
        }
    }

    /// Close the measurement scope opened by [`begin`](Query::begin).
    ///
    /// No-op unless a measurement is currently open, so a duplicate
    /// `end` never closes somebody else's scope.
    pub fn end(&mut self) {
        if self.state != State::InFlight {
            return;
        }
        if self.handle.is_some() {
            self.context.end_measurement(self.kind);
            self.state = State::Pending;
        }
    }

    /// Non-blocking poll for the measurement value.
    ///
    /// Returns `false` until a pending result becomes available, then
    /// `true` exactly once. On that call the raw value is read from the
    /// context and normalized to a number, after which it can be taken
    /// from [`result`](Query::result). There is no notification
    /// mechanism; the caller re-polls on its own cadence.
    pub fn ready(&mut self) -> bool {
        let handle = match &self.handle {
            Some(handle) => handle,
            None => return false,
        };
        if self.state != State::Pending || !self.context.result_available(handle) {
            return false;
        }
        self.result = Some(self.context.read_result(handle).normalize());
        self.state = State::Resolved;
        true
    }

    /// Destroy the underlying handle.
    ///
    /// Idempotent; once released the query answers state inspection
    /// only and every lifecycle operation is a no-op.
    pub fn release(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.context.destroy_query(handle);
        }
    }

    /// The kind of measurement this query performs.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// True between a completed `end` and a successful `ready` poll.
    pub fn is_active(&self) -> bool {
        self.state == State::Pending
    }

    /// True once [`release`](Query::release) has freed the handle.
    pub fn is_released(&self) -> bool {
        self.handle.is_none()
    }

    /// The last measurement value, if a poll has succeeded since the
    /// most recent `begin`.
    pub fn result(&self) -> Option<u64> {
        self.result
    }
}

impl<'a, C: Context> fmt::Debug for Query<'a, C> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Query")
            .field("handle", &self.handle)
            .field("kind", &self.kind)
            .field("state", &self.state)
            .field("result", &self.result)
            .finish()
    }
}
