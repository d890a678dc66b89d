//! Dummy context implementation to exercise the query lifecycle
//! outside of a graphics environment.
//!
//! The context is scriptable: tests configure how many availability
//! polls report "not yet" and which raw value is served once the
//! result arrives, then inspect the ordered log of calls made against
//! the context.

use std::cell::RefCell;

use probe_query::{Context, CreationError, Kind, OutOfMemory, RawValue};

/// Identifier handed out for each allocated query.
pub type HandleId = u32;

/// One call made against the context, in the order it happened.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Call {
    /// `create_query`
    CreateQuery(Kind),
    /// `begin_measurement`
    BeginMeasurement(Kind, HandleId),
    /// `end_measurement`
    EndMeasurement(Kind),
    /// `result_available`
    ResultAvailable(HandleId),
    /// `read_result`
    ReadResult(HandleId),
    /// `destroy_query`
    DestroyQuery(HandleId),
}

#[derive(Debug)]
struct State {
    next_handle: HandleId,
    live: Vec<HandleId>,
    polls_until_available: u32,
    value: RawValue,
    fail_allocation: bool,
    calls: Vec<Call>,
}

impl Default for State {
    fn default() -> Self {
        State {
            // GL object names start at 1; 0 reads as "no object".
            next_handle: 1,
            live: Vec::new(),
            polls_until_available: 0,
            value: RawValue::Number(0),
            fail_allocation: false,
            calls: Vec::new(),
        }
    }
}

/// Scriptable dummy context.
#[derive(Debug, Default)]
pub struct DummyContext {
    state: RefCell<State>,
}

impl DummyContext {
    /// A context whose results are immediately available with value `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the result as unavailable for the next `polls`
    /// availability checks.
    pub fn make_available_after(&self, polls: u32) {
        self.state.borrow_mut().polls_until_available = polls;
    }

    /// Set the raw value served once the result is available.
    pub fn complete_with(&self, value: RawValue) {
        self.state.borrow_mut().value = value;
    }

    /// Make the next allocation fail with a device out-of-memory.
    pub fn fail_next_allocation(&self) {
        self.state.borrow_mut().fail_allocation = true;
    }

    /// Every call made against this context, oldest first.
    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    /// Handles allocated and not yet destroyed.
    pub fn live_queries(&self) -> Vec<HandleId> {
        self.state.borrow().live.clone()
    }
}

impl Context for DummyContext {
    type Handle = HandleId;

    fn create_query(&self, kind: Kind) -> Result<HandleId, CreationError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::CreateQuery(kind));
        if state.fail_allocation {
            state.fail_allocation = false;
            return Err(OutOfMemory::Device.into());
        }
        let handle = state.next_handle;
        state.next_handle += 1;
        state.live.push(handle);
        Ok(handle)
    }

    fn begin_measurement(&self, kind: Kind, handle: &HandleId) {
        self.state
            .borrow_mut()
            .calls
            .push(Call::BeginMeasurement(kind, *handle));
    }

    fn end_measurement(&self, kind: Kind) {
        self.state.borrow_mut().calls.push(Call::EndMeasurement(kind));
    }

    fn result_available(&self, handle: &HandleId) -> bool {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::ResultAvailable(*handle));
        if state.polls_until_available == 0 {
            true
        } else {
            state.polls_until_available -= 1;
            false
        }
    }

    fn read_result(&self, handle: &HandleId) -> RawValue {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::ReadResult(*handle));
        state.value
    }

    fn destroy_query(&self, handle: HandleId) {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call::DestroyQuery(handle));
        state.live.retain(|&live| live != handle);
    }
}
