//! OpenGL/WebGL2 implementation of the query context, via `glow`.
//!
//! Works with any `glow::HasContext` implementation: the native
//! function-pointer context on desktop, the WebGL2 context on wasm.
//! Query targets are bound at begin time, as GL does it.

#[macro_use]
extern crate log;

use probe_query::{Context, CreationError, Kind, OutOfMemory, RawValue};

mod conv;

/// A `glow` context adapted to the query interface.
pub struct GlContext<G: glow::HasContext> {
    gl: G,
}

impl<G: glow::HasContext> GlContext<G> {
    /// Wrap a glow context.
    pub fn new(gl: G) -> Self {
        GlContext { gl }
    }

    /// Access the underlying glow context.
    pub fn raw(&self) -> &G {
        &self.gl
    }
}

impl<G: glow::HasContext> Context for GlContext<G> {
    type Handle = G::Query;

    fn create_query(&self, kind: Kind) -> Result<G::Query, CreationError> {
        // GL query objects are untyped until bound; the kind only
        // matters at begin time.
        match unsafe { self.gl.create_query() } {
            Ok(query) => {
                trace!("Created query {:?} for {:?}", query, kind);
                Ok(query)
            }
            Err(msg) => {
                warn!("Query allocation failed: {}", msg);
                Err(OutOfMemory::Host.into())
            }
        }
    }

    fn begin_measurement(&self, kind: Kind, handle: &G::Query) {
        unsafe { self.gl.begin_query(conv::kind_to_gl(kind), *handle) }
    }

    fn end_measurement(&self, kind: Kind) {
        unsafe { self.gl.end_query(conv::kind_to_gl(kind)) }
    }

    fn result_available(&self, handle: &G::Query) -> bool {
        let available = unsafe {
            self.gl
                .get_query_parameter_u32(*handle, glow::QUERY_RESULT_AVAILABLE)
        };
        available != 0
    }

    fn read_result(&self, handle: &G::Query) -> RawValue {
        let value = unsafe { self.gl.get_query_parameter_u32(*handle, glow::QUERY_RESULT) };
        RawValue::Number(value as u64)
    }

    fn destroy_query(&self, handle: G::Query) {
        trace!("Deleting query {:?}", handle);
        unsafe { self.gl.delete_query(handle) }
    }
}
