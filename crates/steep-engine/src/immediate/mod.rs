//! Immediate-mode vertex submission.
//!
//! `begin`, the per-vertex attribute setters, `vertex*` and `end` are methods
//! on [`Context`](crate::context::Context). Attributes are latched in a
//! [`VertexRecord`]; each `vertex*` call appends one full vertex to the
//! immediate vertex buffer and `end` draws them with a single call.

mod record;
mod session;

pub(crate) use record::Immediate;
pub use record::{Primitive, VertexRecord, immediate_format};
