//! Typed access to driver entry points.
//!
//! [`Gl`] owns the filled procedure table and exposes one `unsafe` wrapper per
//! entry point. The small enums in [`state`](self) map engine-level choices to
//! driver enum values.

pub mod consts;
mod gl;
mod state;

pub use gl::Gl;
pub use state::{BlendFactor, ClearFlags, CompareFunc, Face, Feature, Winding};
