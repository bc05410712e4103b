//! Vertex layouts and how they are bound on each driver tier.

mod array;
mod binding;
mod format;

pub use array::{VertexArray, VertexArrayId};
pub use binding::{
    ArrayState, AttribBase, ClientArrays, GenericAttribs, VertexArrayObjects, VertexBinder, binder_for,
};
pub use format::{Attrib, MAX_ATTRIBS, Semantic, VertexFormat};
