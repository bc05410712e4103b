//! Growable driver buffers with host-side shadows.

mod storage;
mod pool;

pub use storage::{Buffer, BufferTarget, BufferUsage};
pub use pool::{Handle, Pool};

/// Handle to a [`Buffer`] owned by a `Context`.
pub type BufferId = Handle<Buffer>;
