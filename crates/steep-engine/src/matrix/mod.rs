//! Transform matrices and the three-channel matrix stack.
//!
//! On drivers that still expose fixed-function transforms, operations are
//! forwarded to the driver. Otherwise the procedure table holds in-process
//! shims and the stacks here are the only copy of the transform state.

mod dispatch;
mod mat4;
mod stack;

pub(crate) use dispatch::{dispatch, mirror_driver_depths};
pub use dispatch::EmulatedMatrices;
pub use mat4::{ClipBox, Matrix};
pub use stack::{MAX_DEPTH, MatrixCall, MatrixChannel, MatrixStack, MatrixState, Shim};
