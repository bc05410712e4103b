use super::stack::{MatrixCall, MatrixChannel, MatrixState};
use crate::driver::Gl;
use crate::loader::{MATRIX_TAGS, Proc, ProcTag, SymbolSource};

/// Symbol source that answers every fixed-function transform name with the
/// in-process stack implementation.
///
/// Used as the override pass on drivers that dropped the legacy matrix API.
pub struct EmulatedMatrices;

impl SymbolSource for EmulatedMatrices {
    fn lookup(&self, name: &str) -> Option<Proc> {
        MATRIX_TAGS
            .iter()
            .any(|tag| tag.entry().names.contains(&name))
            .then_some(Proc::Emulated(MatrixState::apply))
    }
}

impl MatrixCall {
    /// Procedure-table slot this operation is routed through.
    pub fn tag(&self) -> ProcTag {
        match self {
            MatrixCall::Mode(_) => ProcTag::MatrixMode,
            MatrixCall::Push => ProcTag::PushMatrix,
            MatrixCall::Pop => ProcTag::PopMatrix,
            MatrixCall::LoadIdentity => ProcTag::LoadIdentity,
            MatrixCall::Load(_) => ProcTag::LoadMatrixd,
            MatrixCall::Mult(_) => ProcTag::MultMatrixd,
            MatrixCall::Translate(..) => ProcTag::Translated,
            MatrixCall::Scale(..) => ProcTag::Scaled,
            MatrixCall::Rotate { .. } => ProcTag::Rotated,
            MatrixCall::Ortho(_) => ProcTag::Ortho,
            MatrixCall::Frustum(_) => ProcTag::Frustum,
        }
    }
}

/// Routes `call` through its table slot.
///
/// An emulated slot runs the shim on `state`. A driver slot forwards to the
/// driver and mirrors the operation into `state` so the current matrix can be
/// read back without a driver round-trip.
pub(crate) fn dispatch(gl: &Gl, state: &mut MatrixState, call: MatrixCall) {
    let tag = call.tag();
    match gl.table().get(tag) {
        Some(Proc::Emulated(shim)) => shim(state, &call),
        Some(Proc::Driver(_)) => {
            state.apply(&call);
            // SAFETY: the context owning `gl` is current on this thread.
            unsafe { forward(gl, &call) };
        }
        None => panic!("{} not loaded", tag.entry().names[0]),
    }
}

/// Caps each mirrored channel at the depth the driver reports, so the mirror
/// overflows where the driver would. Channels the driver does not report keep
/// [`MAX_DEPTH`](super::MAX_DEPTH).
pub(crate) fn mirror_driver_depths(gl: &Gl, state: &mut MatrixState) {
    if gl.table().get(ProcTag::GetIntegerv).is_none() {
        return;
    }
    for channel in MatrixChannel::ALL {
        let mut levels = 0;
        // SAFETY: `levels` is a valid out-pointer for a single integer.
        unsafe { gl.get_integerv(channel.depth_query(), &mut levels) };
        if levels > 0 {
            log::debug!("{channel:?} matrix stack depth {levels}");
            state.limit_depth(channel, levels as usize);
        }
    }
}

unsafe fn forward(gl: &Gl, call: &MatrixCall) {
    unsafe {
        match *call {
            MatrixCall::Mode(channel) => gl.matrix_mode(channel.to_gl()),
            MatrixCall::Push => gl.push_matrix(),
            MatrixCall::Pop => gl.pop_matrix(),
            MatrixCall::LoadIdentity => gl.load_identity(),
            MatrixCall::Load(m) => gl.load_matrixd(m.0.as_ptr()),
            MatrixCall::Mult(m) => gl.mult_matrixd(m.0.as_ptr()),
            MatrixCall::Translate(x, y, z) => gl.translated(x, y, z),
            MatrixCall::Scale(x, y, z) => gl.scaled(x, y, z),
            MatrixCall::Rotate { degrees, x, y, z } => gl.rotated(degrees, x, y, z),
            MatrixCall::Ortho(b) => gl.ortho(b.left, b.right, b.bottom, b.top, b.near, b.far),
            MatrixCall::Frustum(b) => gl.frustum(b.left, b.right, b.bottom, b.top, b.near, b.far),
        }
    }
}
