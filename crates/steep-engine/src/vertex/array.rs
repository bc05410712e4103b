use super::format::VertexFormat;
use crate::buffer::{BufferId, Handle};
use crate::driver::Gl;

/// A vertex format plus the buffers it reads from.
///
/// On the vertex-array-object tier `handle` names the driver object that
/// captures this setup; on the other tiers it is 0 and the setup is replayed
/// on every switch.
#[derive(Debug)]
pub struct VertexArray {
    handle: u32,
    pub(crate) vertex_buffer: Option<BufferId>,
    pub(crate) index_buffer: Option<BufferId>,
    pub(crate) format: VertexFormat,
}

/// Handle to a [`VertexArray`] owned by a `Context`.
pub type VertexArrayId = Handle<VertexArray>;

impl VertexArray {
    pub(crate) fn create(gl: &Gl, with_driver_object: bool) -> Self {
        let mut handle = 0;
        if with_driver_object {
            // SAFETY: `handle` is a valid out-pointer.
            unsafe { gl.gen_vertex_arrays(1, &mut handle) };
        }
        Self { handle, vertex_buffer: None, index_buffer: None, format: VertexFormat::new() }
    }

    #[inline]
    pub fn handle(&self) -> u32 {
        self.handle
    }

    #[inline]
    pub fn format(&self) -> &VertexFormat {
        &self.format
    }

    #[inline]
    pub fn vertex_buffer(&self) -> Option<BufferId> {
        self.vertex_buffer
    }

    #[inline]
    pub fn index_buffer(&self) -> Option<BufferId> {
        self.index_buffer
    }

    pub(crate) fn release(self, gl: &Gl) {
        if self.handle != 0 {
            // SAFETY: `handle` came from `gen_vertex_arrays` and is deleted once.
            unsafe { gl.delete_vertex_arrays(1, &self.handle) };
        }
    }
}
