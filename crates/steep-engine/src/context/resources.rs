use super::engine::Context;
use crate::buffer::{Buffer, BufferId, BufferTarget, BufferUsage};
use crate::caps::{BindingTier, Capabilities};
use crate::error::Result;
use crate::shader::{self, Program};
use crate::texture::{self, PixelFormat, Texture};
use crate::vertex::{ArrayState, AttribBase, VertexArray, VertexArrayId, VertexFormat};

impl Context {
    // ── buffers ───────────────────────────────────────────────────────────

    /// Creates a buffer of `size` bytes. Panics when `size` is zero.
    pub fn create_buffer(&mut self, target: BufferTarget, size: usize, usage: BufferUsage) -> Result<BufferId> {
        let with_storage = self.caps().contains(Capabilities::BUFFER_OBJECTS);
        let buffer = Buffer::create(&self.gl, with_storage, target, size, usage)?;
        let id = self.buffers.insert(buffer);
        self.restore_index_binding(id);
        Ok(id)
    }

    /// Releases a buffer. Vertex arrays still referring to it must not be
    /// drawn from afterwards.
    pub fn free_buffer(&mut self, id: BufferId) {
        self.buffers.remove(id).release(&self.gl);
    }

    pub fn buffer(&self, id: BufferId) -> &Buffer {
        self.buffers.get(id)
    }

    /// Appends `bytes` at the buffer's cursor, growing it as needed.
    pub fn write_buffer(&mut self, id: BufferId, bytes: &[u8]) -> Result<()> {
        let result = self.buffers.get_mut(id).write(&self.gl, bytes);
        self.restore_index_binding(id);
        result
    }

    pub fn seek_buffer(&mut self, id: BufferId, offset: usize) {
        self.buffers.get_mut(id).seek(offset);
    }

    pub fn resize_buffer(&mut self, id: BufferId, size: usize) -> Result<()> {
        let result = self.buffers.get_mut(id).resize(&self.gl, size);
        self.restore_index_binding(id);
        result
    }

    pub fn flush_buffer(&self, id: BufferId) {
        self.buffers.get(id).flush(&self.gl);
        self.restore_index_binding(id);
    }

    pub fn send_buffer(&self, id: BufferId, len: usize) {
        self.buffers.get(id).send(&self.gl, len);
        self.restore_index_binding(id);
    }

    pub fn send_buffer_range(&self, id: BufferId, offset: usize, len: usize) {
        self.buffers.get(id).send_range(&self.gl, offset, len);
        self.restore_index_binding(id);
    }

    /// Index buffer uploads go through the element binding, which a bound
    /// vertex array object owns. Puts the current array's index buffer back.
    fn restore_index_binding(&self, id: BufferId) {
        if self.buffers.get(id).target() != BufferTarget::Index {
            return;
        }
        let Some(array) = self.current_array.map(|a| self.arrays.get(a)) else { return };
        if array.handle() == 0 {
            return;
        }
        let name = array.index_buffer.and_then(|b| self.buffers.get(b).handle()).unwrap_or(0);
        // SAFETY: `name` is 0 or a live buffer object.
        unsafe { self.gl.bind_buffer(BufferTarget::Index.to_gl(), name) };
    }

    // ── vertex arrays ─────────────────────────────────────────────────────

    pub fn create_vertex_array(&mut self) -> VertexArrayId {
        let with_object = self.tier() == BindingTier::VertexArrayObjects;
        self.arrays.insert(VertexArray::create(&self.gl, with_object))
    }

    /// Releases a vertex array, unbinding it first when it is current.
    pub fn free_vertex_array(&mut self, id: VertexArrayId) {
        assert!(id != self.immediate.array, "the immediate-mode vertex array cannot be freed");
        if self.current_array == Some(id) {
            self.bind_vertex_array(None);
        }
        self.arrays.remove(id).release(&self.gl);
    }

    pub fn vertex_array(&self, id: VertexArrayId) -> &VertexArray {
        self.arrays.get(id)
    }

    pub fn current_vertex_array(&self) -> Option<VertexArrayId> {
        self.current_array
    }

    /// Makes `id` the target of subsequent `bind_buffer`/`bind_format` calls
    /// and the source of subsequent draws. `None` unbinds.
    pub fn bind_vertex_array(&mut self, id: Option<VertexArrayId>) {
        let none = VertexFormat::new();
        let to = match id {
            Some(id) => {
                let array = self.arrays.get(id);
                ArrayState {
                    handle: array.handle(),
                    format: &array.format,
                    vertex: array.vertex_buffer.map(|b| self.buffers.get(b)),
                    index: array.index_buffer.map(|b| self.buffers.get(b)),
                }
            }
            None => ArrayState { handle: 0, format: &none, vertex: None, index: None },
        };

        // SAFETY: every buffer in `to` is live in the pool.
        unsafe { self.binder.switch_array(&self.gl, &self.applied, &to) };
        self.applied = *to.format;
        self.current_array = id;
    }

    /// Attaches `buffer` to the current vertex array, as its vertex or index
    /// source depending on the buffer's target.
    pub fn bind_buffer(&mut self, buffer: BufferId) {
        let array_id = self.bound_array("bind_buffer");
        let target = self.buffers.get(buffer).target();

        let array = self.arrays.get_mut(array_id);
        match target {
            BufferTarget::Vertex => array.vertex_buffer = Some(buffer),
            BufferTarget::Index => array.index_buffer = Some(buffer),
        }

        let buf = self.buffers.get(buffer);
        if let Some(name) = buf.handle() {
            // SAFETY: `name` is a live buffer object.
            unsafe { self.gl.bind_buffer(target.to_gl(), name) };
        }
        let format = self.arrays.get(array_id).format;
        if target == BufferTarget::Vertex && !format.is_empty() {
            // SAFETY: the vertex buffer was bound just above.
            unsafe { self.binder.point(&self.gl, &format, AttribBase::of(buf)) };
        }
    }

    /// Replaces the attribute layout of the current vertex array.
    pub fn bind_format(&mut self, format: VertexFormat) {
        let array_id = self.bound_array("bind_format");
        let array = self.arrays.get_mut(array_id);
        let previous = std::mem::replace(&mut array.format, format);
        let vertex = array.vertex_buffer.map(|b| self.buffers.get(b));

        // SAFETY: the current array is bound; the vertex buffer is live.
        unsafe {
            self.binder.disable(&self.gl, &previous);
            self.binder.enable(&self.gl, &format);
            if let Some(vertex) = vertex {
                if let Some(name) = vertex.handle() {
                    self.gl.bind_buffer(vertex.target().to_gl(), name);
                }
                self.binder.point(&self.gl, &format, AttribBase::of(vertex));
            }
        }
        self.applied = format;
    }

    fn bound_array(&self, op: &str) -> VertexArrayId {
        match self.current_array {
            Some(id) => id,
            None => panic!("{op} requires a bound vertex array"),
        }
    }

    // ── shaders ───────────────────────────────────────────────────────────

    /// Compiles and links a program. Panics when the driver has no shader
    /// objects.
    pub fn compile_program(&self, vertex_src: &str, fragment_src: &str) -> Result<Program> {
        assert!(
            self.caps().contains(Capabilities::SHADER_OBJECTS),
            "driver has no shader objects"
        );
        shader::compile_program(&self.gl, vertex_src, fragment_src)
    }

    /// Makes `program` current; `None` returns to the fixed pipeline.
    pub fn use_program(&mut self, program: Option<&Program>) {
        shader::use_program(&self.gl, program);
        self.program = program.map(Program::handle);
    }

    pub fn free_program(&mut self, program: Program) {
        if self.program == Some(program.handle()) {
            self.use_program(None);
        }
        shader::free_program(&self.gl, program);
    }

    pub fn uniform_location(&self, program: &Program, name: &str) -> Option<i32> {
        shader::uniform_location(&self.gl, program, name)
    }

    // ── textures ──────────────────────────────────────────────────────────

    pub fn create_texture_2d(
        &self,
        pixels: Option<&[u8]>,
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Texture> {
        texture::create_texture_2d(&self.gl, pixels, width, height, format)
    }

    pub fn bind_texture(&self, texture: Option<&Texture>) {
        texture::bind_texture(&self.gl, texture);
    }

    pub fn free_texture(&self, texture: Texture) {
        texture::free_texture(&self.gl, texture);
    }
}
