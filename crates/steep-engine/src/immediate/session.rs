use super::record::Primitive;
use crate::context::Context;
use crate::driver::consts;
use crate::error::Result;
use crate::matrix::MatrixChannel;
use crate::shader::{self, MODELVIEW_UNIFORM, PROJECTION_UNIFORM};
use crate::vertex::AttribBase;

impl Context {
    /// Starts a primitive. Vertices go to the immediate-mode vertex array
    /// until [`end`](Self::end).
    ///
    /// Panics when called again before `end`.
    pub fn begin(&mut self, primitive: Primitive) {
        assert!(self.immediate.primitive.is_none(), "begin called inside begin/end");

        if let Some(program) = self.program {
            self.upload_transforms(program);
        }

        self.immediate.resume = self.current_array;
        self.bind_vertex_array(Some(self.immediate.array));
        self.buffers.get_mut(self.immediate.vertex_buffer).seek(0);
        self.immediate.primitive = Some(primitive);
        self.immediate.failed = None;
    }

    /// Ends the primitive: uploads the written vertices and draws them.
    ///
    /// Returns the first buffer growth failure of this pair, if any, in which
    /// case nothing is drawn.
    pub fn end(&mut self) -> Result<()> {
        let Some(primitive) = self.immediate.primitive.take() else {
            panic!("end called without begin");
        };

        let result = match self.immediate.failed.take() {
            Some(err) => Err(err),
            None => {
                self.draw_immediate(primitive);
                Ok(())
            }
        };

        let resume = self.immediate.resume.take();
        self.bind_vertex_array(resume);
        result
    }

    fn draw_immediate(&self, primitive: Primitive) {
        let buffer = self.buffers.get(self.immediate.vertex_buffer);
        let format = &self.arrays.get(self.immediate.array).format;
        buffer.flush(&self.gl);

        // SAFETY: the immediate array is bound; shadow pointers are refreshed
        // because growth may have moved the shadow.
        unsafe {
            if buffer.handle().is_none() {
                self.binder.point(&self.gl, format, AttribBase::of(buffer));
            }
            let count = match format.stride() {
                0 => 0,
                stride => buffer.cursor() / stride,
            };
            self.gl.draw_arrays(primitive.to_gl(), 0, count as i32);
        }
    }

    /// Pushes both transform channels to the program's matrix uniforms.
    fn upload_transforms(&self, program: u32) {
        let uniforms = [
            (PROJECTION_UNIFORM, MatrixChannel::Projection),
            (MODELVIEW_UNIFORM, MatrixChannel::ModelView),
        ];
        for (name, channel) in uniforms {
            if let Some(location) = shader::location(&self.gl, program, name) {
                let m = self.matrix(channel).to_f32();
                // SAFETY: `m` holds 16 column-major floats.
                unsafe { self.gl.uniform_matrix4fv(location, 1, consts::FALSE, m.as_ptr()) };
            }
        }
    }

    // ── per-vertex attributes ─────────────────────────────────────────────

    pub fn color3f(&mut self, r: f32, g: f32, b: f32) {
        let a = self.immediate.record.color[3];
        self.color4f(r, g, b, a);
    }

    pub fn color4f(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.immediate.record.color = [r, g, b, a];
    }

    pub fn color3ub(&mut self, r: u8, g: u8, b: u8) {
        self.color3f(unit(r), unit(g), unit(b));
    }

    pub fn color4ub(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.color4f(unit(r), unit(g), unit(b), unit(a));
    }

    pub fn texcoord2f(&mut self, u: f32, v: f32) {
        self.immediate.record.texcoord = [u, v];
    }

    pub fn normal3f(&mut self, x: f32, y: f32, z: f32) {
        self.immediate.record.normal = [x, y, z];
    }

    // ── vertices ──────────────────────────────────────────────────────────

    pub fn vertex2f(&mut self, x: f32, y: f32) {
        self.vertex4f(x, y, 0.0, 1.0);
    }

    pub fn vertex3f(&mut self, x: f32, y: f32, z: f32) {
        self.vertex4f(x, y, z, 1.0);
    }

    /// Appends one vertex carrying the latched color, texcoord and normal.
    ///
    /// Panics outside `begin`/`end`.
    pub fn vertex4f(&mut self, x: f32, y: f32, z: f32, w: f32) {
        assert!(self.immediate.primitive.is_some(), "vertex submitted outside begin/end");
        if self.immediate.failed.is_some() {
            return;
        }

        let format = &self.arrays.get(self.immediate.array).format;
        let (floats, n) = self.immediate.record.encode(format, [x, y, z, w]);
        let buffer = self.buffers.get_mut(self.immediate.vertex_buffer);
        if let Err(err) = buffer.write(&self.gl, bytemuck::cast_slice(&floats[..n])) {
            log::warn!("dropping immediate-mode vertices: {err}");
            self.immediate.failed = Some(err);
        }
    }
}

fn unit(c: u8) -> f32 {
    f32::from(c) / 255.0
}
