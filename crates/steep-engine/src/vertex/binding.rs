use std::ffi::c_void;

use super::format::{Semantic, VertexFormat};
use crate::buffer::Buffer;
use crate::caps::BindingTier;
use crate::driver::{Gl, consts};

/// Where attribute pointers resolve to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AttribBase {
    /// Byte offsets into the bound driver buffer.
    Offset,
    /// Host addresses inside a shadow-only buffer.
    Client(*const u8),
}

impl AttribBase {
    pub fn of(buffer: &Buffer) -> Self {
        match buffer.handle() {
            Some(_) => Self::Offset,
            None => Self::Client(buffer.shadow_ptr()),
        }
    }

    fn pointer(self, offset: usize) -> *const c_void {
        match self {
            Self::Offset => offset as *const c_void,
            Self::Client(base) => base.wrapping_add(offset) as *const c_void,
        }
    }
}

/// Everything needed to make a vertex array active.
pub struct ArrayState<'a> {
    pub handle: u32,
    pub format: &'a VertexFormat,
    pub vertex: Option<&'a Buffer>,
    pub index: Option<&'a Buffer>,
}

/// One way of feeding vertex attributes to the driver.
///
/// Chosen once at init from the detected capabilities; no call site branches
/// on the tier afterwards.
///
/// # Safety
/// All methods issue driver calls; the context must be current and `Client`
/// bases must stay valid until the next draw.
pub trait VertexBinder: Sync {
    fn tier(&self) -> BindingTier;

    /// Enables every attribute of `format`.
    unsafe fn enable(&self, gl: &Gl, format: &VertexFormat);

    /// Disables every attribute of `format`.
    unsafe fn disable(&self, gl: &Gl, format: &VertexFormat);

    /// Points every attribute of `format` at `base`.
    unsafe fn point(&self, gl: &Gl, format: &VertexFormat, base: AttribBase);

    /// Replaces the attribute setup of `from` with that of `to`.
    unsafe fn switch_array(&self, gl: &Gl, from: &VertexFormat, to: &ArrayState<'_>) {
        unsafe {
            self.disable(gl, from);
            for buffer in [to.vertex, to.index].into_iter().flatten() {
                if let Some(name) = buffer.handle() {
                    gl.bind_buffer(buffer.target().to_gl(), name);
                }
            }
            self.enable(gl, to.format);
            if let Some(vertex) = to.vertex {
                self.point(gl, to.format, AttribBase::of(vertex));
            }
        }
    }
}

/// Fixed-function client arrays, one enable per semantic.
pub struct ClientArrays;

/// Generic attributes indexed by their position in the format.
pub struct GenericAttribs;

/// Generic attributes captured by driver vertex array objects.
pub struct VertexArrayObjects;

impl VertexBinder for ClientArrays {
    fn tier(&self) -> BindingTier {
        BindingTier::ClientArrays
    }

    unsafe fn enable(&self, gl: &Gl, format: &VertexFormat) {
        for attrib in format.attribs() {
            unsafe { gl.enable_client_state(attrib.semantic.client_array()) };
        }
    }

    unsafe fn disable(&self, gl: &Gl, format: &VertexFormat) {
        for attrib in format.attribs() {
            unsafe { gl.disable_client_state(attrib.semantic.client_array()) };
        }
    }

    unsafe fn point(&self, gl: &Gl, format: &VertexFormat, base: AttribBase) {
        let stride = format.stride() as i32;
        for attrib in format.attribs() {
            let ptr = base.pointer(attrib.offset);
            let size = attrib.semantic.components() as i32;
            unsafe {
                match attrib.semantic {
                    Semantic::Position2D | Semantic::Position3D | Semantic::Position4D => {
                        gl.vertex_pointer(size, consts::FLOAT, stride, ptr)
                    }
                    Semantic::Color => gl.color_pointer(size, consts::FLOAT, stride, ptr),
                    Semantic::TexCoord => gl.tex_coord_pointer(size, consts::FLOAT, stride, ptr),
                    Semantic::Normal => gl.normal_pointer(consts::FLOAT, stride, ptr),
                }
            }
        }
    }
}

unsafe fn enable_generic(gl: &Gl, format: &VertexFormat) {
    for index in 0..format.attribs().len() {
        unsafe { gl.enable_vertex_attrib_array(index as u32) };
    }
}

unsafe fn disable_generic(gl: &Gl, format: &VertexFormat) {
    for index in 0..format.attribs().len() {
        unsafe { gl.disable_vertex_attrib_array(index as u32) };
    }
}

unsafe fn point_generic(gl: &Gl, format: &VertexFormat, base: AttribBase) {
    let stride = format.stride() as i32;
    for (index, attrib) in format.attribs().iter().enumerate() {
        unsafe {
            gl.vertex_attrib_pointer(
                index as u32,
                attrib.semantic.components() as i32,
                consts::FLOAT,
                consts::FALSE,
                stride,
                base.pointer(attrib.offset),
            )
        };
    }
}

impl VertexBinder for GenericAttribs {
    fn tier(&self) -> BindingTier {
        BindingTier::GenericAttribs
    }

    unsafe fn enable(&self, gl: &Gl, format: &VertexFormat) {
        unsafe { enable_generic(gl, format) }
    }

    unsafe fn disable(&self, gl: &Gl, format: &VertexFormat) {
        unsafe { disable_generic(gl, format) }
    }

    unsafe fn point(&self, gl: &Gl, format: &VertexFormat, base: AttribBase) {
        unsafe { point_generic(gl, format, base) }
    }
}

impl VertexBinder for VertexArrayObjects {
    fn tier(&self) -> BindingTier {
        BindingTier::VertexArrayObjects
    }

    unsafe fn enable(&self, gl: &Gl, format: &VertexFormat) {
        unsafe { enable_generic(gl, format) }
    }

    unsafe fn disable(&self, gl: &Gl, format: &VertexFormat) {
        unsafe { disable_generic(gl, format) }
    }

    unsafe fn point(&self, gl: &Gl, format: &VertexFormat, base: AttribBase) {
        unsafe { point_generic(gl, format, base) }
    }

    /// The array object already holds its enables, pointers and index buffer.
    unsafe fn switch_array(&self, gl: &Gl, _from: &VertexFormat, to: &ArrayState<'_>) {
        unsafe { gl.bind_vertex_array(to.handle) };
    }
}

/// Strategy object for `tier`.
pub fn binder_for(tier: BindingTier) -> &'static dyn VertexBinder {
    match tier {
        BindingTier::ClientArrays => &ClientArrays,
        BindingTier::GenericAttribs => &GenericAttribs,
        BindingTier::VertexArrayObjects => &VertexArrayObjects,
    }
}
