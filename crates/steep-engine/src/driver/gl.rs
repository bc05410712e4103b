use std::ffi::{c_char, c_void};

use super::consts::*;
use crate::loader::{Proc, ProcTable, ProcTag};

/// Typed view over a filled [`ProcTable`].
///
/// Every wrapper is `unsafe`: the caller guarantees the driver context is
/// current on this thread and that pointer arguments are valid for the call.
/// Calling an entry point whose slot is empty panics with its name.
pub struct Gl {
    table: ProcTable,
}

impl Gl {
    pub fn new(table: ProcTable) -> Self {
        Self { table }
    }

    #[inline]
    pub fn table(&self) -> &ProcTable {
        &self.table
    }

    #[inline]
    pub fn is_loaded(&self, tag: ProcTag) -> bool {
        self.table.is_loaded(tag)
    }

    /// Reinterprets the slot for `tag` as the function pointer type `F`.
    ///
    /// # Safety
    /// `F` must be the entry point's real signature.
    #[inline]
    unsafe fn entry<F: Copy>(&self, tag: ProcTag) -> F {
        match self.table.get(tag) {
            Some(Proc::Driver(addr)) => {
                debug_assert_eq!(size_of::<F>(), size_of::<*const c_void>());
                let ptr = addr.as_ptr();
                // SAFETY: upheld by the caller.
                unsafe { std::mem::transmute_copy::<*const c_void, F>(&ptr) }
            }
            Some(Proc::Emulated(_)) => {
                panic!("{} is emulated and has no driver entry point", tag.entry().names[0])
            }
            None => panic!("{} not loaded", tag.entry().names[0]),
        }
    }
}

macro_rules! gl_calls {
    ($($name:ident($($arg:ident: $ty:ty),*) $(-> $ret:ty)? = $tag:ident;)*) => {
        impl Gl {
            $(
                #[inline]
                pub unsafe fn $name(&self, $($arg: $ty),*) $(-> $ret)? {
                    // SAFETY: the signature matches the registry declaration
                    // of the entry point resolved into this slot.
                    unsafe {
                        let f: unsafe extern "system" fn($($ty),*) $(-> $ret)? =
                            self.entry(ProcTag::$tag);
                        f($($arg),*)
                    }
                }
            )*
        }
    };
}

gl_calls! {
    // ── state ─────────────────────────────────────────────────────────────
    clear_color(r: GLfloat, g: GLfloat, b: GLfloat, a: GLfloat) = ClearColor;
    clear_depth(depth: GLdouble) = ClearDepth;
    clear(mask: GLbitfield) = Clear;
    blend_func(src: GLenum, dst: GLenum) = BlendFunc;
    cull_face(mode: GLenum) = CullFace;
    front_face(mode: GLenum) = FrontFace;
    scissor(x: GLint, y: GLint, w: GLsizei, h: GLsizei) = Scissor;
    enable(cap: GLenum) = Enable;
    disable(cap: GLenum) = Disable;
    enable_client_state(array: GLenum) = EnableClientState;
    disable_client_state(array: GLenum) = DisableClientState;
    get_string(name: GLenum) -> *const u8 = GetString;
    get_integerv(name: GLenum, out: *mut GLint) = GetIntegerv;
    get_error() -> GLenum = GetError;
    depth_func(func: GLenum) = DepthFunc;
    depth_mask(flag: GLboolean) = DepthMask;
    depth_range(near: GLdouble, far: GLdouble) = DepthRange;
    viewport(x: GLint, y: GLint, w: GLsizei, h: GLsizei) = Viewport;

    // ── fixed-function transforms ─────────────────────────────────────────
    matrix_mode(mode: GLenum) = MatrixMode;
    push_matrix() = PushMatrix;
    pop_matrix() = PopMatrix;
    load_identity() = LoadIdentity;
    load_matrixd(m: *const GLdouble) = LoadMatrixd;
    mult_matrixd(m: *const GLdouble) = MultMatrixd;
    translated(x: GLdouble, y: GLdouble, z: GLdouble) = Translated;
    scaled(x: GLdouble, y: GLdouble, z: GLdouble) = Scaled;
    rotated(angle: GLdouble, x: GLdouble, y: GLdouble, z: GLdouble) = Rotated;
    ortho(l: GLdouble, r: GLdouble, b: GLdouble, t: GLdouble, n: GLdouble, f: GLdouble) = Ortho;
    frustum(l: GLdouble, r: GLdouble, b: GLdouble, t: GLdouble, n: GLdouble, f: GLdouble) = Frustum;

    // ── client arrays ─────────────────────────────────────────────────────
    vertex_pointer(size: GLint, ty: GLenum, stride: GLsizei, ptr: *const c_void) = VertexPointer;
    normal_pointer(ty: GLenum, stride: GLsizei, ptr: *const c_void) = NormalPointer;
    color_pointer(size: GLint, ty: GLenum, stride: GLsizei, ptr: *const c_void) = ColorPointer;
    tex_coord_pointer(size: GLint, ty: GLenum, stride: GLsizei, ptr: *const c_void) = TexCoordPointer;
    draw_arrays(mode: GLenum, first: GLint, count: GLsizei) = DrawArrays;
    draw_elements(mode: GLenum, count: GLsizei, ty: GLenum, indices: *const c_void) = DrawElements;

    // ── textures ──────────────────────────────────────────────────────────
    gen_textures(n: GLsizei, out: *mut GLuint) = GenTextures;
    delete_textures(n: GLsizei, names: *const GLuint) = DeleteTextures;
    bind_texture(target: GLenum, texture: GLuint) = BindTexture;
    tex_image_2d(
        target: GLenum, level: GLint, internal: GLint, w: GLsizei, h: GLsizei,
        border: GLint, format: GLenum, ty: GLenum, pixels: *const c_void
    ) = TexImage2D;
    tex_sub_image_2d(
        target: GLenum, level: GLint, x: GLint, y: GLint, w: GLsizei, h: GLsizei,
        format: GLenum, ty: GLenum, pixels: *const c_void
    ) = TexSubImage2D;
    tex_parameteri(target: GLenum, pname: GLenum, param: GLint) = TexParameteri;

    // ── buffer objects ────────────────────────────────────────────────────
    gen_buffers(n: GLsizei, out: *mut GLuint) = GenBuffers;
    delete_buffers(n: GLsizei, names: *const GLuint) = DeleteBuffers;
    bind_buffer(target: GLenum, buffer: GLuint) = BindBuffer;
    buffer_data(target: GLenum, size: GLsizeiptr, data: *const c_void, usage: GLenum) = BufferData;
    buffer_sub_data(target: GLenum, offset: GLintptr, size: GLsizeiptr, data: *const c_void) = BufferSubData;

    // ── generic vertex attributes ─────────────────────────────────────────
    vertex_attrib_pointer(
        index: GLuint, size: GLint, ty: GLenum, normalized: GLboolean,
        stride: GLsizei, ptr: *const c_void
    ) = VertexAttribPointer;
    enable_vertex_attrib_array(index: GLuint) = EnableVertexAttribArray;
    disable_vertex_attrib_array(index: GLuint) = DisableVertexAttribArray;

    // ── shader objects ────────────────────────────────────────────────────
    create_shader(ty: GLenum) -> GLuint = CreateShader;
    delete_shader(shader: GLuint) = DeleteShader;
    shader_source(shader: GLuint, count: GLsizei, src: *const *const c_char, len: *const GLint) = ShaderSource;
    compile_shader(shader: GLuint) = CompileShader;
    get_shaderiv(shader: GLuint, pname: GLenum, out: *mut GLint) = GetShaderiv;
    get_shader_info_log(shader: GLuint, cap: GLsizei, len: *mut GLsizei, log: *mut c_char) = GetShaderInfoLog;
    create_program() -> GLuint = CreateProgram;
    delete_program(program: GLuint) = DeleteProgram;
    attach_shader(program: GLuint, shader: GLuint) = AttachShader;
    link_program(program: GLuint) = LinkProgram;
    get_programiv(program: GLuint, pname: GLenum, out: *mut GLint) = GetProgramiv;
    get_program_info_log(program: GLuint, cap: GLsizei, len: *mut GLsizei, log: *mut c_char) = GetProgramInfoLog;
    use_program(program: GLuint) = UseProgram;
    get_uniform_location(program: GLuint, name: *const c_char) -> GLint = GetUniformLocation;
    uniform1i(location: GLint, v: GLint) = Uniform1i;
    uniform1f(location: GLint, v: GLfloat) = Uniform1f;
    uniform4f(location: GLint, x: GLfloat, y: GLfloat, z: GLfloat, w: GLfloat) = Uniform4f;
    uniform_matrix4fv(location: GLint, count: GLsizei, transpose: GLboolean, m: *const GLfloat) = UniformMatrix4fv;

    // ── vertex array objects ──────────────────────────────────────────────
    gen_vertex_arrays(n: GLsizei, out: *mut GLuint) = GenVertexArrays;
    delete_vertex_arrays(n: GLsizei, names: *const GLuint) = DeleteVertexArrays;
    bind_vertex_array(array: GLuint) = BindVertexArray;
}
