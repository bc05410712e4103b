//! `extern "system"` stubs behind the fake driver.
//!
//! Stubs never panic: unwinding out of an `extern "system"` function aborts
//! the test binary. Misuse is recorded as a marker entry in the call log.

use std::ffi::{CStr, c_char, c_void};

use super::{Draw, Group, Pointer, Texture, attrib_key, with};
use crate::driver::consts;

fn record(name: &'static str) {
    with(|s| s.calls.push(name));
}

macro_rules! symbols {
    ($name:expr; $($sym:literal => $group:ident $stub:ident,)*) => {
        match $name {
            $($sym => Some((Group::$group, $stub as *const c_void)),)*
            _ => None,
        }
    };
}

/// Stub address and family for `name`.
pub(super) fn symbol(name: &str) -> Option<(Group, *const c_void)> {
    symbols! { name;
        "glClearColor" => Base clear_color,
        "glClearDepth" => Base clear_depth,
        "glClear" => Base clear,
        "glBlendFunc" => Base blend_func,
        "glCullFace" => Base cull_face,
        "glFrontFace" => Base front_face,
        "glScissor" => Base scissor,
        "glEnable" => Base enable,
        "glDisable" => Base disable,
        "glGetString" => Base get_string,
        "glGetIntegerv" => Base get_integerv,
        "glGetError" => Base get_error,
        "glDepthFunc" => Base depth_func,
        "glDepthMask" => Base depth_mask,
        "glDepthRange" => Base depth_range,
        "glViewport" => Base viewport,
        "glDrawArrays" => Base draw_arrays,
        "glDrawElements" => Base draw_elements,
        "glGenTextures" => Base gen_textures,
        "glDeleteTextures" => Base delete_textures,
        "glBindTexture" => Base bind_texture,
        "glTexImage2D" => Base tex_image_2d,
        "glTexSubImage2D" => Base tex_sub_image_2d,
        "glTexParameteri" => Base tex_parameteri,

        "glEnableClientState" => Fixed enable_client_state,
        "glDisableClientState" => Fixed disable_client_state,
        "glMatrixMode" => Fixed matrix_mode,
        "glPushMatrix" => Fixed push_matrix,
        "glPopMatrix" => Fixed pop_matrix,
        "glLoadIdentity" => Fixed load_identity,
        "glLoadMatrixd" => Fixed load_matrixd,
        "glMultMatrixd" => Fixed mult_matrixd,
        "glTranslated" => Fixed translated,
        "glScaled" => Fixed scaled,
        "glRotated" => Fixed rotated,
        "glOrtho" => Fixed ortho,
        "glFrustum" => Fixed frustum,
        "glVertexPointer" => Fixed vertex_pointer,
        "glNormalPointer" => Fixed normal_pointer,
        "glColorPointer" => Fixed color_pointer,
        "glTexCoordPointer" => Fixed tex_coord_pointer,

        "glGenBuffers" => Buffers gen_buffers,
        "glDeleteBuffers" => Buffers delete_buffers,
        "glBindBuffer" => Buffers bind_buffer,
        "glBufferData" => Buffers buffer_data,
        "glBufferSubData" => Buffers buffer_sub_data,

        "glVertexAttribPointer" => Programmable vertex_attrib_pointer,
        "glEnableVertexAttribArray" => Programmable enable_vertex_attrib_array,
        "glDisableVertexAttribArray" => Programmable disable_vertex_attrib_array,
        "glCreateShader" => Programmable create_shader,
        "glDeleteShader" => Programmable delete_shader,
        "glShaderSource" => Programmable shader_source,
        "glCompileShader" => Programmable compile_shader,
        "glGetShaderiv" => Programmable get_shaderiv,
        "glGetShaderInfoLog" => Programmable get_shader_info_log,
        "glCreateProgram" => Programmable create_program,
        "glDeleteProgram" => Programmable delete_program,
        "glAttachShader" => Programmable attach_shader,
        "glLinkProgram" => Programmable link_program,
        "glGetProgramiv" => Programmable get_programiv,
        "glGetProgramInfoLog" => Programmable get_program_info_log,
        "glUseProgram" => Programmable use_program,
        "glGetUniformLocation" => Programmable get_uniform_location,
        "glUniform1i" => Programmable uniform1i,
        "glUniform1f" => Programmable uniform1f,
        "glUniform4f" => Programmable uniform4f,
        "glUniformMatrix4fv" => Programmable uniform_matrix4fv,

        "glGenVertexArrays" => ArrayObjects gen_vertex_arrays,
        "glDeleteVertexArrays" => ArrayObjects delete_vertex_arrays,
        "glBindVertexArray" => ArrayObjects bind_vertex_array,
    }
}

/// Uniform locations the fake programs expose.
pub(crate) const MODELVIEW_LOCATION: i32 = 1;
pub(crate) const PROJECTION_LOCATION: i32 = 2;

const COMPILE_LOG: &[u8] = b"0:1: syntax error\0";
const LINK_LOG: &[u8] = b"unresolved varying\0";

// ── state ─────────────────────────────────────────────────────────────────

extern "system" fn clear_color(r: f32, g: f32, b: f32, a: f32) {
    record("glClearColor");
    with(|s| s.clear_color = [r, g, b, a]);
}

extern "system" fn clear_depth(_depth: f64) {
    record("glClearDepth");
}

extern "system" fn clear(_mask: u32) {
    record("glClear");
}

extern "system" fn blend_func(_src: u32, _dst: u32) {
    record("glBlendFunc");
}

extern "system" fn cull_face(mode: u32) {
    record("glCullFace");
    with(|s| s.cull_face = mode);
}

extern "system" fn front_face(mode: u32) {
    record("glFrontFace");
    with(|s| s.front_face = mode);
}

extern "system" fn scissor(_x: i32, _y: i32, _w: i32, _h: i32) {
    record("glScissor");
}

extern "system" fn enable(cap: u32) {
    record("glEnable");
    with(|s| s.enabled.insert(cap));
}

extern "system" fn disable(cap: u32) {
    record("glDisable");
    with(|s| s.enabled.remove(&cap));
}

extern "system" fn get_string(name: u32) -> *const u8 {
    record("glGetString");
    let programmable = with(|s| s.profile.has(Group::Programmable));
    let text: &'static [u8] = match name {
        consts::VERSION => with(|s| s.profile.version()),
        consts::SHADING_LANGUAGE_VERSION if programmable => b"1.20 Fake\0",
        consts::VENDOR | consts::RENDERER => b"Fake\0",
        _ => return std::ptr::null(),
    };
    text.as_ptr()
}

/// Stack depths of the fixed-function profiles; everything else reads 0.
pub(crate) const MODELVIEW_STACK_DEPTH: i32 = 32;
pub(crate) const PROJECTION_STACK_DEPTH: i32 = 4;
pub(crate) const TEXTURE_STACK_DEPTH: i32 = 2;

extern "system" fn get_integerv(name: u32, out: *mut i32) {
    record("glGetIntegerv");
    let fixed = with(|s| s.profile.has(Group::Fixed));
    let value = match name {
        consts::MAX_MODELVIEW_STACK_DEPTH if fixed => MODELVIEW_STACK_DEPTH,
        consts::MAX_PROJECTION_STACK_DEPTH if fixed => PROJECTION_STACK_DEPTH,
        consts::MAX_TEXTURE_STACK_DEPTH if fixed => TEXTURE_STACK_DEPTH,
        _ => 0,
    };
    unsafe { *out = value };
}

extern "system" fn get_error() -> u32 {
    record("glGetError");
    0
}

extern "system" fn depth_func(_func: u32) {
    record("glDepthFunc");
}

extern "system" fn depth_mask(_flag: u8) {
    record("glDepthMask");
}

extern "system" fn depth_range(_near: f64, _far: f64) {
    record("glDepthRange");
}

extern "system" fn viewport(x: i32, y: i32, w: i32, h: i32) {
    record("glViewport");
    with(|s| s.viewport = [x, y, w, h]);
}

// ── drawing ───────────────────────────────────────────────────────────────

extern "system" fn draw_arrays(mode: u32, first: i32, count: i32) {
    record("glDrawArrays");
    with(|s| {
        let attrib0 = s.current_attribs().contains(&0);
        let source = s
            .pointers
            .get(&(s.vao, attrib_key(0)))
            .filter(|_| attrib0)
            .or_else(|| s.pointers.get(&(s.vao, consts::VERTEX_ARRAY)))
            .copied();

        let vertices = match source {
            Some(p) => {
                let len = (p.stride * (first + count)) as usize;
                if p.buffer != 0 {
                    let data = s.buffers.get(&p.buffer).map(Vec::as_slice).unwrap_or_default();
                    let end = (p.ptr + len).min(data.len());
                    data.get(p.ptr..end).unwrap_or_default().to_vec()
                } else if p.ptr != 0 && len > 0 {
                    unsafe { std::slice::from_raw_parts(p.ptr as *const u8, len) }.to_vec()
                } else {
                    Vec::new()
                }
            }
            None => Vec::new(),
        };
        s.draws.push(Draw { mode, first, count, vertices });
    });
}

extern "system" fn draw_elements(_mode: u32, _count: i32, _ty: u32, _indices: *const c_void) {
    record("glDrawElements");
}

// ── textures ──────────────────────────────────────────────────────────────

extern "system" fn gen_textures(n: i32, out: *mut u32) {
    record("glGenTextures");
    with(|s| {
        for i in 0..n as usize {
            let name = s.gen_name();
            s.textures.insert(name, Texture::default());
            unsafe { *out.add(i) = name };
        }
    });
}

extern "system" fn delete_textures(n: i32, names: *const u32) {
    record("glDeleteTextures");
    with(|s| {
        for i in 0..n as usize {
            s.textures.remove(&unsafe { *names.add(i) });
        }
    });
}

extern "system" fn bind_texture(_target: u32, texture: u32) {
    record("glBindTexture");
    with(|s| s.bound_texture = texture);
}

#[allow(clippy::too_many_arguments)]
extern "system" fn tex_image_2d(
    _target: u32,
    _level: i32,
    _internal: i32,
    w: i32,
    h: i32,
    _border: i32,
    format: u32,
    _ty: u32,
    pixels: *const c_void,
) {
    record("glTexImage2D");
    let bpp = match format {
        consts::RGBA => 4,
        consts::RGB => 3,
        _ => 1,
    };
    let len = (w * h * bpp) as usize;
    let data = if pixels.is_null() {
        vec![0; len]
    } else {
        unsafe { std::slice::from_raw_parts(pixels as *const u8, len) }.to_vec()
    };
    with(|s| {
        let bound = s.bound_texture;
        if let Some(t) = s.textures.get_mut(&bound) {
            t.width = w;
            t.height = h;
            t.format = format;
            t.pixels = data;
        }
    });
}

#[allow(clippy::too_many_arguments)]
extern "system" fn tex_sub_image_2d(
    _target: u32,
    _level: i32,
    _x: i32,
    _y: i32,
    _w: i32,
    _h: i32,
    _format: u32,
    _ty: u32,
    _pixels: *const c_void,
) {
    record("glTexSubImage2D");
}

extern "system" fn tex_parameteri(_target: u32, pname: u32, param: i32) {
    record("glTexParameteri");
    with(|s| {
        let bound = s.bound_texture;
        if let Some(t) = s.textures.get_mut(&bound) {
            t.params.insert(pname, param);
        }
    });
}

// ── fixed function ────────────────────────────────────────────────────────

extern "system" fn enable_client_state(array: u32) {
    record("glEnableClientState");
    with(|s| s.client_states.insert(array));
}

extern "system" fn disable_client_state(array: u32) {
    record("glDisableClientState");
    with(|s| s.client_states.remove(&array));
}

extern "system" fn matrix_mode(_mode: u32) {
    record("glMatrixMode");
}

extern "system" fn push_matrix() {
    record("glPushMatrix");
}

extern "system" fn pop_matrix() {
    record("glPopMatrix");
}

extern "system" fn load_identity() {
    record("glLoadIdentity");
}

extern "system" fn load_matrixd(_m: *const f64) {
    record("glLoadMatrixd");
}

extern "system" fn mult_matrixd(_m: *const f64) {
    record("glMultMatrixd");
}

extern "system" fn translated(_x: f64, _y: f64, _z: f64) {
    record("glTranslated");
}

extern "system" fn scaled(_x: f64, _y: f64, _z: f64) {
    record("glScaled");
}

extern "system" fn rotated(_angle: f64, _x: f64, _y: f64, _z: f64) {
    record("glRotated");
}

extern "system" fn ortho(_l: f64, _r: f64, _b: f64, _t: f64, _n: f64, _f: f64) {
    record("glOrtho");
}

extern "system" fn frustum(_l: f64, _r: f64, _b: f64, _t: f64, _n: f64, _f: f64) {
    record("glFrustum");
}

fn set_pointer(key: u32, size: i32, stride: i32, ptr: *const c_void) {
    with(|s| {
        let buffer = s.bound.get(&consts::ARRAY_BUFFER).copied().unwrap_or(0);
        let vao = s.vao;
        s.pointers.insert((vao, key), Pointer { size, stride, ptr: ptr as usize, buffer });
    });
}

extern "system" fn vertex_pointer(size: i32, _ty: u32, stride: i32, ptr: *const c_void) {
    record("glVertexPointer");
    set_pointer(consts::VERTEX_ARRAY, size, stride, ptr);
}

extern "system" fn normal_pointer(_ty: u32, stride: i32, ptr: *const c_void) {
    record("glNormalPointer");
    set_pointer(consts::NORMAL_ARRAY, 3, stride, ptr);
}

extern "system" fn color_pointer(size: i32, _ty: u32, stride: i32, ptr: *const c_void) {
    record("glColorPointer");
    set_pointer(consts::COLOR_ARRAY, size, stride, ptr);
}

extern "system" fn tex_coord_pointer(size: i32, _ty: u32, stride: i32, ptr: *const c_void) {
    record("glTexCoordPointer");
    set_pointer(consts::TEXTURE_COORD_ARRAY, size, stride, ptr);
}

// ── buffer objects ────────────────────────────────────────────────────────

extern "system" fn gen_buffers(n: i32, out: *mut u32) {
    record("glGenBuffers");
    with(|s| {
        for i in 0..n as usize {
            let name = s.gen_name();
            unsafe { *out.add(i) = name };
        }
    });
}

extern "system" fn delete_buffers(n: i32, names: *const u32) {
    record("glDeleteBuffers");
    with(|s| {
        for i in 0..n as usize {
            s.buffers.remove(&unsafe { *names.add(i) });
        }
    });
}

extern "system" fn bind_buffer(target: u32, buffer: u32) {
    record("glBindBuffer");
    with(|s| {
        if target == consts::ELEMENT_ARRAY_BUFFER {
            let vao = s.vao;
            s.elements.insert(vao, buffer);
        } else {
            s.bound.insert(target, buffer);
        }
    });
}

extern "system" fn buffer_data(target: u32, size: isize, data: *const c_void, _usage: u32) {
    record("glBufferData");
    let bytes = if data.is_null() {
        vec![0; size as usize]
    } else {
        unsafe { std::slice::from_raw_parts(data as *const u8, size as usize) }.to_vec()
    };
    with(|s| match s.binding(target) {
        name if name != 0 => {
            s.buffers.insert(name, bytes);
        }
        _ => s.calls.push("glBufferData: no buffer bound"),
    });
}

extern "system" fn buffer_sub_data(target: u32, offset: isize, size: isize, data: *const c_void) {
    record("glBufferSubData");
    let src = unsafe { std::slice::from_raw_parts(data as *const u8, size as usize) };
    with(|s| {
        let name = s.binding(target);
        let (start, end) = (offset as usize, offset as usize + size as usize);
        match s.buffers.get_mut(&name).and_then(|b| b.get_mut(start..end)) {
            Some(dst) => dst.copy_from_slice(src),
            None => s.calls.push("glBufferSubData: range outside storage"),
        }
    });
}

// ── generic attributes ────────────────────────────────────────────────────

extern "system" fn vertex_attrib_pointer(
    index: u32,
    size: i32,
    _ty: u32,
    _normalized: u8,
    stride: i32,
    ptr: *const c_void,
) {
    record("glVertexAttribPointer");
    set_pointer(attrib_key(index), size, stride, ptr);
}

extern "system" fn enable_vertex_attrib_array(index: u32) {
    record("glEnableVertexAttribArray");
    with(|s| {
        let vao = s.vao;
        s.attribs.entry(vao).or_default().insert(index);
    });
}

extern "system" fn disable_vertex_attrib_array(index: u32) {
    record("glDisableVertexAttribArray");
    with(|s| {
        let vao = s.vao;
        s.attribs.entry(vao).or_default().remove(&index);
    });
}

// ── shader objects ────────────────────────────────────────────────────────

extern "system" fn create_shader(_ty: u32) -> u32 {
    record("glCreateShader");
    with(|s| s.gen_name())
}

extern "system" fn delete_shader(_shader: u32) {
    record("glDeleteShader");
}

extern "system" fn shader_source(_shader: u32, count: i32, src: *const *const c_char, _len: *const i32) {
    record("glShaderSource");
    for i in 0..count as usize {
        let text = unsafe { CStr::from_ptr(*src.add(i)) }.to_string_lossy().into_owned();
        with(|s| s.sources.push(text));
    }
}

extern "system" fn compile_shader(_shader: u32) {
    record("glCompileShader");
}

fn write_status(out: *mut i32, pname: u32, failed: bool, log: &[u8]) {
    let value = match pname {
        consts::COMPILE_STATUS | consts::LINK_STATUS => i32::from(!failed),
        consts::INFO_LOG_LENGTH if failed => log.len() as i32,
        _ => 0,
    };
    unsafe { *out = value };
}

fn write_log(cap: i32, len: *mut i32, out: *mut c_char, log: &[u8]) {
    let n = log.len().min(cap as usize);
    unsafe {
        std::ptr::copy_nonoverlapping(log.as_ptr() as *const c_char, out, n);
        if !len.is_null() {
            // the written length excludes the terminator
            *len = n.saturating_sub(1) as i32;
        }
    }
}

extern "system" fn get_shaderiv(_shader: u32, pname: u32, out: *mut i32) {
    record("glGetShaderiv");
    let failed = with(|s| s.fail_compile);
    write_status(out, pname, failed, COMPILE_LOG);
}

extern "system" fn get_shader_info_log(_shader: u32, cap: i32, len: *mut i32, out: *mut c_char) {
    record("glGetShaderInfoLog");
    write_log(cap, len, out, COMPILE_LOG);
}

extern "system" fn create_program() -> u32 {
    record("glCreateProgram");
    with(|s| s.gen_name())
}

extern "system" fn delete_program(_program: u32) {
    record("glDeleteProgram");
}

extern "system" fn attach_shader(_program: u32, _shader: u32) {
    record("glAttachShader");
}

extern "system" fn link_program(_program: u32) {
    record("glLinkProgram");
}

extern "system" fn get_programiv(_program: u32, pname: u32, out: *mut i32) {
    record("glGetProgramiv");
    let failed = with(|s| s.fail_link);
    write_status(out, pname, failed, LINK_LOG);
}

extern "system" fn get_program_info_log(_program: u32, cap: i32, len: *mut i32, out: *mut c_char) {
    record("glGetProgramInfoLog");
    write_log(cap, len, out, LINK_LOG);
}

extern "system" fn use_program(program: u32) {
    record("glUseProgram");
    with(|s| s.program = program);
}

extern "system" fn get_uniform_location(_program: u32, name: *const c_char) -> i32 {
    record("glGetUniformLocation");
    match unsafe { CStr::from_ptr(name) }.to_bytes() {
        b"u_ModelView" => MODELVIEW_LOCATION,
        b"u_Projection" => PROJECTION_LOCATION,
        _ => -1,
    }
}

extern "system" fn uniform1i(_location: i32, _v: i32) {
    record("glUniform1i");
}

extern "system" fn uniform1f(_location: i32, _v: f32) {
    record("glUniform1f");
}

extern "system" fn uniform4f(_location: i32, _x: f32, _y: f32, _z: f32, _w: f32) {
    record("glUniform4f");
}

extern "system" fn uniform_matrix4fv(location: i32, _count: i32, _transpose: u8, m: *const f32) {
    record("glUniformMatrix4fv");
    let mut values = [0.0f32; 16];
    values.copy_from_slice(unsafe { std::slice::from_raw_parts(m, 16) });
    with(|s| s.uniforms.insert(location, values));
}

// ── vertex array objects ──────────────────────────────────────────────────

extern "system" fn gen_vertex_arrays(n: i32, out: *mut u32) {
    record("glGenVertexArrays");
    with(|s| {
        for i in 0..n as usize {
            let name = s.gen_name();
            unsafe { *out.add(i) = name };
        }
    });
}

extern "system" fn delete_vertex_arrays(_n: i32, _names: *const u32) {
    record("glDeleteVertexArrays");
}

extern "system" fn bind_vertex_array(array: u32) {
    record("glBindVertexArray");
    with(|s| s.vao = array);
}
