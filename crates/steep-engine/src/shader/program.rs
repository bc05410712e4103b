use std::ffi::{CString, c_char};

use crate::driver::{Gl, consts};
use crate::error::{Error, Result};

/// A linked shader program.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Program(u32);

impl Program {
    #[inline]
    pub fn handle(&self) -> u32 {
        self.0
    }
}

/// Name of the model-view uniform uploaded at `begin`.
pub const MODELVIEW_UNIFORM: &str = "u_ModelView";

/// Name of the projection uniform uploaded at `begin`.
pub const PROJECTION_UNIFORM: &str = "u_Projection";

/// Compiles both stages and links them.
///
/// The stage objects are deleted once the program is linked (or has failed
/// to). Failures carry the driver's info log.
pub(crate) fn compile_program(gl: &Gl, vertex_src: &str, fragment_src: &str) -> Result<Program> {
    let vertex = compile_stage(gl, consts::VERTEX_SHADER, "vertex", vertex_src)?;
    let fragment = match compile_stage(gl, consts::FRAGMENT_SHADER, "fragment", fragment_src) {
        Ok(fragment) => fragment,
        Err(e) => {
            // SAFETY: `vertex` came from `create_shader`.
            unsafe { gl.delete_shader(vertex) };
            return Err(e);
        }
    };

    // SAFETY: both stages are live shader objects.
    let (program, linked) = unsafe {
        let program = gl.create_program();
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);
        gl.delete_shader(vertex);
        gl.delete_shader(fragment);

        let mut status = 0;
        gl.get_programiv(program, consts::LINK_STATUS, &mut status);
        (program, status != 0)
    };

    if !linked {
        let log = info_log(
            |pname, out| unsafe { gl.get_programiv(program, pname, out) },
            |cap, len, buf| unsafe { gl.get_program_info_log(program, cap, len, buf) },
        );
        // SAFETY: `program` came from `create_program`.
        unsafe { gl.delete_program(program) };
        return Err(Error::ProgramLink { log });
    }

    log::debug!("linked program {program}");
    Ok(Program(program))
}

/// Interior NULs cannot reach the driver; only the text before the first one
/// is compiled.
fn stage_source(stage: &'static str, source: &str) -> CString {
    let text = match source.find('\0') {
        Some(at) => {
            log::warn!("{stage} shader source truncated at interior NUL (byte {at} of {})", source.len());
            &source[..at]
        }
        None => source,
    };
    CString::new(text).unwrap_or_default()
}

fn compile_stage(gl: &Gl, kind: u32, stage: &'static str, source: &str) -> Result<u32> {
    let text = stage_source(stage, source);

    // SAFETY: `text` outlives the calls; a null length array means
    // NUL-terminated sources.
    let (shader, compiled) = unsafe {
        let shader = gl.create_shader(kind);
        let ptr = text.as_ptr();
        gl.shader_source(shader, 1, &ptr, std::ptr::null());
        gl.compile_shader(shader);

        let mut status = 0;
        gl.get_shaderiv(shader, consts::COMPILE_STATUS, &mut status);
        (shader, status != 0)
    };

    if !compiled {
        let log = info_log(
            |pname, out| unsafe { gl.get_shaderiv(shader, pname, out) },
            |cap, len, buf| unsafe { gl.get_shader_info_log(shader, cap, len, buf) },
        );
        // SAFETY: `shader` came from `create_shader`.
        unsafe { gl.delete_shader(shader) };
        return Err(Error::ShaderCompile { stage, log });
    }

    Ok(shader)
}

/// Reads an info log through the object's `get_*iv` / `get_*_info_log` pair.
fn info_log(get_iv: impl Fn(u32, &mut i32), get_log: impl Fn(i32, *mut i32, *mut c_char)) -> String {
    let mut cap = 0;
    get_iv(consts::INFO_LOG_LENGTH, &mut cap);
    if cap <= 0 {
        return String::new();
    }

    let mut buf = vec![0u8; cap as usize];
    let mut len = 0;
    get_log(cap, &mut len, buf.as_mut_ptr() as *mut c_char);
    buf.truncate(len.clamp(0, cap) as usize);
    String::from_utf8_lossy(&buf).into_owned()
}

pub(crate) fn use_program(gl: &Gl, program: Option<&Program>) {
    // SAFETY: 0 unbinds; any other value is a linked program.
    unsafe { gl.use_program(program.map_or(0, Program::handle)) };
}

pub(crate) fn free_program(gl: &Gl, program: Program) {
    // SAFETY: `program` came from `create_program` and is consumed here.
    unsafe { gl.delete_program(program.0) };
}

/// Location of `name` in `program`, or `None` when the program does not
/// expose it.
pub(crate) fn uniform_location(gl: &Gl, program: &Program, name: &str) -> Option<i32> {
    location(gl, program.0, name)
}

pub(crate) fn location(gl: &Gl, program: u32, name: &str) -> Option<i32> {
    let name = CString::new(name).ok()?;
    // SAFETY: `name` is NUL-terminated and outlives the call.
    let location = unsafe { gl.get_uniform_location(program, name.as_ptr()) };
    (location != -1).then_some(location)
}
