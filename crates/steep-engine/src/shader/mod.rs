//! Shader programs, compiled through the loaded driver.

mod program;

pub use program::{MODELVIEW_UNIFORM, PROJECTION_UNIFORM, Program};
pub(crate) use program::{compile_program, free_program, location, uniform_location, use_program};
