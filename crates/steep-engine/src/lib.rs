//! Steep engine crate.
//!
//! Immediate-mode 2D/3D drawing on top of an OpenGL driver whose entry points
//! are resolved at run time. The driver's capabilities decide how vertices are
//! bound and where transform state lives; callers see one API either way.
//!
//! ```no_run
//! use steep_engine::context::{Config, Context};
//! use steep_engine::immediate::Primitive;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut ctx = Context::load(Config::default())?;
//! ctx.clear();
//! ctx.begin(Primitive::Triangles);
//! ctx.color3f(1.0, 0.0, 0.0);
//! ctx.vertex2f(0.0, 0.5);
//! ctx.vertex2f(-0.5, -0.5);
//! ctx.vertex2f(0.5, -0.5);
//! ctx.end()?;
//! ctx.quit();
//! # Ok(())
//! # }
//! ```

pub mod buffer;
pub mod caps;
pub mod context;
pub mod driver;
pub mod error;
pub mod immediate;
pub mod loader;
pub mod logging;
pub mod matrix;
pub mod shader;
pub mod texture;
pub mod vertex;

#[cfg(test)]
mod testing;

pub use context::{Config, Context};
pub use error::{Error, Result};
