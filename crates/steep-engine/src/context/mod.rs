//! The public entry point: driver initialization and the drawing facade.

mod config;
mod engine;
mod resources;

pub use config::Config;
pub use engine::Context;
