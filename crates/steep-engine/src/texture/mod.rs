//! Texture objects built from decoded pixel data.
//!
//! Decoding lives outside this crate; callers hand over raw bytes with their
//! extent and component layout.

mod image;

pub use image::{PixelFormat, Texture};
pub(crate) use image::{bind_texture, create_texture_2d, free_texture};
