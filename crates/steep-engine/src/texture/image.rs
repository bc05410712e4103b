use std::ffi::c_void;

use crate::driver::{Gl, consts};
use crate::error::{Error, Result};

/// Component layout of uploaded pixel data, one byte per component.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Alpha,
    Rgb,
    Rgba,
}

impl PixelFormat {
    pub fn to_gl(self) -> u32 {
        match self {
            Self::Alpha => consts::ALPHA,
            Self::Rgb => consts::RGB,
            Self::Rgba => consts::RGBA,
        }
    }

    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Alpha => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// A 2D texture object.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Texture {
    handle: u32,
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl Texture {
    #[inline]
    pub fn handle(&self) -> u32 {
        self.handle
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }
}

/// Creates a texture with nearest filtering and clamp-to-edge wrapping and
/// uploads `pixels`, leaving it bound.
///
/// `pixels` may be `None` for uninitialized storage; otherwise it must hold at
/// least `width * height` pixels of `format`.
pub(crate) fn create_texture_2d(
    gl: &Gl,
    pixels: Option<&[u8]>,
    width: u32,
    height: u32,
    format: PixelFormat,
) -> Result<Texture> {
    if width == 0 || height == 0 {
        return Err(Error::TextureSize { width, height });
    }
    if let Some(pixels) = pixels {
        let needed = width as usize * height as usize * format.bytes_per_pixel();
        assert!(
            pixels.len() >= needed,
            "{width}x{height} {format:?} texture needs {needed} bytes, got {}",
            pixels.len()
        );
    }

    let data = pixels.map_or(std::ptr::null(), |p| p.as_ptr() as *const c_void);
    let mut handle = 0;
    // SAFETY: `handle` is a valid out-pointer and `data` is either null or
    // covers the full image.
    unsafe {
        gl.gen_textures(1, &mut handle);
        gl.bind_texture(consts::TEXTURE_2D, handle);
        gl.tex_parameteri(consts::TEXTURE_2D, consts::TEXTURE_MIN_FILTER, consts::NEAREST as i32);
        gl.tex_parameteri(consts::TEXTURE_2D, consts::TEXTURE_MAG_FILTER, consts::NEAREST as i32);
        gl.tex_parameteri(consts::TEXTURE_2D, consts::TEXTURE_WRAP_S, consts::CLAMP_TO_EDGE as i32);
        gl.tex_parameteri(consts::TEXTURE_2D, consts::TEXTURE_WRAP_T, consts::CLAMP_TO_EDGE as i32);
        gl.tex_image_2d(
            consts::TEXTURE_2D,
            0,
            format.to_gl() as i32,
            width as i32,
            height as i32,
            0,
            format.to_gl(),
            consts::UNSIGNED_BYTE,
            data,
        );
    }

    log::debug!("created {width}x{height} {format:?} texture {handle}");
    Ok(Texture { handle, width, height, format })
}

pub(crate) fn bind_texture(gl: &Gl, texture: Option<&Texture>) {
    // SAFETY: 0 unbinds; any other value is a live texture.
    unsafe { gl.bind_texture(consts::TEXTURE_2D, texture.map_or(0, Texture::handle)) };
}

pub(crate) fn free_texture(gl: &Gl, texture: Texture) {
    // SAFETY: `texture.handle` came from `gen_textures` and is deleted once.
    unsafe { gl.delete_textures(1, &texture.handle) };
}
