use std::ffi::c_void;

use crate::driver::{Gl, consts};
use crate::error::{Error, Result};

/// Binding point a buffer is created for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    Vertex,
    Index,
}

impl BufferTarget {
    pub fn to_gl(self) -> u32 {
        match self {
            Self::Vertex => consts::ARRAY_BUFFER,
            Self::Index => consts::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// Driver storage hint.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    StreamDraw,
    StreamRead,
    StreamCopy,
    StaticDraw,
    StaticRead,
    StaticCopy,
    DynamicDraw,
    DynamicRead,
    DynamicCopy,
}

impl BufferUsage {
    pub fn to_gl(self) -> u32 {
        match self {
            Self::StreamDraw => consts::STREAM_DRAW,
            Self::StreamRead => consts::STREAM_READ,
            Self::StreamCopy => consts::STREAM_COPY,
            Self::StaticDraw => consts::STATIC_DRAW,
            Self::StaticRead => consts::STATIC_READ,
            Self::StaticCopy => consts::STATIC_COPY,
            Self::DynamicDraw => consts::DYNAMIC_DRAW,
            Self::DynamicRead => consts::DYNAMIC_READ,
            Self::DynamicCopy => consts::DYNAMIC_COPY,
        }
    }
}

/// Driver buffer paired with a host-side shadow of the same size.
///
/// Writes land in the shadow and grow it (and the driver storage) by doubling.
/// The driver copy is only brought up to date by [`flush`](Self::flush) and
/// the `send` family. Without buffer objects there is no driver handle and
/// the shadow is the only storage.
#[derive(Debug)]
pub struct Buffer {
    handle: Option<u32>,
    target: BufferTarget,
    usage: BufferUsage,
    shadow: Vec<u8>,
    cursor: usize,
}

impl Buffer {
    /// Creates a buffer of `size` bytes, zero-filled on the host side.
    ///
    /// `with_driver_storage` selects whether a driver buffer object backs it.
    /// Panics when `size` is zero.
    pub(crate) fn create(
        gl: &Gl,
        with_driver_storage: bool,
        target: BufferTarget,
        size: usize,
        usage: BufferUsage,
    ) -> Result<Self> {
        assert!(size > 0, "buffer size must be non-zero");

        let mut shadow = Vec::new();
        shadow
            .try_reserve_exact(size)
            .map_err(|source| Error::Alloc { requested: size, source })?;
        shadow.resize(size, 0);

        let handle = with_driver_storage.then(|| {
            let mut name = 0u32;
            // SAFETY: `name` is a valid out-pointer; the null data pointer
            // asks the driver for uninitialized storage.
            unsafe {
                gl.gen_buffers(1, &mut name);
                gl.bind_buffer(target.to_gl(), name);
                gl.buffer_data(target.to_gl(), size as isize, std::ptr::null(), usage.to_gl());
                gl.bind_buffer(target.to_gl(), 0);
            }
            name
        });

        Ok(Self { handle, target, usage, shadow, cursor: 0 })
    }

    #[inline]
    pub fn handle(&self) -> Option<u32> {
        self.handle
    }

    #[inline]
    pub fn target(&self) -> BufferTarget {
        self.target
    }

    #[inline]
    pub fn usage(&self) -> BufferUsage {
        self.usage
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.shadow.len()
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Bytes written so far, from the start of the shadow up to the cursor.
    #[inline]
    pub fn written(&self) -> &[u8] {
        &self.shadow[..self.cursor]
    }

    /// Base of the shadow, used for client-memory attribute pointers.
    #[inline]
    pub(crate) fn shadow_ptr(&self) -> *const u8 {
        self.shadow.as_ptr()
    }

    /// Moves the cursor, clamped to `[0, capacity]`.
    pub fn seek(&mut self, offset: usize) {
        self.cursor = offset.min(self.capacity());
    }

    /// Copies `min(out.len(), capacity - cursor)` bytes at the cursor into
    /// `out` and returns the count. The cursor does not move.
    pub fn read(&self, out: &mut [u8]) -> usize {
        let n = out.len().min(self.capacity() - self.cursor);
        out[..n].copy_from_slice(&self.shadow[self.cursor..self.cursor + n]);
        n
    }

    /// Appends `bytes` at the cursor, growing first if they do not fit.
    pub fn write(&mut self, gl: &Gl, bytes: &[u8]) -> Result<()> {
        let end = self.cursor + bytes.len();
        if end > self.capacity() {
            self.grow(gl, end)?;
        }
        self.shadow[self.cursor..end].copy_from_slice(bytes);
        self.cursor = end;
        Ok(())
    }

    /// Grow-only resize to at least `size` bytes. Panics on shrink.
    pub fn resize(&mut self, gl: &Gl, size: usize) -> Result<()> {
        assert!(size >= self.capacity(), "buffer resize cannot shrink ({} -> {size})", self.capacity());
        if size > self.capacity() {
            self.reallocate(gl, size)?;
        }
        Ok(())
    }

    /// Uploads the entire shadow to the driver.
    pub fn flush(&self, gl: &Gl) {
        self.upload(gl, 0, self.capacity());
    }

    /// Uploads the first `len` bytes.
    pub fn send(&self, gl: &Gl, len: usize) {
        self.send_range(gl, 0, len);
    }

    /// Uploads `[offset, offset + len)`, which must lie inside the written
    /// region.
    pub fn send_range(&self, gl: &Gl, offset: usize, len: usize) {
        assert!(
            offset + len <= self.cursor,
            "send range {offset}..{} past written bytes ({})",
            offset + len,
            self.cursor
        );
        self.upload(gl, offset, len);
    }

    pub(crate) fn release(self, gl: &Gl) {
        if let Some(name) = self.handle {
            // SAFETY: `name` was produced by `gen_buffers` and is deleted once.
            unsafe { gl.delete_buffers(1, &name) };
        }
    }

    fn upload(&self, gl: &Gl, offset: usize, len: usize) {
        let Some(name) = self.handle else { return };
        let target = self.target.to_gl();
        // SAFETY: the range lies inside the shadow, which outlives the call.
        unsafe {
            gl.bind_buffer(target, name);
            gl.buffer_sub_data(
                target,
                offset as isize,
                len as isize,
                self.shadow[offset..].as_ptr() as *const c_void,
            );
        }
    }

    /// Doubles the capacity until `required` fits.
    fn grow(&mut self, gl: &Gl, required: usize) -> Result<()> {
        let mut capacity = self.capacity();
        while capacity < required {
            capacity *= 2;
        }
        log::debug!("growing {:?} buffer {} -> {capacity} bytes", self.target, self.capacity());
        self.reallocate(gl, capacity)
    }

    fn reallocate(&mut self, gl: &Gl, size: usize) -> Result<()> {
        let old = self.capacity();
        self.shadow
            .try_reserve_exact(size - old)
            .map_err(|source| Error::Alloc { requested: size, source })?;

        if let Some(name) = self.handle {
            let target = self.target.to_gl();
            // SAFETY: the shadow still holds `old` valid bytes.
            unsafe {
                gl.bind_buffer(target, name);
                gl.buffer_data(target, size as isize, std::ptr::null(), self.usage.to_gl());
                gl.buffer_sub_data(target, 0, old as isize, self.shadow.as_ptr() as *const c_void);
            }
        }

        self.shadow.resize(size, 0);
        Ok(())
    }
}
