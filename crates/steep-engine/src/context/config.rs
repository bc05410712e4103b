use crate::buffer::BufferUsage;
use crate::caps::BindingTier;
use crate::driver::ClearFlags;

/// Initialization parameters for a [`Context`](super::Context).
///
/// Every field has a working default; most callers only set `preferred_tier`
/// when testing a specific driver path.
#[derive(Debug, Clone)]
pub struct Config {
    /// Requested driver version as `(major, minor)`.
    ///
    /// `(0, 0)` adopts whatever the driver reports.
    pub version: (u32, u32),

    /// Expect an embedded-profile driver.
    ///
    /// Overridden by the version string when the driver reports one.
    pub es: bool,

    /// Shading-language version directive for programs built by the caller.
    pub glsl_version: Option<String>,

    /// Binding tier to use when the driver supports it.
    ///
    /// Unsupported requests fall back to the detected best tier.
    pub preferred_tier: Option<BindingTier>,

    /// Initial size of the immediate-mode vertex buffer, in bytes.
    pub vertex_buffer_size: usize,

    /// Storage hint for the immediate-mode vertex buffer.
    pub vertex_buffer_usage: BufferUsage,

    /// Initial size of the immediate-mode index buffer, in bytes.
    pub index_buffer_size: usize,

    /// Storage hint for the immediate-mode index buffer.
    pub index_buffer_usage: BufferUsage,

    /// Planes cleared by `clear`.
    pub clear_flags: ClearFlags,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: (0, 0),
            es: false,
            glsl_version: None,
            preferred_tier: None,
            vertex_buffer_size: 4000,
            vertex_buffer_usage: BufferUsage::DynamicDraw,
            index_buffer_size: 6000,
            index_buffer_usage: BufferUsage::DynamicDraw,
            clear_flags: ClearFlags::default(),
        }
    }
}
