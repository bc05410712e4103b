use std::collections::TryReserveError;

/// Recoverable failures surfaced by the engine.
///
/// Contract violations (stack misuse, calling an unresolved entry point, using a
/// freed buffer) are not represented here; they panic at the offending call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No candidate driver module could be opened.
    #[error("no OpenGL driver module found (tried: {tried})")]
    DriverNotFound { tried: String },

    /// The driver did not report a version string.
    #[error("driver returned no GL_VERSION string")]
    MissingVersion,

    /// Growing a shadow buffer failed to allocate.
    #[error("failed to grow buffer shadow to {requested} bytes")]
    Alloc {
        requested: usize,
        #[source]
        source: TryReserveError,
    },

    /// A shader stage failed to compile.
    #[error("{stage} shader compile error: {log}")]
    ShaderCompile { stage: &'static str, log: String },

    /// A program failed to link.
    #[error("program link error: {log}")]
    ProgramLink { log: String },

    /// A texture was requested with an empty extent.
    #[error("invalid texture size {width}x{height}")]
    TextureSize { width: u32, height: u32 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
