use std::ffi::{CStr, c_char};

use anyhow::{Context as _, Result};

use super::config::Config;
use crate::buffer::{Buffer, BufferId, BufferTarget, Pool};
use crate::caps::{BindingTier, Capabilities, DriverVersion, MatrixBackend};
use crate::driver::{BlendFactor, ClearFlags, CompareFunc, Face, Feature, Gl, Winding, consts};
use crate::error::Error;
use crate::immediate::{Immediate, immediate_format};
use crate::loader::{DRIVER_PROCS, DriverLibrary, FillPolicy, MATRIX_TAGS, ProcTable, ProcTag, SymbolSource};
use crate::matrix::{self, ClipBox, EmulatedMatrices, Matrix, MatrixCall, MatrixChannel, MatrixState};
use crate::vertex::{VertexArray, VertexArrayId, VertexBinder, VertexFormat, binder_for};

/// Entry points without which nothing can be drawn.
const REQUIRED: [ProcTag; 2] = [ProcTag::GetString, ProcTag::DrawArrays];

/// Owns the resolved driver and every piece of state layered on top of it.
///
/// All methods assume the driver context is current on the calling thread.
pub struct Context {
    pub(crate) gl: Gl,

    /// Kept open while addresses resolved from it may be called.
    library: Option<DriverLibrary>,

    caps: Capabilities,
    version: DriverVersion,
    glsl_version: Option<String>,
    backend: MatrixBackend,
    clear_flags: ClearFlags,

    /// Vertex binding strategy for the selected tier.
    pub(crate) binder: &'static dyn VertexBinder,

    pub(crate) matrices: MatrixState,
    pub(crate) buffers: Pool<Buffer>,
    pub(crate) arrays: Pool<VertexArray>,

    /// Vertex array selected by `bind_vertex_array`.
    pub(crate) current_array: Option<VertexArrayId>,

    /// Attributes currently enabled on the driver, for tiers that re-enable
    /// on every switch.
    pub(crate) applied: VertexFormat,

    pub(crate) immediate: Immediate,

    /// Program made current through `use_program`.
    pub(crate) program: Option<u32>,
}

impl Context {
    /// Opens the platform driver module and initializes on top of it.
    pub fn load(config: Config) -> Result<Self> {
        let library = DriverLibrary::open().context("failed to open the OpenGL driver")?;
        let mut ctx = Self::build(config, &library)?;
        ctx.library = Some(library);
        Ok(ctx)
    }

    /// Initializes against an arbitrary symbol source, typically the window
    /// provider's proc-address function wrapped in a `LoaderFn`.
    pub fn init(config: Config, source: &dyn SymbolSource) -> Result<Self> {
        Self::build(config, source)
    }

    fn build(config: Config, source: &dyn SymbolSource) -> Result<Self> {
        let mut table = ProcTable::new();
        let loaded = table.fill(DRIVER_PROCS, FillPolicy::IfEmpty, source);
        log::debug!("resolved {loaded}/{} driver entry points", ProcTag::COUNT);
        for tag in REQUIRED {
            anyhow::ensure!(table.is_loaded(tag), "driver does not export {}", tag.entry().names[0]);
        }

        let caps = Capabilities::detect(&table);
        let backend = caps.matrix_backend();
        if backend == MatrixBackend::Emulated {
            table.fill(MATRIX_TAGS.iter().map(|t| t.entry()), FillPolicy::Override, &EmulatedMatrices);
        }
        let gl = Gl::new(table);

        let driver_version = read_string(&gl, consts::VERSION)
            .and_then(|raw| DriverVersion::parse(&raw))
            .ok_or(Error::MissingVersion)
            .context("failed to read the driver version")?;
        let version = requested_version(&config, driver_version);
        let glsl_version = match config.glsl_version.clone() {
            Some(v) => Some(v),
            None if caps.contains(Capabilities::SHADER_OBJECTS) => {
                read_string(&gl, consts::SHADING_LANGUAGE_VERSION)
            }
            None => None,
        };

        log::info!("OpenGL {driver_version}");
        if let Some(glsl) = &glsl_version {
            log::info!("GLSL {glsl}");
        }
        for (name, _) in caps.iter_names() {
            log::debug!("capability: {name}");
        }
        for (flag, name) in [
            (Capabilities::BUFFER_OBJECTS, "glGenBuffers"),
            (Capabilities::VERTEX_ARRAY_OBJECTS, "glGenVertexArrays"),
            (Capabilities::SHADER_OBJECTS, "glCreateShader"),
        ] {
            if !caps.contains(flag) {
                log::debug!("{name} unresolved");
            }
        }

        let mut matrices = MatrixState::new();
        if backend == MatrixBackend::Native {
            matrix::mirror_driver_depths(&gl, &mut matrices);
        }

        let tier = select_tier(caps, config.preferred_tier);
        log::info!("binding tier {tier:?}, {backend:?} matrices");

        let with_buffers = caps.contains(Capabilities::BUFFER_OBJECTS);
        let with_vaos = tier == BindingTier::VertexArrayObjects;

        let mut buffers = Pool::new();
        let vertex = Buffer::create(
            &gl,
            with_buffers,
            BufferTarget::Vertex,
            config.vertex_buffer_size,
            config.vertex_buffer_usage,
        )
        .context("failed to create the immediate vertex buffer")?;
        let index = Buffer::create(
            &gl,
            with_buffers,
            BufferTarget::Index,
            config.index_buffer_size,
            config.index_buffer_usage,
        )
        .context("failed to create the immediate index buffer")?;
        let vertex = buffers.insert(vertex);
        let index = buffers.insert(index);

        let mut arrays = Pool::new();
        let array = arrays.insert(VertexArray::create(&gl, with_vaos));

        let mut ctx = Self {
            gl,
            library: None,
            caps,
            version,
            glsl_version,
            backend,
            clear_flags: config.clear_flags,
            binder: binder_for(tier),
            matrices,
            buffers,
            arrays,
            current_array: None,
            applied: VertexFormat::new(),
            immediate: Immediate::new(array, vertex, index),
            program: None,
        };

        ctx.matrix_mode(MatrixChannel::ModelView);
        ctx.load_identity();
        ctx.matrix_mode(MatrixChannel::Projection);
        ctx.load_identity();
        ctx.matrix_mode(MatrixChannel::ModelView);

        ctx.bind_vertex_array(Some(array));
        ctx.bind_buffer(vertex);
        ctx.bind_buffer(index);
        ctx.bind_format(immediate_format());
        ctx.bind_vertex_array(None);

        Ok(ctx)
    }

    /// Releases every buffer and vertex array still owned by the context.
    pub fn quit(mut self) {
        self.bind_vertex_array(None);
        for array in self.arrays.drain() {
            array.release(&self.gl);
        }
        for buffer in self.buffers.drain() {
            buffer.release(&self.gl);
        }
        if let Some(library) = self.library.take() {
            log::debug!("closing {}", library.path());
        }
    }

    // ── queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn gl(&self) -> &Gl {
        &self.gl
    }

    #[inline]
    pub fn caps(&self) -> Capabilities {
        self.caps
    }

    #[inline]
    pub fn version(&self) -> DriverVersion {
        self.version
    }

    #[inline]
    pub fn glsl_version(&self) -> Option<&str> {
        self.glsl_version.as_deref()
    }

    #[inline]
    pub fn tier(&self) -> BindingTier {
        self.binder.tier()
    }

    #[inline]
    pub fn matrix_backend(&self) -> MatrixBackend {
        self.backend
    }

    /// Vertex buffer behind `begin`/`end`.
    #[inline]
    pub fn immediate_vertex_buffer(&self) -> BufferId {
        self.immediate.vertex_buffer
    }

    /// Index buffer attached to the immediate vertex array.
    #[inline]
    pub fn immediate_index_buffer(&self) -> BufferId {
        self.immediate.index_buffer
    }

    // ── driver state ──────────────────────────────────────────────────────

    pub fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { self.gl.clear_color(r, g, b, a) };
    }

    /// Clears the planes selected by [`set_clear_flags`](Self::set_clear_flags).
    pub fn clear(&self) {
        unsafe { self.gl.clear(self.clear_flags.bits()) };
    }

    pub fn set_clear_flags(&mut self, flags: ClearFlags) {
        self.clear_flags = flags;
    }

    pub fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) };
    }

    pub fn scissor(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.scissor(x, y, width, height) };
    }

    pub fn enable(&self, feature: Feature) {
        unsafe { self.gl.enable(feature.to_gl()) };
    }

    pub fn disable(&self, feature: Feature) {
        unsafe { self.gl.disable(feature.to_gl()) };
    }

    pub fn blend_func(&self, src: BlendFactor, dst: BlendFactor) {
        unsafe { self.gl.blend_func(src.to_gl(), dst.to_gl()) };
    }

    pub fn depth_func(&self, func: CompareFunc) {
        unsafe { self.gl.depth_func(func.to_gl()) };
    }

    /// Picks the side discarded while [`Feature::CullFace`] is enabled.
    pub fn cull_face(&self, face: Face) {
        unsafe { self.gl.cull_face(face.to_gl()) };
    }

    pub fn front_face(&self, winding: Winding) {
        unsafe { self.gl.front_face(winding.to_gl()) };
    }

    // ── transforms ────────────────────────────────────────────────────────

    fn transform(&mut self, call: MatrixCall) {
        matrix::dispatch(&self.gl, &mut self.matrices, call);
    }

    pub fn matrix_mode(&mut self, channel: MatrixChannel) {
        self.transform(MatrixCall::Mode(channel));
    }

    /// Panics when the selected channel is already at its maximum depth.
    pub fn push_matrix(&mut self) {
        self.transform(MatrixCall::Push);
    }

    /// Panics when only the base matrix remains.
    pub fn pop_matrix(&mut self) {
        self.transform(MatrixCall::Pop);
    }

    pub fn load_identity(&mut self) {
        self.transform(MatrixCall::LoadIdentity);
    }

    pub fn load_matrix(&mut self, m: Matrix) {
        self.transform(MatrixCall::Load(m));
    }

    pub fn mult_matrix(&mut self, m: Matrix) {
        self.transform(MatrixCall::Mult(m));
    }

    pub fn translate(&mut self, x: f64, y: f64, z: f64) {
        self.transform(MatrixCall::Translate(x, y, z));
    }

    pub fn scale(&mut self, x: f64, y: f64, z: f64) {
        self.transform(MatrixCall::Scale(x, y, z));
    }

    /// Rotates by `degrees` around the axis `(x, y, z)`.
    pub fn rotate(&mut self, degrees: f64, x: f64, y: f64, z: f64) {
        self.transform(MatrixCall::Rotate { degrees, x, y, z });
    }

    pub fn ortho(&mut self, clip: ClipBox) {
        self.transform(MatrixCall::Ortho(clip));
    }

    pub fn frustum(&mut self, clip: ClipBox) {
        self.transform(MatrixCall::Frustum(clip));
    }

    /// Multiplies in a symmetric perspective projection.
    pub fn perspective(&mut self, fovy_degrees: f64, aspect: f64, near: f64, far: f64) {
        self.mult_matrix(Matrix::perspective(fovy_degrees, aspect, near, far));
    }

    pub fn current_matrix_mode(&self) -> MatrixChannel {
        self.matrices.mode()
    }

    /// Top of the selected channel.
    pub fn current_matrix(&self) -> &Matrix {
        self.matrices.current()
    }

    /// Top of `channel`, regardless of the selected mode.
    pub fn matrix(&self, channel: MatrixChannel) -> &Matrix {
        self.matrices.stack(channel).current()
    }
}

fn read_string(gl: &Gl, name: u32) -> Option<String> {
    // SAFETY: the driver returns either null or a static NUL-terminated string.
    unsafe {
        let ptr = gl.get_string(name);
        (!ptr.is_null()).then(|| CStr::from_ptr(ptr as *const c_char).to_string_lossy().into_owned())
    }
}

/// Applies the configured version hint on top of what the driver reports.
fn requested_version(config: &Config, driver: DriverVersion) -> DriverVersion {
    let (major, minor) = config.version;
    if (major, minor) == (0, 0) {
        return driver;
    }
    if !driver.at_least(major, minor) {
        log::warn!("requested OpenGL {major}.{minor} but the driver reports {driver}");
    }
    DriverVersion { major, minor, es: config.es || driver.es }
}

fn select_tier(caps: Capabilities, preferred: Option<BindingTier>) -> BindingTier {
    let best = caps.best_tier();
    match preferred {
        Some(tier) if caps.supports(tier) => tier,
        Some(tier) => {
            log::warn!("binding tier {tier:?} is not supported, using {best:?}");
            best
        }
        None => best,
    }
}
