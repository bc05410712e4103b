/// One driver entry point and its name variants, core name first.
#[derive(Debug, Copy, Clone)]
pub struct ProcEntry {
    pub tag: ProcTag,
    pub names: &'static [&'static str],
}

impl ProcEntry {
    pub const fn new(tag: ProcTag, names: &'static [&'static str]) -> Self {
        assert!(!names.is_empty() && names.len() <= 3, "1 to 3 name variants per entry");
        Self { tag, names }
    }
}

macro_rules! proc_tags {
    ($($tag:ident => [$($name:literal),+ $(,)?],)*) => {
        /// Stable index of every driver entry point the engine may call.
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        #[repr(usize)]
        pub enum ProcTag {
            $($tag,)*
        }

        impl ProcTag {
            pub const ALL: &'static [ProcTag] = &[$(ProcTag::$tag,)*];
            pub const COUNT: usize = Self::ALL.len();

            #[inline]
            pub const fn index(self) -> usize {
                self as usize
            }

            /// Static resolution entry for this tag.
            #[inline]
            pub fn entry(self) -> &'static ProcEntry {
                &DRIVER_PROCS[self.index()]
            }
        }

        /// Resolution table for the whole tag set, ordered by tag index.
        pub static DRIVER_PROCS: &[ProcEntry] = &[
            $(ProcEntry::new(ProcTag::$tag, &[$($name),+]),)*
        ];
    };
}

proc_tags! {
    // ── state ─────────────────────────────────────────────────────────────
    ClearColor => ["glClearColor"],
    ClearDepth => ["glClearDepth"],
    Clear => ["glClear"],
    BlendFunc => ["glBlendFunc"],
    CullFace => ["glCullFace"],
    FrontFace => ["glFrontFace"],
    Scissor => ["glScissor"],
    Enable => ["glEnable"],
    Disable => ["glDisable"],
    EnableClientState => ["glEnableClientState"],
    DisableClientState => ["glDisableClientState"],
    GetString => ["glGetString"],
    GetIntegerv => ["glGetIntegerv"],
    GetError => ["glGetError"],
    DepthFunc => ["glDepthFunc"],
    DepthMask => ["glDepthMask"],
    DepthRange => ["glDepthRange"],
    Viewport => ["glViewport"],

    // ── fixed-function transforms ─────────────────────────────────────────
    MatrixMode => ["glMatrixMode"],
    PushMatrix => ["glPushMatrix"],
    PopMatrix => ["glPopMatrix"],
    LoadIdentity => ["glLoadIdentity"],
    LoadMatrixd => ["glLoadMatrixd"],
    MultMatrixd => ["glMultMatrixd"],
    Translated => ["glTranslated"],
    Scaled => ["glScaled"],
    Rotated => ["glRotated"],
    Ortho => ["glOrtho"],
    Frustum => ["glFrustum"],

    // ── client arrays ─────────────────────────────────────────────────────
    VertexPointer => ["glVertexPointer"],
    NormalPointer => ["glNormalPointer"],
    ColorPointer => ["glColorPointer"],
    TexCoordPointer => ["glTexCoordPointer"],
    DrawArrays => ["glDrawArrays"],
    DrawElements => ["glDrawElements"],

    // ── textures ──────────────────────────────────────────────────────────
    GenTextures => ["glGenTextures"],
    DeleteTextures => ["glDeleteTextures"],
    BindTexture => ["glBindTexture"],
    TexImage2D => ["glTexImage2D"],
    TexSubImage2D => ["glTexSubImage2D"],
    TexParameteri => ["glTexParameteri"],

    // ── buffer objects ────────────────────────────────────────────────────
    GenBuffers => ["glGenBuffers", "glGenBuffersARB"],
    DeleteBuffers => ["glDeleteBuffers", "glDeleteBuffersARB"],
    BindBuffer => ["glBindBuffer", "glBindBufferARB"],
    BufferData => ["glBufferData", "glBufferDataARB"],
    BufferSubData => ["glBufferSubData", "glBufferSubDataARB"],

    // ── generic vertex attributes ─────────────────────────────────────────
    VertexAttribPointer => ["glVertexAttribPointer", "glVertexAttribPointerARB"],
    EnableVertexAttribArray => ["glEnableVertexAttribArray", "glEnableVertexAttribArrayARB"],
    DisableVertexAttribArray => ["glDisableVertexAttribArray", "glDisableVertexAttribArrayARB"],

    // ── shader objects ────────────────────────────────────────────────────
    CreateShader => ["glCreateShader", "glCreateShaderObjectARB"],
    DeleteShader => ["glDeleteShader", "glDeleteObjectARB"],
    ShaderSource => ["glShaderSource", "glShaderSourceARB"],
    CompileShader => ["glCompileShader", "glCompileShaderARB"],
    GetShaderiv => ["glGetShaderiv", "glGetObjectParameterivARB"],
    GetShaderInfoLog => ["glGetShaderInfoLog", "glGetInfoLogARB"],
    CreateProgram => ["glCreateProgram", "glCreateProgramObjectARB"],
    DeleteProgram => ["glDeleteProgram", "glDeleteObjectARB"],
    AttachShader => ["glAttachShader", "glAttachObjectARB"],
    LinkProgram => ["glLinkProgram", "glLinkProgramARB"],
    GetProgramiv => ["glGetProgramiv", "glGetObjectParameterivARB"],
    GetProgramInfoLog => ["glGetProgramInfoLog", "glGetInfoLogARB"],
    UseProgram => ["glUseProgram", "glUseProgramObjectARB"],
    GetUniformLocation => ["glGetUniformLocation", "glGetUniformLocationARB"],
    Uniform1i => ["glUniform1i", "glUniform1iARB"],
    Uniform1f => ["glUniform1f", "glUniform1fARB"],
    Uniform4f => ["glUniform4f", "glUniform4fARB"],
    UniformMatrix4fv => ["glUniformMatrix4fv", "glUniformMatrix4fvARB"],

    // ── vertex array objects ──────────────────────────────────────────────
    GenVertexArrays => ["glGenVertexArrays", "glGenVertexArraysAPPLE", "glGenVertexArraysOES"],
    DeleteVertexArrays => ["glDeleteVertexArrays", "glDeleteVertexArraysAPPLE", "glDeleteVertexArraysOES"],
    BindVertexArray => ["glBindVertexArray", "glBindVertexArrayAPPLE", "glBindVertexArrayOES"],
}

/// Tags whose implementation is swapped for the in-process matrix stack on
/// drivers without fixed-function transforms.
pub const MATRIX_TAGS: [ProcTag; 11] = [
    ProcTag::MatrixMode,
    ProcTag::PushMatrix,
    ProcTag::PopMatrix,
    ProcTag::LoadIdentity,
    ProcTag::LoadMatrixd,
    ProcTag::MultMatrixd,
    ProcTag::Translated,
    ProcTag::Scaled,
    ProcTag::Rotated,
    ProcTag::Ortho,
    ProcTag::Frustum,
];
