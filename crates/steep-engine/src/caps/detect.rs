use crate::loader::{ProcTable, ProcTag};

bitflags::bitflags! {
    /// Feature families present on the loaded driver, each derived from one
    /// witness entry point.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct Capabilities: u32 {
        /// Server-side buffer storage (`glGenBuffers`).
        const BUFFER_OBJECTS = 1 << 0;
        /// Vertex array objects (`glGenVertexArrays`).
        const VERTEX_ARRAY_OBJECTS = 1 << 1;
        /// Programmable shaders (`glCreateShader`).
        const SHADER_OBJECTS = 1 << 2;
        /// Generic vertex attributes (`glVertexAttribPointer`).
        const GENERIC_ATTRIBS = 1 << 3;
        /// Fixed-function transforms (`glMatrixMode`).
        const LEGACY_MATRICES = 1 << 4;
        /// Fixed-function client arrays (`glEnableClientState`).
        const CLIENT_ARRAYS = 1 << 5;
    }
}

const WITNESSES: [(Capabilities, ProcTag); 6] = [
    (Capabilities::BUFFER_OBJECTS, ProcTag::GenBuffers),
    (Capabilities::VERTEX_ARRAY_OBJECTS, ProcTag::GenVertexArrays),
    (Capabilities::SHADER_OBJECTS, ProcTag::CreateShader),
    (Capabilities::GENERIC_ATTRIBS, ProcTag::VertexAttribPointer),
    (Capabilities::LEGACY_MATRICES, ProcTag::MatrixMode),
    (Capabilities::CLIENT_ARRAYS, ProcTag::EnableClientState),
];

/// How vertex attributes reach the driver.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BindingTier {
    /// Fixed-function client arrays with one enable per semantic.
    ClientArrays,
    /// Generic attributes re-pointed on every vertex array switch.
    GenericAttribs,
    /// Driver vertex array objects capture the attribute setup.
    VertexArrayObjects,
}

/// Where transform state lives.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MatrixBackend {
    Native,
    Emulated,
}

impl Capabilities {
    /// Reads the witness slots of a table filled by the first resolution pass.
    pub fn detect(table: &ProcTable) -> Self {
        WITNESSES
            .iter()
            .filter(|(_, tag)| table.is_loaded(*tag))
            .fold(Capabilities::empty(), |acc, (flag, _)| acc | *flag)
    }

    pub fn supports(self, tier: BindingTier) -> bool {
        match tier {
            BindingTier::ClientArrays => self.contains(Self::CLIENT_ARRAYS),
            BindingTier::GenericAttribs => self.contains(Self::GENERIC_ATTRIBS),
            BindingTier::VertexArrayObjects => {
                self.contains(Self::VERTEX_ARRAY_OBJECTS | Self::GENERIC_ATTRIBS | Self::BUFFER_OBJECTS)
            }
        }
    }

    /// Most capable tier the driver supports.
    pub fn best_tier(self) -> BindingTier {
        [BindingTier::VertexArrayObjects, BindingTier::GenericAttribs]
            .into_iter()
            .find(|&tier| self.supports(tier))
            .unwrap_or(BindingTier::ClientArrays)
    }

    /// Programmable drivers get the in-process stack so shaders can read the
    /// transforms as uniforms.
    pub fn matrix_backend(self) -> MatrixBackend {
        if self.contains(Self::SHADER_OBJECTS) || !self.contains(Self::LEGACY_MATRICES) {
            MatrixBackend::Emulated
        } else {
            MatrixBackend::Native
        }
    }
}
