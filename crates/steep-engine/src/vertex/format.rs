use crate::driver::consts;

/// Maximum number of attributes in one format.
pub const MAX_ATTRIBS: usize = 8;

/// Meaning of one vertex attribute. Every attribute is stored as `f32`s.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Semantic {
    Position2D,
    Position3D,
    Position4D,
    Color,
    TexCoord,
    Normal,
}

impl Semantic {
    pub const fn components(self) -> usize {
        match self {
            Self::Position2D | Self::TexCoord => 2,
            Self::Position3D | Self::Normal => 3,
            Self::Position4D | Self::Color => 4,
        }
    }

    /// Size in bytes.
    pub const fn size(self) -> usize {
        self.components() * size_of::<f32>()
    }

    /// Fixed-function client array fed by this semantic.
    pub const fn client_array(self) -> u32 {
        match self {
            Self::Position2D | Self::Position3D | Self::Position4D => consts::VERTEX_ARRAY,
            Self::Color => consts::COLOR_ARRAY,
            Self::TexCoord => consts::TEXTURE_COORD_ARRAY,
            Self::Normal => consts::NORMAL_ARRAY,
        }
    }

    #[inline]
    pub const fn is_position(self) -> bool {
        matches!(self, Self::Position2D | Self::Position3D | Self::Position4D)
    }
}

/// One attribute placed at a byte offset inside the vertex.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Attrib {
    pub semantic: Semantic,
    pub offset: usize,
}

const UNUSED: Attrib = Attrib { semantic: Semantic::Position3D, offset: 0 };

/// Ordered, interleaved attribute layout.
///
/// Offsets are assigned in declaration order and the stride is their sum, so
/// a vertex is written as its attributes back to back. Each client array
/// slot is fed by at most one attribute, hence at most one position.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct VertexFormat {
    attribs: [Attrib; MAX_ATTRIBS],
    len: usize,
    stride: usize,
}

impl VertexFormat {
    /// Empty layout.
    pub const fn new() -> Self {
        Self { attribs: [UNUSED; MAX_ATTRIBS], len: 0, stride: 0 }
    }

    /// Appends `semantic` at the current stride.
    ///
    /// Panics past [`MAX_ATTRIBS`] or when the client array it feeds is
    /// already taken.
    pub fn push(&mut self, semantic: Semantic) -> &mut Self {
        assert!(self.len < MAX_ATTRIBS, "vertex format holds at most {MAX_ATTRIBS} attributes");
        assert!(
            !self.attribs().iter().any(|a| a.semantic.client_array() == semantic.client_array()),
            "{semantic:?} conflicts with an attribute already in the format"
        );
        self.attribs[self.len] = Attrib { semantic, offset: self.stride };
        self.len += 1;
        self.stride += semantic.size();
        self
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, semantic: Semantic) -> Self {
        self.push(semantic);
        self
    }

    #[inline]
    pub fn attribs(&self) -> &[Attrib] {
        &self.attribs[..self.len]
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, semantic: Semantic) -> bool {
        self.attribs().iter().any(|a| a.semantic == semantic)
    }

    pub fn position(&self) -> Option<Attrib> {
        self.attribs().iter().copied().find(|a| a.semantic.is_position())
    }
}

impl Default for VertexFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VertexFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VertexFormat")
            .field("attribs", &self.attribs())
            .field("stride", &self.stride)
            .finish()
    }
}
