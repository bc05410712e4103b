use crate::buffer::BufferId;
use crate::driver::consts;
use crate::error::Error;
use crate::vertex::{Semantic, VertexArrayId, VertexFormat};

/// Primitive assembled from the vertices of one `begin`/`end` pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Primitive {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl Primitive {
    pub fn to_gl(self) -> u32 {
        match self {
            Self::Points => consts::POINTS,
            Self::Lines => consts::LINES,
            Self::LineLoop => consts::LINE_LOOP,
            Self::LineStrip => consts::LINE_STRIP,
            Self::Triangles => consts::TRIANGLES,
            Self::TriangleStrip => consts::TRIANGLE_STRIP,
            Self::TriangleFan => consts::TRIANGLE_FAN,
        }
    }
}

/// Per-vertex attributes latched until the next `vertex*` call.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VertexRecord {
    pub color: [f32; 4],
    pub texcoord: [f32; 2],
    pub normal: [f32; 3],
}

impl Default for VertexRecord {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            texcoord: [0.0, 0.0],
            normal: [0.0, 0.0, 1.0],
        }
    }
}

/// Largest vertex any format can describe, in floats.
const MAX_FLOATS: usize = 4 + 4 + 2 + 3;

impl VertexRecord {
    /// Lays out one vertex for `format`: each attribute in declaration order,
    /// taking position from `position` and the rest from the record.
    ///
    /// Returns the scratch array and how many floats of it are used.
    pub fn encode(&self, format: &VertexFormat, position: [f32; 4]) -> ([f32; MAX_FLOATS], usize) {
        let mut out = [0.0; MAX_FLOATS];
        let mut n = 0;
        for attrib in format.attribs() {
            let src: &[f32] = match attrib.semantic {
                Semantic::Position2D => &position[..2],
                Semantic::Position3D => &position[..3],
                Semantic::Position4D => &position,
                Semantic::Color => &self.color,
                Semantic::TexCoord => &self.texcoord,
                Semantic::Normal => &self.normal,
            };
            out[n..n + src.len()].copy_from_slice(src);
            n += src.len();
        }
        (out, n)
    }
}

/// Layout of the built-in immediate-mode vertex array.
pub fn immediate_format() -> VertexFormat {
    VertexFormat::new()
        .with(Semantic::Position3D)
        .with(Semantic::Color)
        .with(Semantic::TexCoord)
        .with(Semantic::Normal)
}

/// State of the immediate-mode front end.
pub(crate) struct Immediate {
    pub array: VertexArrayId,
    pub vertex_buffer: BufferId,
    pub index_buffer: BufferId,
    pub record: VertexRecord,
    /// Set between `begin` and `end`.
    pub primitive: Option<Primitive>,
    /// Vertex array to restore at `end`.
    pub resume: Option<VertexArrayId>,
    /// First growth failure inside the current pair, reported by `end`.
    pub failed: Option<Error>,
}

impl Immediate {
    pub fn new(array: VertexArrayId, vertex_buffer: BufferId, index_buffer: BufferId) -> Self {
        Self {
            array,
            vertex_buffer,
            index_buffer,
            record: VertexRecord::default(),
            primitive: None,
            resume: None,
            failed: None,
        }
    }
}
