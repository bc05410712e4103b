use super::consts;

bitflags::bitflags! {
    /// Framebuffer planes cleared by `Context::clear`.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        const COLOR = consts::COLOR_BUFFER_BIT;
        const DEPTH = consts::DEPTH_BUFFER_BIT;
        const STENCIL = consts::STENCIL_BUFFER_BIT;
    }
}

impl Default for ClearFlags {
    fn default() -> Self {
        Self::COLOR | Self::DEPTH
    }
}

/// Server-side toggles exposed through `enable`/`disable`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Feature {
    Blend,
    CullFace,
    DepthTest,
    ScissorTest,
    Texture2D,
}

impl Feature {
    pub fn to_gl(self) -> u32 {
        match self {
            Self::Blend => consts::BLEND,
            Self::CullFace => consts::CULL_FACE,
            Self::DepthTest => consts::DEPTH_TEST,
            Self::ScissorTest => consts::SCISSOR_TEST,
            Self::Texture2D => consts::TEXTURE_2D,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
    DstColor,
    OneMinusDstColor,
}

impl BlendFactor {
    pub fn to_gl(self) -> u32 {
        match self {
            Self::Zero => consts::ZERO,
            Self::One => consts::ONE,
            Self::SrcColor => consts::SRC_COLOR,
            Self::OneMinusSrcColor => consts::ONE_MINUS_SRC_COLOR,
            Self::SrcAlpha => consts::SRC_ALPHA,
            Self::OneMinusSrcAlpha => consts::ONE_MINUS_SRC_ALPHA,
            Self::DstAlpha => consts::DST_ALPHA,
            Self::OneMinusDstAlpha => consts::ONE_MINUS_DST_ALPHA,
            Self::DstColor => consts::DST_COLOR,
            Self::OneMinusDstColor => consts::ONE_MINUS_DST_COLOR,
        }
    }
}

/// Depth comparison.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CompareFunc {
    Never,
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    Always,
}

impl CompareFunc {
    pub fn to_gl(self) -> u32 {
        match self {
            Self::Never => consts::NEVER,
            Self::Less => consts::LESS,
            Self::Equal => consts::EQUAL,
            Self::LessEqual => consts::LEQUAL,
            Self::Greater => consts::GREATER,
            Self::NotEqual => consts::NOTEQUAL,
            Self::GreaterEqual => consts::GEQUAL,
            Self::Always => consts::ALWAYS,
        }
    }
}

/// Polygon side selected for culling.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Face {
    Front,
    Back,
    FrontAndBack,
}

impl Face {
    pub fn to_gl(self) -> u32 {
        match self {
            Self::Front => consts::FRONT,
            Self::Back => consts::BACK,
            Self::FrontAndBack => consts::FRONT_AND_BACK,
        }
    }
}

/// Vertex order that makes a polygon front-facing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Winding {
    Clockwise,
    #[default]
    CounterClockwise,
}

impl Winding {
    pub fn to_gl(self) -> u32 {
        match self {
            Self::Clockwise => consts::CW,
            Self::CounterClockwise => consts::CCW,
        }
    }
}
