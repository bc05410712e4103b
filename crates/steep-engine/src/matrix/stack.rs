use super::mat4::{ClipBox, Matrix};
use crate::driver::consts;

/// Maximum stack depth per channel. A driver-backed channel may be capped
/// lower, see [`MatrixStack::limit_to`].
pub const MAX_DEPTH: usize = 32;

/// Which stack matrix operations act on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MatrixChannel {
    ModelView,
    Projection,
    Texture,
}

impl MatrixChannel {
    pub const ALL: [MatrixChannel; 3] = [Self::ModelView, Self::Projection, Self::Texture];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    pub fn to_gl(self) -> u32 {
        match self {
            Self::ModelView => consts::MODELVIEW,
            Self::Projection => consts::PROJECTION,
            Self::Texture => consts::TEXTURE,
        }
    }

    /// Driver query for this channel's stack depth.
    pub fn depth_query(self) -> u32 {
        match self {
            Self::ModelView => consts::MAX_MODELVIEW_STACK_DEPTH,
            Self::Projection => consts::MAX_PROJECTION_STACK_DEPTH,
            Self::Texture => consts::MAX_TEXTURE_STACK_DEPTH,
        }
    }
}

/// Bounded stack of matrices; `top` is the index of the current matrix.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    slots: [Matrix; MAX_DEPTH],
    top: usize,
    /// Levels usable, base matrix included.
    limit: usize,
}

impl MatrixStack {
    pub fn new() -> Self {
        Self { slots: [Matrix::IDENTITY; MAX_DEPTH], top: 0, limit: MAX_DEPTH }
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Caps the stack at `levels` (clamped to `1..=MAX_DEPTH`). Panics when
    /// more levels are already pushed.
    pub fn limit_to(&mut self, levels: usize) {
        let levels = levels.clamp(1, MAX_DEPTH);
        assert!(self.top < levels, "matrix stack already deeper than {levels}");
        self.limit = levels;
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.top
    }

    #[inline]
    pub fn current(&self) -> &Matrix {
        &self.slots[self.top]
    }

    #[inline]
    pub fn current_mut(&mut self) -> &mut Matrix {
        &mut self.slots[self.top]
    }

    /// Duplicates the current matrix one level up.
    ///
    /// Panics when the stack is full.
    pub fn push(&mut self) {
        assert!(self.top + 1 < self.limit, "matrix stack overflow");
        self.slots[self.top + 1] = self.slots[self.top];
        self.top += 1;
    }

    /// Panics when only the base matrix is left.
    pub fn pop(&mut self) {
        assert!(self.top > 0, "matrix stack underflow");
        self.top -= 1;
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

/// One transform operation, as dispatched through the procedure table.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MatrixCall {
    Mode(MatrixChannel),
    Push,
    Pop,
    LoadIdentity,
    Load(Matrix),
    Mult(Matrix),
    Translate(f64, f64, f64),
    Scale(f64, f64, f64),
    Rotate { degrees: f64, x: f64, y: f64, z: f64 },
    Ortho(ClipBox),
    Frustum(ClipBox),
}

/// In-process replacement for a fixed-function transform entry point.
pub type Shim = fn(&mut MatrixState, &MatrixCall);

/// The three channel stacks plus the selected mode.
#[derive(Debug, Clone)]
pub struct MatrixState {
    stacks: [MatrixStack; 3],
    mode: MatrixChannel,
}

impl MatrixState {
    pub fn new() -> Self {
        Self {
            stacks: [MatrixStack::new(), MatrixStack::new(), MatrixStack::new()],
            mode: MatrixChannel::ModelView,
        }
    }

    #[inline]
    pub fn mode(&self) -> MatrixChannel {
        self.mode
    }

    #[inline]
    pub fn stack(&self, channel: MatrixChannel) -> &MatrixStack {
        &self.stacks[channel.index()]
    }

    pub fn limit_depth(&mut self, channel: MatrixChannel, levels: usize) {
        self.stacks[channel.index()].limit_to(levels);
    }

    /// Top matrix of the selected channel.
    #[inline]
    pub fn current(&self) -> &Matrix {
        self.stacks[self.mode.index()].current()
    }

    /// Applies one operation to the selected channel.
    ///
    /// Products compose as `C × M`, so the most recently applied transform
    /// acts on vertices first.
    pub fn apply(&mut self, call: &MatrixCall) {
        if let MatrixCall::Mode(channel) = *call {
            self.mode = channel;
            return;
        }

        let stack = &mut self.stacks[self.mode.index()];
        let rhs = match *call {
            MatrixCall::Mode(_) => return,
            MatrixCall::Push => return stack.push(),
            MatrixCall::Pop => return stack.pop(),
            MatrixCall::LoadIdentity => {
                *stack.current_mut() = Matrix::IDENTITY;
                return;
            }
            MatrixCall::Load(m) => {
                *stack.current_mut() = m;
                return;
            }
            MatrixCall::Mult(m) => m,
            MatrixCall::Translate(x, y, z) => Matrix::translation(x, y, z),
            MatrixCall::Scale(x, y, z) => Matrix::scaling(x, y, z),
            MatrixCall::Rotate { degrees, x, y, z } => Matrix::rotation(degrees, x, y, z),
            MatrixCall::Ortho(b) => Matrix::ortho(b),
            MatrixCall::Frustum(b) => Matrix::frustum(b),
        };
        let current = stack.current_mut();
        *current = *current * rhs;
    }
}

impl Default for MatrixState {
    fn default() -> Self {
        Self::new()
    }
}
