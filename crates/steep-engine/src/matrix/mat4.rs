use std::ops::Mul;

/// 4×4 transform, column-major (`m[col * 4 + row]`), double precision.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Matrix(pub [f64; 16]);

/// Axis-aligned view volume for [`Matrix::ortho`] and [`Matrix::frustum`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClipBox {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub near: f64,
    pub far: f64,
}

impl ClipBox {
    pub const fn new(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        Self { left, right, bottom, top, near, far }
    }
}

impl Matrix {
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);

    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.0[col * 4 + row]
    }

    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        let mut m = Self::IDENTITY;
        m.0[12] = x;
        m.0[13] = y;
        m.0[14] = z;
        m
    }

    pub fn scaling(x: f64, y: f64, z: f64) -> Self {
        let mut m = Self::IDENTITY;
        m.0[0] = x;
        m.0[5] = y;
        m.0[10] = z;
        m
    }

    /// Counter-clockwise rotation of `degrees` around `(x, y, z)`.
    ///
    /// The axis is normalized; a zero axis yields the identity.
    pub fn rotation(degrees: f64, x: f64, y: f64, z: f64) -> Self {
        let len = (x * x + y * y + z * z).sqrt();
        if len == 0.0 {
            return Self::IDENTITY;
        }
        let (x, y, z) = (x / len, y / len, z / len);
        let (s, c) = degrees.to_radians().sin_cos();
        let nc = 1.0 - c;

        Self([
            x * x * nc + c,
            y * x * nc + z * s,
            x * z * nc - y * s,
            0.0,
            x * y * nc - z * s,
            y * y * nc + c,
            y * z * nc + x * s,
            0.0,
            x * z * nc + y * s,
            y * z * nc - x * s,
            z * z * nc + c,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }

    /// Parallel projection of `b` onto the clip cube. Eye space looks down
    /// -Z, so `near`/`far` are distances along it.
    pub fn ortho(b: ClipBox) -> Self {
        let (rl, tb, fne) = (b.right - b.left, b.top - b.bottom, b.far - b.near);
        let mut m = Self::IDENTITY;
        m.0[0] = 2.0 / rl;
        m.0[5] = 2.0 / tb;
        m.0[10] = -2.0 / fne;
        m.0[12] = -(b.right + b.left) / rl;
        m.0[13] = -(b.top + b.bottom) / tb;
        m.0[14] = -(b.far + b.near) / fne;
        m
    }

    pub fn frustum(b: ClipBox) -> Self {
        let (rl, tb, fne) = (b.right - b.left, b.top - b.bottom, b.far - b.near);
        let mut m = Self([0.0; 16]);
        m.0[0] = 2.0 * b.near / rl;
        m.0[5] = 2.0 * b.near / tb;
        m.0[8] = (b.right + b.left) / rl;
        m.0[9] = (b.top + b.bottom) / tb;
        m.0[10] = -(b.far + b.near) / fne;
        m.0[11] = -1.0;
        m.0[14] = -2.0 * b.far * b.near / fne;
        m
    }

    /// Symmetric frustum from a vertical field of view in degrees.
    pub fn perspective(fovy: f64, aspect: f64, near: f64, far: f64) -> Self {
        let ymax = near * (fovy.to_radians() / 2.0).tan();
        let xmax = ymax * aspect;
        Self::frustum(ClipBox::new(-xmax, xmax, -ymax, ymax, near, far))
    }

    pub fn transform(&self, v: [f64; 4]) -> [f64; 4] {
        let mut out = [0.0; 4];
        for (row, o) in out.iter_mut().enumerate() {
            *o = (0..4).map(|k| self.at(row, k) * v[k]).sum();
        }
        out
    }

    /// Narrowed copy for uniform upload.
    pub fn to_f32(&self) -> [f32; 16] {
        self.0.map(|v| v as f32)
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    /// `self × rhs`: applying the product transforms by `rhs` first.
    fn mul(self, rhs: Matrix) -> Matrix {
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = (0..4).map(|k| self.at(row, k) * rhs.at(k, col)).sum();
            }
        }
        Matrix(out)
    }
}
