use egui::{Pos2, Vec2};

/// Placement of an item on the canvas.
///
/// `position` is the canvas location of the item's local origin (its
/// untransformed top-left corner). Scale and rotation are applied about the
/// item's own center, so they never move that center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTransform {
    pub position: Pos2,
    /// Uniform scale factor (1.0 = original size)
    pub scale: f32,
    /// Rotation in degrees, clockwise on screen. Not normalized.
    pub rotation: f32,
}

impl Default for ItemTransform {
    fn default() -> Self {
        const DEFAULT_TRANSFORM: ItemTransform = ItemTransform {
            position: Pos2::ZERO,
            scale: 1.0,
            rotation: 0.0,
        };
        DEFAULT_TRANSFORM
    }
}

pub type Matrix = [[f32; 3]; 3];

impl ItemTransform {
    pub fn identity() -> Self {
        Self::default()
    }

    /// Local-to-canvas matrix with scale and rotation around `pivot` (local coordinates)
    pub fn to_matrix_with_pivot(&self, pivot: Vec2) -> Matrix {
        let (sin, cos) = self.rotation.to_radians().sin_cos();

        // First translate to pivot point (origin)
        let mut result = [
            [1.0, 0.0, -pivot.x],
            [0.0, 1.0, -pivot.y],
            [0.0, 0.0, 1.0],
        ];

        result = multiply_matrices(
            &[
                [self.scale, 0.0, 0.0],
                [0.0, self.scale, 0.0],
                [0.0, 0.0, 1.0],
            ],
            &result,
        );

        // y points down, so a positive angle turns clockwise on screen
        result = multiply_matrices(
            &[
                [cos, -sin, 0.0],
                [sin, cos, 0.0],
                [0.0, 0.0, 1.0],
            ],
            &result,
        );

        multiply_matrices(
            &[
                [1.0, 0.0, pivot.x + self.position.x],
                [0.0, 1.0, pivot.y + self.position.y],
                [0.0, 0.0, 1.0],
            ],
            &result,
        )
    }
}

/// Applies an affine matrix to a point
pub fn apply(m: &Matrix, p: Pos2) -> Pos2 {
    Pos2::new(
        m[0][0] * p.x + m[0][1] * p.y + m[0][2],
        m[1][0] * p.x + m[1][1] * p.y + m[1][2],
    )
}

/// Inverts an affine matrix. Returns `None` when it is singular.
pub fn invert(m: &Matrix) -> Option<Matrix> {
    let (a, b, c) = (m[0][0], m[0][1], m[0][2]);
    let (d, e, f) = (m[1][0], m[1][1], m[1][2]);

    let det = a * e - b * d;
    if det.abs() < 1e-12 {
        return None;
    }
    let inv = 1.0 / det;
    Some([
        [e * inv, -b * inv, (b * f - c * e) * inv],
        [-d * inv, a * inv, (c * d - a * f) * inv],
        [0.0, 0.0, 1.0],
    ])
}

fn multiply_matrices(a: &Matrix, b: &Matrix) -> Matrix {
    let mut result = [[0.0; 3]; 3];
    for (i, row) in result.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    result
}
