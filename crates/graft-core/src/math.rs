use serde::{Deserialize, Serialize};

/// A 4x4 transform matrix: 16 values stored in row-major order as sampled
/// from the scene source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix4 {
    m: [f64; 16],
}

impl Matrix4 {
    pub fn identity() -> Self {
        Self {
            m: [
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    /// Build from 16 row-major values.
    pub fn from_rows(m: [f64; 16]) -> Self {
        Self { m }
    }

    /// A pure translation in host (row-major) convention: the offset sits in
    /// the last row.
    pub fn translation(tx: f64, ty: f64, tz: f64) -> Self {
        Self {
            m: [
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                tx, ty, tz, 1.0,
            ],
        }
    }

    /// Swap row/column major order. Applied once at resolution time because
    /// source and target conventions differ.
    pub fn transposed(&self) -> Matrix4 {
        let mut t = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                t[col * 4 + row] = self.m[row * 4 + col];
            }
        }
        Self { m: t }
    }

    pub fn values(&self) -> &[f64; 16] {
        &self.m
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Matrix4::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_transpose_invariant() {
        let m = Matrix4::identity();
        assert_eq!(m.transposed(), m);
    }

    #[test]
    fn test_translation_transpose_moves_offset_to_last_column() {
        let m = Matrix4::translation(2.0, 3.0, 4.0).transposed();
        assert_eq!(
            m.values(),
            &[
                1.0, 0.0, 0.0, 2.0, //
                0.0, 1.0, 0.0, 3.0, //
                0.0, 0.0, 1.0, 4.0, //
                0.0, 0.0, 0.0, 1.0,
            ]
        );
    }

    #[test]
    fn test_double_transpose_round_trips() {
        let m = Matrix4::from_rows([
            1.0, 2.0, 3.0, 4.0, //
            5.0, 6.0, 7.0, 8.0, //
            9.0, 10.0, 11.0, 12.0, //
            13.0, 14.0, 15.0, 16.0,
        ]);
        assert_eq!(m.transposed().transposed(), m);
    }
}
