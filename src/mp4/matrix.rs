//! Transformation matrix decoding for the `tkhd` atom.

use crate::types::Rotation;

/// Encoded length of the 3x3 matrix: 9 entries, 4 bytes each.
pub(crate) const ENCODED_LEN: usize = 36;

/// The 3x3 transformation matrix from a `tkhd` atom.
///
/// Entries are signed 16.16 fixed point, stored big-endian in row-major
/// order:
///
/// ```text
/// [ a  b  u ]
/// [ c  d  v ]
/// [ x  y  w ]
/// ```
///
/// Only `a` and `b` contribute to the derived rotation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TransformMatrix {
    entries: [f64; 9],
}

impl TransformMatrix {
    /// Decode from the 36-byte wire form.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        debug_assert_eq!(bytes.len(), ENCODED_LEN);
        let mut entries = [0.0; 9];
        for (entry, raw) in entries.iter_mut().zip(bytes.chunks_exact(4)) {
            *entry = fixed_16_16(i32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]));
        }
        Self { entries }
    }

    fn a(&self) -> f64 {
        self.entries[0]
    }

    fn b(&self) -> f64 {
        self.entries[1]
    }

    /// Snap the rotation encoded by `a` and `b` to the nearest quarter turn.
    ///
    /// Arbitrary-angle affine transforms are deliberately collapsed to
    /// 0/90/180/270; capture devices only write those.
    pub fn rotation(&self) -> Rotation {
        let mut degrees = self.b().atan2(self.a()).to_degrees();
        if degrees < 0.0 {
            degrees += 360.0;
        }
        match (degrees / 90.0).round() as u32 % 4 {
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            3 => Rotation::Deg270,
            _ => Rotation::Deg0,
        }
    }
}

/// Convert a signed 16.16 fixed-point value to floating point.
fn fixed_16_16(raw: i32) -> f64 {
    f64::from(raw) / 65536.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix_with(a: f64, b: f64, c: f64, d: f64) -> TransformMatrix {
        let mut bytes = Vec::with_capacity(ENCODED_LEN);
        for value in [a, b, 0.0, c, d, 0.0, 0.0, 0.0, 1.0] {
            let raw = (value * 65536.0) as i32;
            bytes.extend_from_slice(&raw.to_be_bytes());
        }
        TransformMatrix::from_bytes(&bytes)
    }

    #[test]
    fn test_fixed_point_is_signed() {
        assert_eq!(fixed_16_16(0x0001_0000), 1.0);
        assert_eq!(fixed_16_16(-0x0001_0000), -1.0);
        assert_eq!(fixed_16_16(0x0000_8000), 0.5);
    }

    #[test]
    fn test_identity_is_no_rotation() {
        let m = matrix_with(1.0, 0.0, 0.0, 1.0);
        assert_eq!(m.rotation(), Rotation::Deg0);
    }

    #[test]
    fn test_quarter_turns() {
        assert_eq!(matrix_with(0.0, 1.0, -1.0, 0.0).rotation(), Rotation::Deg90);
        assert_eq!(
            matrix_with(-1.0, 0.0, 0.0, -1.0).rotation(),
            Rotation::Deg180
        );
        assert_eq!(
            matrix_with(0.0, -1.0, 1.0, 0.0).rotation(),
            Rotation::Deg270
        );
    }

    #[test]
    fn test_arbitrary_angle_snaps_to_nearest_quadrant() {
        // ~30 degrees: cos=0.866, sin=0.5 -> nearest quarter turn is 0.
        let m = matrix_with(0.866, 0.5, -0.5, 0.866);
        assert_eq!(m.rotation(), Rotation::Deg0);

        // ~60 degrees snaps to 90.
        let m = matrix_with(0.5, 0.866, -0.866, 0.5);
        assert_eq!(m.rotation(), Rotation::Deg90);
    }

    #[test]
    fn test_scaled_matrix_keeps_rotation() {
        // Uniform scale does not change atan2(b, a).
        let m = matrix_with(0.0, 2.5, -2.5, 0.0);
        assert_eq!(m.rotation(), Rotation::Deg90);
    }

    #[test]
    fn test_near_full_turn_wraps_to_zero() {
        // ~350 degrees is nearer to 360 than 270 and must wrap to 0.
        let m = matrix_with(0.985, -0.174, 0.174, 0.985);
        assert_eq!(m.rotation(), Rotation::Deg0);
    }
}
