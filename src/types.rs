//! Core types for video metadata representation.

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Axis-aligned rotation encoded in a track's transformation matrix.
///
/// Capture devices write orientation as a 3x3 affine matrix; this type holds
/// the matrix snapped to the nearest quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Rotation {
    /// No rotation.
    #[default]
    Deg0,
    /// Quarter turn clockwise.
    Deg90,
    /// Upside down.
    Deg180,
    /// Three-quarter turn clockwise.
    Deg270,
}

impl Rotation {
    /// Rotation in degrees, clockwise, one of 0.0 / 90.0 / 180.0 / 270.0.
    pub fn degrees(&self) -> f32 {
        match self {
            Rotation::Deg0 => 0.0,
            Rotation::Deg90 => 90.0,
            Rotation::Deg180 => 180.0,
            Rotation::Deg270 => 270.0,
        }
    }

    /// Whether applying this rotation swaps the display width and height.
    pub fn swaps_dimensions(&self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.degrees() as u32)
    }
}

/// Video metadata extracted from an MP4-family file.
///
/// Zero width and height mean the probe could not determine the dimensions
/// (no `moov`, no video track, or a damaged track header); callers should
/// treat such a result as "unknown", not as an error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct VideoInfo {
    /// Opaque label passed through from the caller, never parsed.
    pub file_name: String,
    /// Display width in pixels, after rotation is applied.
    pub width: u32,
    /// Display height in pixels, after rotation is applied.
    pub height: u32,
    /// Rotation encoded in the track's transformation matrix.
    pub rotation: Rotation,
}

impl VideoInfo {
    /// Create an undetermined result carrying only the label.
    pub(crate) fn new(file_name: String) -> Self {
        Self {
            file_name,
            ..Default::default()
        }
    }

    /// Whether the probe found usable dimensions.
    pub fn has_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}
