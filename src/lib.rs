//! # vidprobe
//!
//! Pure Rust MP4/MOV video dimension and rotation probing.
//!
//! Extracts a video's pixel width, height, and encoded orientation from the
//! ISO-BMFF box structure alone — no frame decoding, no codec libraries, no
//! external tools. The probe walks `moov → trak → {tkhd, mdia → hdlr}`,
//! classifies tracks by handler type, decodes the track header's fixed-point
//! transformation matrix, and snaps the encoded rotation to the nearest
//! quarter turn.
//!
//! The parser is deliberately best-effort: damaged or truncated structure
//! degrades to a partial or empty result instead of an error, so a caller
//! sizing a preview surface can always use the returned value.
//!
//! ## Example
//!
//! ```no_run
//! let data = std::fs::read("movie.mp4").unwrap();
//! let info = vidprobe::probe_bytes(&data, "movie.mp4");
//!
//! if info.has_dimensions() {
//!     println!(
//!         "{}: {}x{} rotated {} degrees",
//!         info.file_name, info.width, info.height, info.rotation
//!     );
//! }
//! ```
//!
//! ## Known limitations
//!
//! First `moov` atom, first video `trak` wins. Fragmented files (`moof`),
//! multiple video tracks, and 64-bit largesize atoms are not handled;
//! arbitrary-angle affine rotations are collapsed to the nearest multiple
//! of 90 degrees.

pub mod error;
pub mod mp4;
pub mod types;

pub use error::{Error, Result};
pub use mp4::is_mp4_family;
pub use types::{Rotation, VideoInfo};

use std::fs;
use std::path::Path;

/// Probe an in-memory MP4-family buffer for video dimensions and rotation.
///
/// This is the pure core entry point: a function from a byte buffer (plus an
/// opaque label, passed through untouched) to a [`VideoInfo`]. It performs no
/// I/O, holds no state past the call, and never fails — all parse failure
/// categories degrade to a partial or empty result with
/// [`VideoInfo::has_dimensions`] returning false.
pub fn probe_bytes(data: &[u8], name: impl Into<String>) -> VideoInfo {
    mp4::read_video_info(data, name.into())
}

/// Probe a media file on disk.
///
/// Reads the whole file into memory and delegates to [`probe_bytes`] with
/// the file name as the label. Fails only on filesystem errors; parse
/// problems still degrade to an undetermined [`VideoInfo`].
pub fn probe_file<P: AsRef<Path>>(path: P) -> Result<VideoInfo> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }
    let data = fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(probe_bytes(&data, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_nonexistent_file() {
        let result = probe_file("/this/file/does/not/exist.mp4");
        assert!(matches!(result, Err(Error::FileNotFound(_))));
    }

    #[test]
    fn test_probe_bytes_never_fails() {
        let info = probe_bytes(b"not an mp4 at all", "junk");
        assert_eq!(info.file_name, "junk");
        assert!(!info.has_dimensions());
    }
}
