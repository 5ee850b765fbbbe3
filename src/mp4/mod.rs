//! MP4/MOV container parsing.
//!
//! Hand-rolled ISO-BMFF atom walking over an in-memory buffer. The walk
//! descends `moov → trak → {tkhd, mdia → hdlr}` only; everything else is
//! skipped with a single bounds-checked seek, so cost is linear in the number
//! of atoms visited rather than in file size.

mod atoms;
mod cursor;
mod matrix;
mod reader;

pub use atoms::{AtomType, HandlerType};

use crate::types::VideoInfo;
use reader::MoovReader;

/// Extract the first video track's dimensions and rotation from a buffer.
///
/// Never fails: structurally broken input degrades to a partial or empty
/// [`VideoInfo`].
pub(crate) fn read_video_info(data: &[u8], file_name: String) -> VideoInfo {
    let mut info = VideoInfo::new(file_name);
    MoovReader::new(data).read_video_info(&mut info);
    info
}

/// Quick magic-byte check for the ISO-BMFF family, without parsing.
///
/// Looks for a plausible leading atom type at offset 4. `ftyp` is the normal
/// case; `moov`/`mdat`/`free`/`wide` cover files with the header atom
/// omitted or reordered.
pub fn is_mp4_family(data: &[u8]) -> bool {
    if data.len() < 8 {
        return false;
    }
    let fourcc = &data[4..8];
    fourcc == b"ftyp"
        || fourcc == b"moov"
        || fourcc == b"mdat"
        || fourcc == b"free"
        || fourcc == b"wide"
}
