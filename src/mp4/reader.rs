//! Atom tree walker: track selection and `tkhd` geometry decoding.

use tracing::{debug, trace};

use super::atoms::{Atom, AtomType, HandlerType, HEADER_LEN};
use super::cursor::Cursor;
use super::matrix::{self, TransformMatrix};
use crate::error::{Error, Result};
use crate::types::VideoInfo;

/// Walks the atom tree of an in-memory MP4 buffer and extracts the first
/// video track's geometry.
///
/// Parse failures never escape [`MoovReader::read_video_info`]: a bounds
/// violation or malformed atom terminates the scope being scanned, and
/// whatever was populated up to that point stands. Partial corruption yields
/// partial metadata.
pub(crate) struct MoovReader<'a> {
    cursor: Cursor<'a>,
}

impl<'a> MoovReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
        }
    }

    /// Scan the buffer and fill `info` with the first video track's geometry.
    pub fn read_video_info(&mut self, info: &mut VideoInfo) {
        let Some(moov) = self.find_moov() else {
            debug!("no moov atom found");
            return;
        };
        debug!(offset = moov.offset, size = moov.size, "found moov atom");
        self.scan_moov(&moov, info);
    }

    /// Top-level scan, stopping at the first `moov` atom.
    fn find_moov(&mut self) -> Option<Atom> {
        let end = self.cursor.len();
        let mut pos = 0;
        loop {
            match self.next_atom(pos, end) {
                Ok(Some(atom)) if atom.atom_type == AtomType::MOOV => return Some(atom),
                Ok(Some(atom)) => {
                    trace!(atom = %atom.atom_type, offset = atom.offset, "skipping top-level atom");
                    pos = atom.end();
                }
                Ok(None) => return None,
                Err(e) => {
                    debug!("stopping top-level scan: {e}");
                    return None;
                }
            }
        }
    }

    /// Read the atom header at `pos`, bounded by the enclosing scope.
    ///
    /// Returns `Ok(None)` when the scope is exhausted or a zero size marks
    /// the end of the atom list; `Err` when the declared size violates the
    /// scope. Callers treat `Err` as the end of that scope, not of the parse.
    fn next_atom(&mut self, pos: usize, scope_end: usize) -> Result<Option<Atom>> {
        if pos >= scope_end {
            return Ok(None);
        }
        self.cursor.seek_to(pos)?;
        let size = self.cursor.read_u32()?;
        let atom_type = AtomType::from_bytes(self.cursor.read_fourcc()?);

        if size == 0 {
            // Treated as "no more atoms", not as an atom extending to EOF.
            trace!(atom = %atom_type, offset = pos, "zero-size atom ends scope");
            return Ok(None);
        }
        if (size as usize) < HEADER_LEN {
            return Err(Error::InvalidAtom(format!(
                "{atom_type} at offset {pos} declares size {size}, below the {HEADER_LEN}-byte header"
            )));
        }
        let atom = Atom {
            atom_type,
            offset: pos,
            size,
        };
        if atom.end() > scope_end {
            return Err(Error::InvalidAtom(format!(
                "{} at offset {} runs past its scope end {} (size {})",
                atom.atom_type, pos, scope_end, size
            )));
        }
        Ok(Some(atom))
    }

    /// Walk `moov` children in document order, committing to the first `trak`
    /// that classifies as video.
    fn scan_moov(&mut self, moov: &Atom, info: &mut VideoInfo) {
        let mut pos = moov.payload_offset();
        loop {
            let atom = match self.next_atom(pos, moov.end()) {
                Ok(Some(atom)) => atom,
                Ok(None) => return,
                Err(e) => {
                    debug!("stopping moov scan: {e}");
                    return;
                }
            };
            if atom.atom_type == AtomType::TRAK && self.scan_trak(&atom, info) {
                return;
            }
            pos = atom.end();
        }
    }

    /// Scan one `trak`. Returns true when the track classified as video and
    /// its `tkhd` was handed to the decoder, which ends the track search.
    fn scan_trak(&mut self, trak: &Atom, info: &mut VideoInfo) -> bool {
        let mut tkhd: Option<Atom> = None;
        let mut is_video = false;

        let mut pos = trak.payload_offset();
        loop {
            let atom = match self.next_atom(pos, trak.end()) {
                Ok(Some(atom)) => atom,
                Ok(None) => break,
                Err(e) => {
                    debug!("stopping trak scan: {e}");
                    break;
                }
            };
            match atom.atom_type {
                // Recorded but not decoded until the track classifies as video.
                AtomType::TKHD => tkhd = Some(atom.clone()),
                AtomType::MDIA => is_video = self.classify_mdia(&atom),
                _ => trace!(atom = %atom.atom_type, "skipping trak child"),
            }
            // Resume from the child's own end, wherever a handler left the cursor.
            pos = atom.end();
        }

        if !is_video {
            return false;
        }
        let Some(tkhd) = tkhd else {
            debug!("video trak without a tkhd atom");
            return false;
        };
        trace!(offset = tkhd.offset, "decoding tkhd of first video trak");
        if let Err(e) = self.read_tkhd(&tkhd, info) {
            debug!("tkhd decode stopped early: {e}");
        }
        true
    }

    /// Walk `mdia` children until an `hdlr` atom resolves the handler type.
    ///
    /// One level only; sample tables are never inspected. A missing or
    /// unreadable `hdlr` classifies the track as not-video.
    fn classify_mdia(&mut self, mdia: &Atom) -> bool {
        let mut pos = mdia.payload_offset();
        loop {
            let atom = match self.next_atom(pos, mdia.end()) {
                Ok(Some(atom)) => atom,
                Ok(None) => return false,
                Err(e) => {
                    debug!("stopping mdia scan: {e}");
                    return false;
                }
            };
            if atom.atom_type == AtomType::HDLR {
                return match self.read_handler_type(&atom) {
                    Ok(handler) => {
                        trace!(?handler, "classified trak");
                        handler.is_video()
                    }
                    Err(e) => {
                        debug!("hdlr read failed: {e}");
                        false
                    }
                };
            }
            pos = atom.end();
        }
    }

    /// Read the 4-byte handler code from an `hdlr` atom.
    fn read_handler_type(&mut self, hdlr: &Atom) -> Result<HandlerType> {
        self.cursor.seek_to(hdlr.payload_offset())?;
        self.cursor.skip(4)?; // version + flags
        self.cursor.skip(4)?; // pre_defined
        Ok(HandlerType::from_bytes(self.cursor.read_fourcc()?))
    }

    /// Decode the version-dependent `tkhd` layout into `info`.
    ///
    /// Population is incremental: a truncated atom keeps whatever fields were
    /// already set.
    fn read_tkhd(&mut self, tkhd: &Atom, info: &mut VideoInfo) -> Result<()> {
        self.cursor.seek_to(tkhd.payload_offset())?;
        let version = self.cursor.read_u8()?;
        self.cursor.skip(3)?; // flags
        match version {
            // creation/modification time, track id, reserved, then duration
            0 => self.cursor.skip(16 + 4)?,
            1 => self.cursor.skip(24 + 8)?,
            other => {
                // Unknown layout; leave the defaults in place and report no error.
                debug!(version = other, "unsupported tkhd version");
                return Ok(());
            }
        }
        self.cursor.skip(8)?; // reserved
        self.cursor.skip(4)?; // layer + alternate group
        self.cursor.skip(4)?; // volume + reserved

        let matrix = TransformMatrix::from_bytes(self.cursor.read_bytes(matrix::ENCODED_LEN)?);
        info.rotation = matrix.rotation();

        // Declared dimensions are 16.16 fixed point; keep the integer part.
        info.width = self.cursor.read_u32()? >> 16;
        info.height = self.cursor.read_u32()? >> 16;

        // tkhd declares the storage raster; a quarter turn swaps it for display.
        if info.rotation.swaps_dimensions() {
            std::mem::swap(&mut info.width, &mut info.height);
        }
        Ok(())
    }
}
