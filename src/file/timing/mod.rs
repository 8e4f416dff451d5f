mod smpte;
pub use smpte::*;

use crate::{
    reader::{ReadResult, Reader},
    ArgumentError, DataByte, ParseError,
};

/// The header timing type.
///
/// This is either the number of ticks per quarter note or the alternative
/// SMPTE format: a negative frames-per-second byte over a ticks-per-frame
/// byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Timing {
    /// The file's delta times are defined using a tick rate per quarter note
    TicksPerQuarterNote(TicksPerQuarterNote),

    /// The file's delta times are defined using SMPTE and MIDI Time Code
    Smpte(SmpteHeader),
}

impl Timing {
    /// The tick rate per quarter note defines what a "quarter note" means.
    ///
    /// Valid rates are 1-32767.
    pub const fn new_ticks_per_quarter_note(tpqn: u16) -> Result<Self, ArgumentError> {
        match TicksPerQuarterNote::new(tpqn) {
            Ok(t) => Ok(Self::TicksPerQuarterNote(t)),
            Err(e) => Err(e),
        }
    }

    /// Define the timing in terms of fps and ticks per frame
    pub const fn new_smpte(fps: SmpteFps, ticks_per_frame: DataByte) -> Self {
        Self::Smpte(SmpteHeader {
            fps,
            ticks_per_frame,
        })
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let bytes: [u8; 2] = reader.read_exact_size()?;
        match bytes[0] >> 7 {
            0 => {
                // metrical: ticks per quarter note
                TicksPerQuarterNote::new(u16::from_be_bytes(bytes))
                    .map(Self::TicksPerQuarterNote)
                    .map_err(|e| reader.parse_err(e))
            }
            _ => SmpteHeader::new(bytes)
                .map(Self::Smpte)
                .map_err(|e| reader.parse_err(e)),
        }
    }

    pub(crate) const fn encode(&self) -> [u8; 2] {
        match self {
            Self::TicksPerQuarterNote(tpqn) => tpqn.inner,
            Self::Smpte(smpte) => smpte.encode(),
        }
    }

    /// Returns Some if the timing is defined as ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(t) => Some(t.ticks_per_quarter_note()),
            _ => None,
        }
    }

    /// Returns Some if the timing is defined in SMPTE terms
    pub const fn smpte(&self) -> Option<&SmpteHeader> {
        match self {
            Self::Smpte(smpte) => Some(smpte),
            _ => None,
        }
    }
}

/// A representation of the `tpqn` timing for a MIDI file
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TicksPerQuarterNote {
    pub(crate) inner: [u8; 2],
}

impl TicksPerQuarterNote {
    /// Create a tick rate, checking it is 1-32767.
    pub const fn new(tpqn: u16) -> Result<Self, ArgumentError> {
        if tpqn == 0 || tpqn > 0x7FFF {
            return Err(ArgumentError::TicksPerQuarterNote(tpqn));
        }
        Ok(Self {
            inner: tpqn.to_be_bytes(),
        })
    }

    /// Returns the ticks per quarter note for the file.
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        u16::from_be_bytes(self.inner)
    }
}

/// A representation of the `smpte` timing for a MIDI file
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteHeader {
    pub(crate) fps: SmpteFps,
    pub(crate) ticks_per_frame: DataByte,
}

impl SmpteHeader {
    fn new(bytes: [u8; 2]) -> Result<Self, ParseError> {
        // the sign bit of bytes[0] is known to be set when calling this
        let fps = SmpteFps::from_header_byte(bytes[0])?;
        let ticks_per_frame = DataByte::new(bytes[1])?;
        Ok(Self {
            fps,
            ticks_per_frame,
        })
    }

    pub(crate) const fn encode(&self) -> [u8; 2] {
        [self.fps.as_header_byte(), self.ticks_per_frame.0]
    }

    /// Returns the frames per second
    pub const fn fps(&self) -> SmpteFps {
        self.fps
    }

    /// Returns the ticks per frame
    pub const fn ticks_per_frame(&self) -> u8 {
        self.ticks_per_frame.0
    }
}
