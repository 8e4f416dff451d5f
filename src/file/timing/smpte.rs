#![doc = r#"
SMPTE (Society of Motion Picture and Television Engineers) frame rates.

MIDI supports two timing methods: musical time (ticks per quarter note,
scaled by tempo) and absolute time (SMPTE frames per second). SMPTE timing
pins events to real time regardless of tempo, which is what film scoring,
broadcast and post-production need.
"#]

use crate::SmpteError;

/// The possible FPS (Frames Per Second) for MIDI tracks and files
///
/// The MIDI specification defines only four possible frame rates:
/// - 24 fps: Standard film rate
/// - 25 fps: PAL/SECAM television standard
/// - 29.97 fps: NTSC color television (drop-frame timecode)
/// - 30 fps: NTSC black & white, some digital video formats
///
/// # Drop-Frame Timecode
///
/// The `TwentyNine` variant represents 29.97 fps (30000/1001), introduced
/// for NTSC color television. No actual frames are dropped; the time code
/// numbering skips certain values to stay aligned with real time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// 24 frames per second - Standard film rate
    TwentyFour,
    /// 25 frames per second - PAL/SECAM television standard
    TwentyFive,
    /// 29.97 frames per second (30000/1001) - NTSC color drop-frame rate
    TwentyNine,
    /// 30 frames per second - NTSC black & white, some digital formats
    Thirty,
}

impl SmpteFps {
    /// Get the nominal frame rate as an integer division value.
    ///
    /// Drop-frame 29.97 fps returns 30 here, as MIDI uses the nominal rate
    /// for division calculations.
    pub const fn as_division(&self) -> u8 {
        match self {
            Self::TwentyFour => 24,
            Self::TwentyFive => 25,
            Self::TwentyNine => 30,
            Self::Thirty => 30,
        }
    }

    /// Get the actual frame rate as a floating-point value, including the
    /// fractional rate for drop-frame timecode (29.97 fps = 30000/1001).
    pub const fn as_f64(&self) -> f64 {
        match self {
            Self::TwentyFour => 24.,
            Self::TwentyFive => 25.,
            Self::TwentyNine => DROP_FRAME,
            Self::Thirty => 30.,
        }
    }

    /// Decode the high byte of a SMPTE division word, which holds the
    /// frame rate negated.
    pub(crate) fn from_header_byte(byte: u8) -> Result<Self, SmpteError> {
        match byte as i8 {
            -24 => Ok(Self::TwentyFour),
            -25 => Ok(Self::TwentyFive),
            -29 => Ok(Self::TwentyNine),
            -30 => Ok(Self::Thirty),
            other => Err(SmpteError::HeaderFrameTime(other)),
        }
    }

    /// The negative two's-complement byte stored in the high half of a
    /// SMPTE division word.
    pub(crate) const fn as_header_byte(&self) -> u8 {
        match self {
            Self::TwentyFour => 0xE8, // -24
            Self::TwentyFive => 0xE7, // -25
            Self::TwentyNine => 0xE3, // -29
            Self::Thirty => 0xE2,     // -30
        }
    }

    /// Decode the two-bit rate field of a SMPTE offset meta payload.
    pub(crate) fn from_offset_bits(bits: u8) -> Result<Self, SmpteError> {
        match bits {
            0 => Ok(Self::TwentyFour),
            1 => Ok(Self::TwentyFive),
            2 => Ok(Self::TwentyNine),
            3 => Ok(Self::Thirty),
            bits => Err(SmpteError::TrackFrame(bits)),
        }
    }

    /// The two-bit rate field of a SMPTE offset meta payload.
    pub(crate) const fn as_offset_bits(&self) -> u8 {
        match self {
            Self::TwentyFour => 0,
            Self::TwentyFive => 1,
            Self::TwentyNine => 2,
            Self::Thirty => 3,
        }
    }
}

/// The precise value for NTSC drop-frame rate: 29.97002997... fps
const DROP_FRAME: f64 = 30_000. / 1001.;
