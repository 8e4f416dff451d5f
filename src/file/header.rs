use crate::{
    file::Timing,
    reader::{ReadResult, Reader},
    writer::Writer,
    HeaderError,
};

#[doc = r#"
Information about the shape and timing of a MIDI file.

The track count of the header chunk is not stored here: it is derived from
the file's track list on encode, and only checked against the wire value on
parse.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiFileHeader {
    format: FormatType,
    timing: Timing,
}

impl MidiFileHeader {
    /// Create a new header from a format and timing
    pub const fn new(format: FormatType, timing: Timing) -> Self {
        Self { format, timing }
    }

    /// Returns the format type for the file.
    pub const fn format_type(&self) -> FormatType {
        self.format
    }

    /// Get the timing props
    pub const fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Read the 6-byte header chunk body, returning the header and the
    /// declared track count.
    pub(crate) fn read(body: &mut Reader<'_>) -> ReadResult<(Self, u16)> {
        let format_bits = body.read_u16_be()?;
        let format = FormatType::from_bits(format_bits).map_err(|e| body.parse_err(e))?;
        let track_count = body.read_u16_be()?;
        if matches!(format, FormatType::SingleMultiChannel) && track_count != 1 {
            return Err(body.parse_err(HeaderError::SingleTrackCount(track_count)));
        }
        let timing = Timing::read(body)?;
        Ok((Self { format, timing }, track_count))
    }

    /// Write the 6-byte header chunk body. `track_count` reflects the
    /// file's current track list, overriding whatever the header once
    /// declared.
    pub(crate) fn write(&self, track_count: u16, out: &mut Writer) {
        out.write_u16_be(self.format.as_bits());
        out.write_u16_be(track_count);
        out.write_bytes(&self.timing.encode());
    }
}

#[doc = r#"
How the tracks of a file relate to each other.

- Format 0 holds the whole performance in one multi-channel track.
- Format 1 holds simultaneous tracks played together; the first
  conventionally carries tempo and other song metadata.
- Format 2 holds independent tracks, each a separate sequence.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormatType {
    /// Format 0
    SingleMultiChannel,
    /// Format 1
    Simultaneous,
    /// Format 2
    SequentiallyIndependent,
}

impl FormatType {
    /// Decode the file type word of a header chunk.
    pub const fn from_bits(bits: u16) -> Result<Self, HeaderError> {
        match bits {
            0 => Ok(Self::SingleMultiChannel),
            1 => Ok(Self::Simultaneous),
            2 => Ok(Self::SequentiallyIndependent),
            other => Err(HeaderError::FileType(other)),
        }
    }

    /// The file type word of a header chunk.
    pub const fn as_bits(&self) -> u16 {
        match self {
            Self::SingleMultiChannel => 0,
            Self::Simultaneous => 1,
            Self::SequentiallyIndependent => 2,
        }
    }
}
