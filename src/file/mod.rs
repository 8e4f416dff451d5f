#![doc = r#"
Rusty representation of a [`MidiFile`]
"#]

pub(crate) mod chunk;

mod header;
pub use header::*;

mod track;
pub use track::*;

mod timing;
pub use timing::*;

use alloc::vec::Vec;

use crate::{
    event::TrackEvent,
    reader::{ReadResult, Reader, ReaderError},
    writer::Writer,
    ArgumentError, ChunkError, EncodeError, FileError, HeaderError, ParseError,
};

#[doc = r#"
A parsed or freshly built MIDI file: one header and a list of tracks.

The file exclusively owns its tracks and the tracks their events, so every
mutation goes through the owning value. The header's track count always
follows the track list; there is no stored count to fall out of sync.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiFile {
    header: MidiFileHeader,
    tracks: Vec<Track>,
}

impl Default for MidiFile {
    /// An empty simultaneous-track file at 96 ticks per quarter note.
    fn default() -> Self {
        Self::new(MidiFileHeader::new(
            FormatType::Simultaneous,
            Timing::TicksPerQuarterNote(TicksPerQuarterNote {
                inner: [0x00, 0x60],
            }),
        ))
    }
}

impl MidiFile {
    /// Create an empty file with the given header.
    pub const fn new(header: MidiFileHeader) -> Self {
        Self {
            header,
            tracks: Vec::new(),
        }
    }

    /// Parse a set of bytes into a file struct.
    ///
    /// The buffer must open with an `MThd` chunk and contain every track
    /// chunk the header declares. Chunks of unknown type between the
    /// declared tracks are skipped, as the format allows.
    pub fn parse(bytes: &[u8]) -> ReadResult<Self> {
        if bytes.len() < 4 || &bytes[..4] != chunk::HEADER_TAG {
            return Err(ReaderError::parse_error(0, ParseError::NotMidi));
        }

        let mut reader = Reader::from_byte_slice(bytes);
        let mut header_body = chunk::expect(&mut reader, "MThd")?;
        if header_body.remaining() != 6 {
            return Err(header_body.parse_err(HeaderError::Length(header_body.remaining() as u32)));
        }
        let (header, declared) = MidiFileHeader::read(&mut header_body)?;

        let mut tracks = Vec::with_capacity(declared as usize);
        while tracks.len() < declared as usize {
            if reader.is_empty() {
                return Err(reader.parse_err(FileError::MissingTracks {
                    expected: declared,
                    found: tracks.len() as u16,
                }));
            }
            let position = reader.buffer_position();
            let (tag, body) = chunk::read(&mut reader)?;
            match &tag[..] {
                b"MTrk" => tracks.push(Track::read(body)?),
                b"MThd" => {
                    return Err(ReaderError::parse_error(
                        position,
                        ChunkError::DuplicateHeader.into(),
                    ))
                }
                _ => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        "skipping unknown chunk `{}` ({} bytes)",
                        alloc::string::String::from_utf8_lossy(&tag),
                        body.remaining()
                    );
                }
            }
        }

        Ok(Self { header, tracks })
    }

    /// Serialize the file: the header chunk, then each track in order.
    pub fn write(&self) -> Result<Vec<u8>, EncodeError> {
        let track_count =
            u16::try_from(self.tracks.len()).map_err(|_| EncodeError::TrackCount(self.tracks.len()))?;

        let mut out = Writer::with_capacity(14);
        let mut header_body = Writer::with_capacity(6);
        self.header.write(track_count, &mut header_body);
        chunk::write(chunk::HEADER_TAG, header_body.as_slice(), &mut out)?;

        for track in &self.tracks {
            track.write(&mut out)?;
        }
        Ok(out.into_vec())
    }

    /// Returns header info
    pub const fn header(&self) -> &MidiFileHeader {
        &self.header
    }

    /// Returns the format type for the file.
    pub const fn format_type(&self) -> FormatType {
        self.header.format_type()
    }

    /// Returns the timing of the file.
    pub const fn timing(&self) -> &Timing {
        self.header.timing()
    }

    /// Returns the track list.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// The track at `index`, or nothing if out of range.
    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// The track at `index` for mutation, or nothing if out of range.
    pub fn track_mut(&mut self, index: usize) -> Option<&mut Track> {
        self.tracks.get_mut(index)
    }

    /// How many tracks the file holds.
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Append a track built from `events`. An end-of-track event is
    /// appended to the list when it lacks one.
    pub fn add_track(&mut self, events: Vec<TrackEvent>) -> Result<&mut Track, ArgumentError> {
        self.insert_track(self.tracks.len(), events)
    }

    /// Insert a track built from `events` at `index`.
    ///
    /// Fails when the index is past the end of the track list, or when the
    /// file is format 0 and already holds its one track.
    pub fn insert_track(
        &mut self,
        index: usize,
        events: Vec<TrackEvent>,
    ) -> Result<&mut Track, ArgumentError> {
        if matches!(self.format_type(), FormatType::SingleMultiChannel) && !self.tracks.is_empty() {
            return Err(ArgumentError::SingleTrackExceeded);
        }
        if index > self.tracks.len() {
            return Err(ArgumentError::IndexOutOfBounds {
                index,
                len: self.tracks.len(),
            });
        }
        self.tracks.insert(index, Track::new(events));
        Ok(&mut self.tracks[index])
    }

    /// Remove and return the track at `index`.
    pub fn remove_track(&mut self, index: usize) -> Result<Track, ArgumentError> {
        if index >= self.tracks.len() {
            return Err(ArgumentError::IndexOutOfBounds {
                index,
                len: self.tracks.len(),
            });
        }
        Ok(self.tracks.remove(index))
    }

    /// Remove and return the last track.
    pub fn pop_track(&mut self) -> Result<Track, ArgumentError> {
        self.tracks.pop().ok_or(ArgumentError::NoTrackToRemove)
    }
}
