use thiserror::Error;

#[doc = r#"
A set of structural errors that can occur while interpreting SMF bytes.

Every variant wraps the error of a specific layer of the format, so callers
can tell a broken chunk frame apart from a semantically impossible event.
The byte offset of the failure is carried by the surrounding
[`ReaderError`](crate::reader::ReaderError).
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The leading bytes are not an `MThd` chunk, so this is likely not a
    /// standard MIDI file at all.
    #[error("not a standard MIDI file (no leading MThd chunk)")]
    NotMidi,
    /// A variable-length quantity ran for four bytes without a terminator.
    #[error("variable-length quantity has no terminator within 4 bytes")]
    UnterminatedVarInt,
    /// Chunk framing errors
    #[error("chunk: {0}")]
    Chunk(#[from] ChunkError),
    /// Header chunk errors
    #[error("header: {0}")]
    Header(#[from] HeaderError),
    /// Event-level errors
    #[error("event: {0}")]
    Event(#[from] EventError),
    /// File assembly errors
    #[error("file: {0}")]
    File(#[from] FileError),
    /// SMPTE offset errors
    #[error("smpte: {0}")]
    Smpte(#[from] SmpteError),
    /// A value embedded in the stream failed the same range checks the
    /// constructors apply.
    #[error("argument: {0}")]
    Argument(#[from] ArgumentError),
}

/// An error in the chunk frame: 4 ASCII type bytes, a 32-bit big-endian
/// length, then the body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChunkError {
    /// A chunk of the wrong type where a specific one was required.
    #[error("expected a `{expected}` chunk, found `{}`", String::from_utf8_lossy(.actual))]
    TypeMismatch {
        /// The chunk tag that was required here.
        expected: &'static str,
        /// The four tag bytes actually present.
        actual: [u8; 4],
    },
    /// More than one `MThd` chunk in the same file.
    #[error("duplicate header chunk")]
    DuplicateHeader,
}

/// An error in the 6-byte header chunk body.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// The header chunk must declare a length of exactly 6.
    #[error("header chunk length must be 6, got {0}")]
    Length(u32),
    /// The file type word was not 0, 1 or 2.
    #[error("unknown file type {0}")]
    FileType(u16),
    /// A type-0 file must declare exactly one track.
    #[error("file type 0 must declare exactly one track, declared {0}")]
    SingleTrackCount(u16),
}

/// An error for well-formed bytes that do not make a valid event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    /// A data byte arrived with no status byte and no running status to
    /// fall back on.
    #[error("data byte with no running status in effect")]
    OrphanRunningStatus,
    /// System common and realtime statuses are valid MIDI but have no place
    /// inside an SMF track.
    #[error("system message {0:#04x} is not supported inside a track")]
    Unsupported(u8),
    /// A meta type byte with the status bit set.
    #[error("meta type {0:#04x} has the status bit set")]
    MetaKind(u8),
    /// A recognized meta type with the wrong payload length.
    #[error("meta type {kind:#04x} expects a {expected}-byte payload, got {actual}")]
    MetaLength {
        /// The meta type byte.
        kind: u8,
        /// The payload length the type requires.
        expected: usize,
        /// The payload length declared on the wire.
        actual: usize,
    },
    /// A key signature mode byte other than 0 (major) or 1 (minor).
    #[error("key signature mode must be 0 or 1, got {0}")]
    KeySignatureMode(u8),
    /// A payload position held a byte with the status bit set.
    #[error("expected a data byte, found {0:#04x}")]
    StatusBitSet(u8),
    /// The track body ended on something other than an end-of-track event.
    #[error("track does not end with an end-of-track event")]
    MissingEndOfTrack,
}

/// An error assembling the chunks of a file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FileError {
    /// The bytes ran out before every declared track chunk was found.
    #[error("header declares {expected} tracks, found {found}")]
    MissingTracks {
        /// The track count in the header chunk.
        expected: u16,
        /// How many `MTrk` chunks were actually present.
        found: u16,
    },
}

/// An error within a 5-byte SMPTE offset payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SmpteError {
    /// The payload must be exactly 5 bytes.
    #[error("smpte offset payload must be 5 bytes, got {0}")]
    Length(usize),
    /// The frame-rate bits were not one of the four defined rates.
    #[error("invalid smpte frame rate type {0}")]
    TrackFrame(u8),
    /// Hours above 23.
    #[error("smpte hour {0} out of range")]
    HourOffset(u8),
    /// Minutes above 59.
    #[error("smpte minute {0} out of range")]
    MinuteOffset(u8),
    /// Seconds above 59.
    #[error("smpte second {0} out of range")]
    SecondOffset(u8),
    /// Subframes above 99.
    #[error("smpte subframe {0} out of range")]
    Subframe(u8),
    /// A header division byte that is not -24, -25, -29 or -30.
    #[error("invalid smpte frames-per-second byte {0}")]
    HeaderFrameTime(i8),
}

/// An error for API misuse: a constructor or mutation called with a value
/// outside its domain.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// Channels are 0-15.
    #[error("channel {0} is out of range (0-15)")]
    Channel(u8),
    /// Data bytes must have the status bit clear.
    #[error("data byte {0:#04x} has the status bit set")]
    DataByte(u8),
    /// Metrical divisions are 1-32767 ticks per quarter note.
    #[error("ticks per quarter note must be 1-32767, got {0}")]
    TicksPerQuarterNote(u16),
    /// Delta times must fit the 28-bit variable-length range.
    #[error("delta time {0} exceeds the 28-bit range")]
    DeltaTicks(u32),
    /// Tempos are 24-bit microseconds per quarter note.
    #[error("tempo {0} exceeds the 24-bit range")]
    Tempo(u32),
    /// Key signatures run from 7 flats to 7 sharps.
    #[error("key signature {0} is out of range (-7 to 7)")]
    KeySignature(i8),
    /// An index past the end of a track or event list.
    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The length of the list at the time of the call.
        len: usize,
    },
    /// Removing a track from a file that has none.
    #[error("cannot remove a track from an empty file")]
    NoTrackToRemove,
    /// Removing an event from a track that has none.
    #[error("cannot remove an event from an empty track")]
    NoEventToRemove,
    /// A type-0 file holds at most one track.
    #[error("a file of type 0 cannot hold more than one track")]
    SingleTrackExceeded,
}

/// An error raised while serializing, when a value cannot be represented
/// on the wire.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A value too large for a variable-length quantity.
    #[error("value {0} exceeds the 28-bit variable-length range")]
    VarIntRange(u32),
    /// A length-prefixed payload too large for a variable-length quantity.
    #[error("payload of {0} bytes exceeds the 28-bit variable-length range")]
    PayloadLength(usize),
    /// A chunk body too large for the 32-bit length field.
    #[error("chunk body of {0} bytes exceeds the 32-bit length field")]
    ChunkLength(usize),
    /// More tracks than the 16-bit count field can declare.
    #[error("{0} tracks exceed the 16-bit track count")]
    TrackCount(usize),
}
