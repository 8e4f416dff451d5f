use alloc::vec::Vec;

use crate::{
    bytes::in_range, event::SmpteOffset, writer::Writer, ArgumentError, Channel, DataByte,
    EncodeError, EventError, ParseError,
};

#[doc = r#"
A meta event: the `0xFF`-status events that describe a track rather than
play it.

Recognized types get a typed variant with its payload decoded and
length-checked; anything else is kept verbatim under
[`MetaMessage::Unknown`] so it survives a parse/encode cycle untouched.
"#]
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MetaMessage {
    /// `0x00`: the number of this sequence.
    SequenceNumber(u16),
    /// `0x01`: arbitrary text.
    Text(Vec<u8>),
    /// `0x02`: a copyright notice.
    Copyright(Vec<u8>),
    /// `0x03`: the name of this track or sequence.
    TrackName(Vec<u8>),
    /// `0x04`: the instrumentation to use.
    InstrumentName(Vec<u8>),
    /// `0x05`: a lyric syllable.
    Lyric(Vec<u8>),
    /// `0x06`: a point in the sequence.
    Marker(Vec<u8>),
    /// `0x07`: a cue to something happening outside the music.
    CuePoint(Vec<u8>),
    /// `0x08`: the name of the program in use.
    ProgramName(Vec<u8>),
    /// `0x09`: the device this track addresses.
    DeviceName(Vec<u8>),
    /// `0x20`: the channel subsequent meta and sysex events relate to.
    MidiChannel(Channel),
    /// `0x21`: the port this track addresses.
    MidiPort(DataByte),
    /// `0x2F`: the mandatory terminal event of every track.
    EndOfTrack,
    /// `0x51`: the tempo from here on.
    Tempo(Tempo),
    /// `0x54`: the SMPTE time at which this track starts.
    SmpteOffset(SmpteOffset),
    /// `0x58`: the time signature from here on.
    TimeSignature(TimeSignature),
    /// `0x59`: the key signature from here on.
    KeySignature(KeySignature),
    /// `0x7F`: data for a specific sequencer.
    SequencerSpecific(Vec<u8>),
    /// A meta type this crate does not recognize, preserved verbatim.
    Unknown {
        /// The meta type byte.
        kind: u8,
        /// The payload, untouched.
        data: Vec<u8>,
    },
}

impl MetaMessage {
    /// The meta type byte of this message.
    pub const fn kind(&self) -> u8 {
        match self {
            Self::SequenceNumber(_) => 0x00,
            Self::Text(_) => 0x01,
            Self::Copyright(_) => 0x02,
            Self::TrackName(_) => 0x03,
            Self::InstrumentName(_) => 0x04,
            Self::Lyric(_) => 0x05,
            Self::Marker(_) => 0x06,
            Self::CuePoint(_) => 0x07,
            Self::ProgramName(_) => 0x08,
            Self::DeviceName(_) => 0x09,
            Self::MidiChannel(_) => 0x20,
            Self::MidiPort(_) => 0x21,
            Self::EndOfTrack => 0x2F,
            Self::Tempo(_) => 0x51,
            Self::SmpteOffset(_) => 0x54,
            Self::TimeSignature(_) => 0x58,
            Self::KeySignature(_) => 0x59,
            Self::SequencerSpecific(_) => 0x7F,
            Self::Unknown { kind, .. } => *kind,
        }
    }

    /// Decode a meta payload. Recognized types are length-checked; a
    /// mismatch is an error rather than a truncation.
    pub(crate) fn parse(kind: u8, data: &[u8]) -> Result<Self, ParseError> {
        if kind > 0x7F {
            return Err(EventError::MetaKind(kind).into());
        }
        Ok(match kind {
            0x00 => {
                expect_len(kind, 2, data)?;
                Self::SequenceNumber(u16::from_be_bytes([data[0], data[1]]))
            }
            0x01 => Self::Text(data.to_vec()),
            0x02 => Self::Copyright(data.to_vec()),
            0x03 => Self::TrackName(data.to_vec()),
            0x04 => Self::InstrumentName(data.to_vec()),
            0x05 => Self::Lyric(data.to_vec()),
            0x06 => Self::Marker(data.to_vec()),
            0x07 => Self::CuePoint(data.to_vec()),
            0x08 => Self::ProgramName(data.to_vec()),
            0x09 => Self::DeviceName(data.to_vec()),
            0x20 => {
                expect_len(kind, 1, data)?;
                Self::MidiChannel(Channel::new(data[0])?)
            }
            0x21 => {
                expect_len(kind, 1, data)?;
                Self::MidiPort(DataByte::new(data[0])?)
            }
            0x2F => {
                expect_len(kind, 0, data)?;
                Self::EndOfTrack
            }
            0x51 => {
                expect_len(kind, 3, data)?;
                Self::Tempo(Tempo::new_from_bytes([data[0], data[1], data[2]]))
            }
            0x54 => Self::SmpteOffset(SmpteOffset::parse(data)?),
            0x58 => {
                expect_len(kind, 4, data)?;
                Self::TimeSignature(TimeSignature {
                    numerator: data[0],
                    denominator: data[1],
                    clocks_per_click: data[2],
                    thirty_seconds_per_quarter: data[3],
                })
            }
            0x59 => {
                expect_len(kind, 2, data)?;
                Self::KeySignature(KeySignature::from_bytes(data[0], data[1])?)
            }
            0x7F => Self::SequencerSpecific(data.to_vec()),
            _ => Self::Unknown {
                kind,
                data: data.to_vec(),
            },
        })
    }

    /// Encode the full event: `0xFF`, the type byte, the length-prefixed
    /// payload.
    pub(crate) fn write(&self, out: &mut Writer) -> Result<(), EncodeError> {
        out.write_u8(0xFF);
        out.write_u8(self.kind());
        match self {
            Self::SequenceNumber(n) => out.write_varint_bytes(&n.to_be_bytes()),
            Self::Text(data)
            | Self::Copyright(data)
            | Self::TrackName(data)
            | Self::InstrumentName(data)
            | Self::Lyric(data)
            | Self::Marker(data)
            | Self::CuePoint(data)
            | Self::ProgramName(data)
            | Self::DeviceName(data)
            | Self::SequencerSpecific(data)
            | Self::Unknown { data, .. } => out.write_varint_bytes(data),
            Self::MidiChannel(channel) => out.write_varint_bytes(&[channel.value()]),
            Self::MidiPort(port) => out.write_varint_bytes(&[port.value()]),
            Self::EndOfTrack => out.write_varint_bytes(&[]),
            Self::Tempo(tempo) => out.write_varint_bytes(&tempo.as_bytes()),
            Self::SmpteOffset(offset) => out.write_varint_bytes(&offset.as_bytes()),
            Self::TimeSignature(ts) => out.write_varint_bytes(&[
                ts.numerator,
                ts.denominator,
                ts.clocks_per_click,
                ts.thirty_seconds_per_quarter,
            ]),
            Self::KeySignature(ks) => out.write_varint_bytes(&[ks.sharps as u8, ks.minor as u8]),
        }
    }
}

fn expect_len(kind: u8, expected: usize, data: &[u8]) -> Result<(), ParseError> {
    if data.len() != expected {
        return Err(EventError::MetaLength {
            kind,
            expected,
            actual: data.len(),
        }
        .into());
    }
    Ok(())
}

#[doc = r#"
A tempo: 24-bit microseconds per quarter note, exactly as stored on the
wire. 500,000 µs per quarter note is 120 beats per minute.
"#]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tempo([u8; 3]);

impl Tempo {
    /// Create a tempo from microseconds per quarter note.
    pub const fn new(micros_per_quarter_note: u32) -> Result<Self, ArgumentError> {
        if micros_per_quarter_note > 0x00FF_FFFF {
            return Err(ArgumentError::Tempo(micros_per_quarter_note));
        }
        let [_, a, b, c] = micros_per_quarter_note.to_be_bytes();
        Ok(Self([a, b, c]))
    }

    /// Create a tempo from the three payload bytes of a `0x51` meta event.
    pub const fn new_from_bytes(bytes: [u8; 3]) -> Self {
        Self(bytes)
    }

    /// Microseconds per quarter note.
    pub const fn micros_per_quarter_note(&self) -> u32 {
        u32::from_be_bytes([0, self.0[0], self.0[1], self.0[2]])
    }

    /// Beats per minute.
    pub fn bpm(&self) -> f64 {
        60_000_000.0 / self.micros_per_quarter_note() as f64
    }

    pub(crate) const fn as_bytes(&self) -> [u8; 3] {
        self.0
    }
}

#[doc = r#"
A time signature as a `0x58` meta event stores it.

The denominator is a power of two: `denominator: 3` means eighth-note beats
in groups of `numerator`.
"#]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    /// Beats per bar.
    pub numerator: u8,
    /// The beat unit, as a power of two.
    pub denominator: u8,
    /// MIDI clocks per metronome click.
    pub clocks_per_click: u8,
    /// Notated 32nd notes per MIDI quarter note (24 MIDI clocks).
    pub thirty_seconds_per_quarter: u8,
}

#[doc = r#"
A key signature as a `0x59` meta event stores it: a signed count of sharps
(negative for flats) and a major/minor flag.
"#]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeySignature {
    /// Sharps when positive, flats when negative. -7 to 7.
    pub sharps: i8,
    /// True for a minor key.
    pub minor: bool,
}

impl KeySignature {
    /// Create a key signature, checking the accidental count.
    pub fn new(sharps: i8, minor: bool) -> Result<Self, ArgumentError> {
        Ok(Self {
            sharps: in_range(sharps, -7..=7, ArgumentError::KeySignature)?,
            minor,
        })
    }

    pub(crate) fn from_bytes(sharps: u8, mode: u8) -> Result<Self, ParseError> {
        let minor = match mode {
            0 => false,
            1 => true,
            mode => return Err(EventError::KeySignatureMode(mode).into()),
        };
        Ok(Self::new(sharps as i8, minor)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tempo_bytes_and_bpm() {
        let tempo = Tempo::new(500_000).unwrap();
        assert_eq!(tempo.as_bytes(), [0x07, 0xA1, 0x20]);
        assert_eq!(tempo.micros_per_quarter_note(), 500_000);
        assert_eq!(tempo.bpm(), 120.0);
        assert_eq!(Tempo::new_from_bytes([0x07, 0xA1, 0x20]), tempo);
        assert_eq!(
            Tempo::new(0x0100_0000),
            Err(ArgumentError::Tempo(0x0100_0000))
        );
    }

    #[test]
    fn recognized_meta_lengths_are_strict() {
        assert_eq!(
            MetaMessage::parse(0x51, &[0x07, 0xA1]),
            Err(EventError::MetaLength {
                kind: 0x51,
                expected: 3,
                actual: 2
            }
            .into())
        );
        assert_eq!(
            MetaMessage::parse(0x58, &[4, 2, 24]),
            Err(EventError::MetaLength {
                kind: 0x58,
                expected: 4,
                actual: 3
            }
            .into())
        );
        assert_eq!(
            MetaMessage::parse(0x2F, &[0x00]),
            Err(EventError::MetaLength {
                kind: 0x2F,
                expected: 0,
                actual: 1
            }
            .into())
        );
    }

    #[test]
    fn unknown_meta_is_preserved() {
        let parsed = MetaMessage::parse(0x60, &[1, 2, 3]).unwrap();
        assert_eq!(
            parsed,
            MetaMessage::Unknown {
                kind: 0x60,
                data: vec![1, 2, 3]
            }
        );
        assert_eq!(parsed.kind(), 0x60);
    }

    #[test]
    fn key_signature_bounds() {
        assert_eq!(
            KeySignature::from_bytes(0xFB, 1),
            Ok(KeySignature {
                sharps: -5,
                minor: true
            })
        );
        assert_eq!(
            KeySignature::from_bytes(8, 0),
            Err(ParseError::Argument(ArgumentError::KeySignature(8)))
        );
        assert_eq!(
            KeySignature::from_bytes(0, 2),
            Err(EventError::KeySignatureMode(2).into())
        );
    }

    #[test]
    fn midi_channel_prefix_is_range_checked() {
        assert!(MetaMessage::parse(0x20, &[0x0F]).is_ok());
        assert_eq!(
            MetaMessage::parse(0x20, &[0x10]),
            Err(ParseError::Argument(ArgumentError::Channel(0x10)))
        );
    }
}
