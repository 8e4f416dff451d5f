#![doc = r#"
The track event model and its codec.

Every event in a track is a delta time (ticks since the previous event)
followed by a message. Channel voice messages participate in running
status: consecutive events with the same status byte may omit it on the
wire. The codec threads that state explicitly as a `&mut Option<u8>`, so
parsing and encoding stay pure functions of cursor plus running status,
reset at every track boundary.
"#]

mod channel;
pub use channel::*;

mod meta;
pub use meta::*;

mod smpte_offset;
pub use smpte_offset::*;

mod sysex;
pub use sysex::*;

use crate::{
    reader::{ReadResult, Reader},
    writer::{Writer, VARINT_MAX},
    ArgumentError, EncodeError, EventError,
};

#[doc = r#"
The set of possible track messages
"#]
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackMessage {
    /// A channel voice message
    ChannelVoice(ChannelVoiceMessage),
    /// A system exclusive message
    SystemExclusive(SystemExclusiveMessage),
    /// A meta message
    Meta(MetaMessage),
}

impl From<ChannelVoiceMessage> for TrackMessage {
    fn from(value: ChannelVoiceMessage) -> Self {
        Self::ChannelVoice(value)
    }
}

impl From<SystemExclusiveMessage> for TrackMessage {
    fn from(value: SystemExclusiveMessage) -> Self {
        Self::SystemExclusive(value)
    }
}

impl From<MetaMessage> for TrackMessage {
    fn from(value: MetaMessage) -> Self {
        Self::Meta(value)
    }
}

#[doc = r#"
A single event in a track: a delta time in ticks since the previous event,
and the message that fires after that delay.
"#]
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackEvent {
    delta_ticks: u32,
    message: TrackMessage,
}

impl TrackEvent {
    /// Create a new track event, checking that the delta time fits the
    /// 28-bit variable-length range.
    pub fn new(delta_ticks: u32, message: impl Into<TrackMessage>) -> Result<Self, ArgumentError> {
        if delta_ticks > VARINT_MAX {
            return Err(ArgumentError::DeltaTicks(delta_ticks));
        }
        Ok(Self {
            delta_ticks,
            message: message.into(),
        })
    }

    /// The mandatory terminal event of a track, at delta 0.
    pub const fn end_of_track() -> Self {
        Self {
            delta_ticks: 0,
            message: TrackMessage::Meta(MetaMessage::EndOfTrack),
        }
    }

    /// Ticks since the previous event in the same track.
    pub const fn delta_ticks(&self) -> u32 {
        self.delta_ticks
    }

    /// The message fired by this event.
    pub const fn message(&self) -> &TrackMessage {
        &self.message
    }

    /// True for the terminal end-of-track meta event.
    pub const fn is_end_of_track(&self) -> bool {
        matches!(self.message, TrackMessage::Meta(MetaMessage::EndOfTrack))
    }

    /// Parse one event, updating `running_status`.
    ///
    /// `running_status` must start as `None` at the top of each track; a
    /// channel voice status byte arms it, and any meta, sysex or system
    /// status byte clears it again.
    pub(crate) fn read(
        reader: &mut Reader<'_>,
        running_status: &mut Option<u8>,
    ) -> ReadResult<Self> {
        let delta_ticks = reader.read_varint()?;

        let byte = reader.peek_u8()?;
        let status = if byte & 0x80 != 0 {
            reader.read_u8()?;
            byte
        } else {
            // A data byte in status position: reuse the running status,
            // leaving the byte for the payload read below.
            match *running_status {
                Some(status) => status,
                None => return Err(reader.parse_err(EventError::OrphanRunningStatus)),
            }
        };

        let message = match status {
            0x80..=0xEF => {
                *running_status = Some(status);
                TrackMessage::ChannelVoice(ChannelVoiceMessage::read(reader, status)?)
            }
            0xFF => {
                *running_status = None;
                let kind = reader.read_u8()?;
                let len = reader.read_varint()? as usize;
                let data = reader.read_bytes(len)?;
                TrackMessage::Meta(MetaMessage::parse(kind, data).map_err(|e| reader.parse_err(e))?)
            }
            0xF0 | 0xF7 => {
                *running_status = None;
                TrackMessage::SystemExclusive(SystemExclusiveMessage::read(reader)?)
            }
            status => return Err(reader.parse_err(EventError::Unsupported(status))),
        };

        Ok(Self {
            delta_ticks,
            message,
        })
    }

    /// Encode one event, using and updating `running_status`.
    pub(crate) fn write(
        &self,
        running_status: &mut Option<u8>,
        out: &mut Writer,
    ) -> Result<(), EncodeError> {
        out.write_varint(self.delta_ticks)?;
        match &self.message {
            TrackMessage::ChannelVoice(message) => {
                let status = message.status();
                if *running_status != Some(status) {
                    out.write_u8(status);
                }
                *running_status = Some(status);
                message.write(out);
                Ok(())
            }
            TrackMessage::SystemExclusive(message) => {
                *running_status = None;
                message.write(out)
            }
            TrackMessage::Meta(message) => {
                *running_status = None;
                message.write(out)
            }
        }
    }
}
