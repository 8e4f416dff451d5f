use crate::{
    reader::{ReadResult, Reader},
    writer::Writer,
    Channel, DataByte, EventError,
};

#[doc = r#"
A channel voice message: the note, controller, program, pressure and pitch
events that make up the musical content of a track.

On the wire these are a status byte (message kind in the high nibble,
channel in the low nibble) followed by one or two data bytes, with the
status byte omitted under running status.
"#]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelVoiceMessage {
    channel: Channel,
    event: VoiceEvent,
}

impl ChannelVoiceMessage {
    /// Create a new channel voice message.
    pub const fn new(channel: Channel, event: VoiceEvent) -> Self {
        Self { channel, event }
    }

    /// The channel this message addresses.
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// The voice event carried by this message.
    pub const fn event(&self) -> &VoiceEvent {
        &self.event
    }

    /// The status byte: message kind in the high nibble, channel in the
    /// low nibble.
    pub const fn status(&self) -> u8 {
        (self.event.status_nibble() << 4) | self.channel.value()
    }

    /// Read the data bytes following `status`, which the caller has
    /// already resolved (possibly via running status).
    pub(crate) fn read(reader: &mut Reader<'_>, status: u8) -> ReadResult<Self> {
        let channel = Channel::new_unchecked(status & 0x0F);
        let event = match status >> 4 {
            0x8 => VoiceEvent::NoteOff {
                note: read_data_byte(reader)?,
                velocity: read_data_byte(reader)?,
            },
            0x9 => VoiceEvent::NoteOn {
                note: read_data_byte(reader)?,
                velocity: read_data_byte(reader)?,
            },
            0xA => VoiceEvent::Aftertouch {
                note: read_data_byte(reader)?,
                pressure: read_data_byte(reader)?,
            },
            0xB => VoiceEvent::ControlChange {
                controller: read_data_byte(reader)?,
                value: read_data_byte(reader)?,
            },
            0xC => VoiceEvent::ProgramChange {
                program: read_data_byte(reader)?,
            },
            0xD => VoiceEvent::ChannelPressure {
                pressure: read_data_byte(reader)?,
            },
            0xE => VoiceEvent::PitchBend {
                lsb: read_data_byte(reader)?,
                msb: read_data_byte(reader)?,
            },
            _ => unreachable!("caller dispatches only 0x8..=0xE here"),
        };
        Ok(Self { channel, event })
    }

    /// Write the data bytes. The status byte is the codec's business, since
    /// running status may elide it.
    pub(crate) fn write(&self, out: &mut Writer) {
        match self.event {
            VoiceEvent::NoteOff { note, velocity } => out.write_bytes(&[note.0, velocity.0]),
            VoiceEvent::NoteOn { note, velocity } => out.write_bytes(&[note.0, velocity.0]),
            VoiceEvent::Aftertouch { note, pressure } => out.write_bytes(&[note.0, pressure.0]),
            VoiceEvent::ControlChange { controller, value } => {
                out.write_bytes(&[controller.0, value.0])
            }
            VoiceEvent::ProgramChange { program } => out.write_u8(program.0),
            VoiceEvent::ChannelPressure { pressure } => out.write_u8(pressure.0),
            VoiceEvent::PitchBend { lsb, msb } => out.write_bytes(&[lsb.0, msb.0]),
        }
    }
}

fn read_data_byte(reader: &mut Reader<'_>) -> ReadResult<DataByte> {
    let byte = reader.read_u8()?;
    DataByte::new(byte).map_err(|_| reader.parse_err(EventError::StatusBitSet(byte)))
}

#[doc = r#"
The set of possible voice events
"#]
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoiceEvent {
    /// Stop sounding a note.
    NoteOff {
        /// The note to release.
        note: DataByte,
        /// The release velocity.
        velocity: DataByte,
    },
    /// Start sounding a note.
    ///
    /// A `NoteOn` with velocity 0 is conventionally equivalent to a
    /// `NoteOff`; the codec does not rewrite one into the other.
    NoteOn {
        /// The note to sound.
        note: DataByte,
        /// The attack velocity.
        velocity: DataByte,
    },
    /// Polyphonic key pressure applied to a single held note.
    Aftertouch {
        /// The held note.
        note: DataByte,
        /// The pressure amount.
        pressure: DataByte,
    },
    /// A controller value change.
    ControlChange {
        /// The controller number.
        controller: DataByte,
        /// The new controller value.
        value: DataByte,
    },
    /// Select a program (instrument patch) for the channel.
    ProgramChange {
        /// The program number.
        program: DataByte,
    },
    /// Pressure applied across the whole channel.
    ChannelPressure {
        /// The pressure amount.
        pressure: DataByte,
    },
    /// Bend the channel's pitch.
    ///
    /// The wire form is least significant byte first; [`VoiceEvent::bend`]
    /// recombines the 14-bit value.
    PitchBend {
        /// The low 7 bits of the bend.
        lsb: DataByte,
        /// The high 7 bits of the bend.
        msb: DataByte,
    },
}

impl VoiceEvent {
    /// The high nibble of the status byte for this event.
    pub(crate) const fn status_nibble(&self) -> u8 {
        match self {
            Self::NoteOff { .. } => 0x8,
            Self::NoteOn { .. } => 0x9,
            Self::Aftertouch { .. } => 0xA,
            Self::ControlChange { .. } => 0xB,
            Self::ProgramChange { .. } => 0xC,
            Self::ChannelPressure { .. } => 0xD,
            Self::PitchBend { .. } => 0xE,
        }
    }

    /// The first data byte of the wire form.
    pub const fn param1(&self) -> DataByte {
        match self {
            Self::NoteOff { note, .. }
            | Self::NoteOn { note, .. }
            | Self::Aftertouch { note, .. } => *note,
            Self::ControlChange { controller, .. } => *controller,
            Self::ProgramChange { program } => *program,
            Self::ChannelPressure { pressure } => *pressure,
            Self::PitchBend { lsb, .. } => *lsb,
        }
    }

    /// The second data byte of the wire form, absent for the single-byte
    /// program change and channel pressure events.
    pub const fn param2(&self) -> Option<DataByte> {
        match self {
            Self::NoteOff { velocity, .. } | Self::NoteOn { velocity, .. } => Some(*velocity),
            Self::Aftertouch { pressure, .. } => Some(*pressure),
            Self::ControlChange { value, .. } => Some(*value),
            Self::ProgramChange { .. } | Self::ChannelPressure { .. } => None,
            Self::PitchBend { msb, .. } => Some(*msb),
        }
    }

    /// The 14-bit pitch bend value, if this is a pitch bend.
    pub const fn bend(&self) -> Option<u16> {
        match self {
            Self::PitchBend { lsb, msb } => Some(((msb.value() as u16) << 7) | lsb.value() as u16),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db(byte: u8) -> DataByte {
        DataByte::new(byte).unwrap()
    }

    #[test]
    fn status_combines_kind_and_channel() {
        let msg = ChannelVoiceMessage::new(
            Channel::new(3).unwrap(),
            VoiceEvent::NoteOn {
                note: db(60),
                velocity: db(64),
            },
        );
        assert_eq!(msg.status(), 0x93);
    }

    #[test]
    fn pitch_bend_recombines_fourteen_bits() {
        let event = VoiceEvent::PitchBend {
            lsb: db(0x01),
            msb: db(0x40),
        };
        assert_eq!(event.bend(), Some(0x2001));
        assert_eq!(event.param1(), db(0x01));
        assert_eq!(event.param2(), Some(db(0x40)));
    }

    #[test]
    fn single_byte_events_have_no_second_param() {
        let event = VoiceEvent::ProgramChange { program: db(12) };
        assert_eq!(event.param2(), None);
    }
}
