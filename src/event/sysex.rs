use alloc::vec::Vec;

use crate::{
    reader::{ReadResult, Reader},
    writer::Writer,
    EncodeError,
};

#[doc = r#"
A system exclusive event.

The payload is stored exactly as length-prefixed on the wire, without the
leading `0xF0`/`0xF7` status byte. By convention a complete dump ends with
a `0xF7` terminator byte, which is part of the payload here; the codec does
not add or strip one.
"#]
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SystemExclusiveMessage {
    data: Vec<u8>,
}

impl SystemExclusiveMessage {
    /// Create a sysex event from its payload.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }

    /// The payload bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Read the length-prefixed payload following a consumed `0xF0` or
    /// `0xF7` status byte.
    pub(crate) fn read(reader: &mut Reader<'_>) -> ReadResult<Self> {
        let len = reader.read_varint()? as usize;
        let data = reader.read_bytes(len)?;
        Ok(Self {
            data: data.to_vec(),
        })
    }

    /// Write the event, always using the `0xF0` status form.
    pub(crate) fn write(&self, out: &mut Writer) -> Result<(), EncodeError> {
        out.write_u8(0xF0);
        out.write_varint_bytes(&self.data)
    }
}
