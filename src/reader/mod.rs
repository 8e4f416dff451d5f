#![doc = r#"
A positioned reader over a borrowed byte buffer.

Every read advances the position and fails with
[`ReaderErrorKind::OutOfBounds`] when it would cross the end of the buffer.
Multi-byte integers are available in both byte orders; the SMF format itself
only uses the big-endian forms.
"#]

mod error;
pub use error::*;

use crate::ParseError;

#[doc = r#"
A cursor over a borrowed byte buffer.

Sub-readers created with [`Reader::slice`] keep reporting positions relative
to the outermost buffer, so errors raised deep inside a chunk body still
carry the absolute byte offset.
"#]
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    position: usize,
    /// Absolute offset of `bytes[0]` in the outermost buffer.
    offset: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader over a byte slice.
    pub const fn from_byte_slice(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            position: 0,
            offset: 0,
        }
    }

    /// The absolute position in the outermost buffer.
    pub const fn buffer_position(&self) -> usize {
        self.offset + self.position
    }

    /// How many bytes are left in this reader's view.
    pub const fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// True when every byte of this reader's view has been consumed.
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Move the position to `position` within this reader's view.
    pub fn seek(&mut self, position: usize) -> ReadResult<()> {
        if position > self.bytes.len() {
            return Err(self.out_of_bounds(position - self.position));
        }
        self.position = position;
        Ok(())
    }

    /// Peek the next byte without advancing.
    pub fn peek_u8(&self) -> ReadResult<u8> {
        match self.bytes.get(self.position) {
            Some(byte) => Ok(*byte),
            None => Err(self.out_of_bounds(1)),
        }
    }

    /// Read `len` bytes as a borrowed slice.
    pub fn read_bytes(&mut self, len: usize) -> ReadResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(self.out_of_bounds(len));
        }
        let start = self.position;
        self.position += len;
        Ok(&self.bytes[start..start + len])
    }

    /// Read exactly `N` bytes into an array.
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Split off a sub-reader over the next `len` bytes, advancing this
    /// reader past them.
    pub fn slice(&mut self, len: usize) -> ReadResult<Reader<'a>> {
        let offset = self.buffer_position();
        let bytes = self.read_bytes(len)?;
        Ok(Reader {
            bytes,
            position: 0,
            offset,
        })
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let byte = self.peek_u8()?;
        self.position += 1;
        Ok(byte)
    }

    /// Read a signed byte.
    pub fn read_i8(&mut self) -> ReadResult<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Read a big-endian `u16`.
    pub fn read_u16_be(&mut self) -> ReadResult<u16> {
        Ok(u16::from_be_bytes(self.read_exact_size()?))
    }

    /// Read a little-endian `u16`.
    pub fn read_u16_le(&mut self) -> ReadResult<u16> {
        Ok(u16::from_le_bytes(self.read_exact_size()?))
    }

    /// Read a big-endian `i16`.
    pub fn read_i16_be(&mut self) -> ReadResult<i16> {
        Ok(i16::from_be_bytes(self.read_exact_size()?))
    }

    /// Read a little-endian `i16`.
    pub fn read_i16_le(&mut self) -> ReadResult<i16> {
        Ok(i16::from_le_bytes(self.read_exact_size()?))
    }

    /// Read a big-endian `u32`.
    pub fn read_u32_be(&mut self) -> ReadResult<u32> {
        Ok(u32::from_be_bytes(self.read_exact_size()?))
    }

    /// Read a little-endian `u32`.
    pub fn read_u32_le(&mut self) -> ReadResult<u32> {
        Ok(u32::from_le_bytes(self.read_exact_size()?))
    }

    /// Read a big-endian `i32`.
    pub fn read_i32_be(&mut self) -> ReadResult<i32> {
        Ok(i32::from_be_bytes(self.read_exact_size()?))
    }

    /// Read a little-endian `i32`.
    pub fn read_i32_le(&mut self) -> ReadResult<i32> {
        Ok(i32::from_le_bytes(self.read_exact_size()?))
    }

    /// Read a big-endian `f32`.
    pub fn read_f32_be(&mut self) -> ReadResult<f32> {
        Ok(f32::from_be_bytes(self.read_exact_size()?))
    }

    /// Read a little-endian `f32`.
    pub fn read_f32_le(&mut self) -> ReadResult<f32> {
        Ok(f32::from_le_bytes(self.read_exact_size()?))
    }

    /// Read a big-endian `f64`.
    pub fn read_f64_be(&mut self) -> ReadResult<f64> {
        Ok(f64::from_be_bytes(self.read_exact_size()?))
    }

    /// Read a little-endian `f64`.
    pub fn read_f64_le(&mut self) -> ReadResult<f64> {
        Ok(f64::from_le_bytes(self.read_exact_size()?))
    }

    /// Read a variable-length quantity: 7 bits per byte, big-endian groups,
    /// the status bit of every byte but the last set.
    ///
    /// The format caps these at 4 bytes; a fourth byte with its
    /// continuation bit still set fails with
    /// [`ParseError::UnterminatedVarInt`].
    pub fn read_varint(&mut self) -> ReadResult<u32> {
        let mut value: u32 = 0;
        for _ in 0..4 {
            let byte = self.read_u8()?;
            value = (value << 7) | u32::from(byte & 0x7F);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(self.parse_err(ParseError::UnterminatedVarInt))
    }

    /// Wrap a parse failure with this reader's current absolute position.
    pub(crate) fn parse_err(&self, error: impl Into<ParseError>) -> ReaderError {
        ReaderError::parse_error(self.buffer_position(), error.into())
    }

    const fn out_of_bounds(&self, requested: usize) -> ReaderError {
        ReaderError::new(
            self.buffer_position(),
            ReaderErrorKind::OutOfBounds {
                requested,
                position: self.buffer_position(),
                size: self.offset + self.bytes.len(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::VARINT_MAX;

    #[test]
    fn reads_advance_and_report_position() {
        let bytes = [0x4D, 0x54, 0x68, 0x64, 0x00, 0x01];
        let mut reader = Reader::from_byte_slice(&bytes);
        assert_eq!(reader.read_u32_be().unwrap(), 0x4D54_6864);
        assert_eq!(reader.buffer_position(), 4);
        assert_eq!(reader.read_u16_be().unwrap(), 1);
        assert!(reader.is_empty());
    }

    #[test]
    fn byte_orders() {
        let bytes = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::from_byte_slice(&bytes);
        assert_eq!(reader.read_u16_le().unwrap(), 0x0201);
        reader.seek(0).unwrap();
        assert_eq!(reader.read_i32_be().unwrap(), 0x0102_0304);
        reader.seek(0).unwrap();
        assert_eq!(reader.read_f32_be().unwrap(), f32::from_be_bytes(bytes));
    }

    #[test]
    fn out_of_bounds_carries_context() {
        let mut reader = Reader::from_byte_slice(&[0x00, 0x01]);
        reader.read_u8().unwrap();
        let err = reader.read_u32_be().unwrap_err();
        assert!(err.is_out_of_bounds());
        match err.error_kind() {
            ReaderErrorKind::OutOfBounds {
                requested,
                position,
                size,
            } => {
                assert_eq!(*requested, 4);
                assert_eq!(*position, 1);
                assert_eq!(*size, 2);
            }
            kind => panic!("unexpected kind {kind:?}"),
        }
    }

    #[test]
    fn sub_reader_keeps_absolute_positions() {
        let bytes = [0xAA, 0xBB, 0xCC, 0xDD, 0xEE];
        let mut reader = Reader::from_byte_slice(&bytes);
        reader.read_u8().unwrap();
        let mut sub = reader.slice(3).unwrap();
        assert_eq!(reader.buffer_position(), 4);
        assert_eq!(sub.buffer_position(), 1);
        sub.read_u8().unwrap();
        assert_eq!(sub.buffer_position(), 2);
        let err = sub.read_u32_be().unwrap_err();
        assert_eq!(err.position(), 2);
    }

    #[test]
    fn varint_decoding() {
        for (bytes, expected) in [
            (&[0x00][..], 0),
            (&[0x40][..], 0x40),
            (&[0x7F][..], 0x7F),
            (&[0x81, 0x00][..], 0x80),
            (&[0xC0, 0x00][..], 0x2000),
            (&[0xFF, 0x7F][..], 0x3FFF),
            (&[0x81, 0x80, 0x00][..], 0x4000),
            (&[0xFF, 0xFF, 0x7F][..], 0x001F_FFFF),
            (&[0x81, 0x80, 0x80, 0x00][..], 0x0020_0000),
            (&[0xFF, 0xFF, 0xFF, 0x7F][..], VARINT_MAX),
        ] {
            let mut reader = Reader::from_byte_slice(bytes);
            assert_eq!(reader.read_varint().unwrap(), expected);
            assert!(reader.is_empty());
        }
    }

    #[test]
    fn varint_without_terminator_fails() {
        let mut reader = Reader::from_byte_slice(&[0xFF, 0xFF, 0xFF, 0xFF]);
        let err = reader.read_varint().unwrap_err();
        assert!(matches!(
            err.error_kind(),
            ReaderErrorKind::ParseError(ParseError::UnterminatedVarInt)
        ));
    }
}
