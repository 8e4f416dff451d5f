#![doc = r#"
Chunk framing for MIDI files.

A chunk is a 4-character ASCII type identifier, a 32-bit big-endian length,
then that many bytes of body. The format defines `MThd` and `MTrk`; files
may carry additional proprietary chunks, which readers skip.
"#]

use crate::{
    reader::{ReadResult, Reader},
    writer::Writer,
    ChunkError, EncodeError,
};

/// The header chunk tag.
pub(crate) const HEADER_TAG: &[u8; 4] = b"MThd";
/// The track chunk tag.
pub(crate) const TRACK_TAG: &[u8; 4] = b"MTrk";

/// Read one chunk frame, returning its tag and a sub-reader over exactly
/// its body. The outer reader is left at the next chunk.
pub(crate) fn read<'a>(reader: &mut Reader<'a>) -> ReadResult<([u8; 4], Reader<'a>)> {
    let tag = reader.read_exact_size()?;
    let len = reader.read_u32_be()?;
    let body = reader.slice(len as usize)?;
    Ok((tag, body))
}

/// Read one chunk frame, requiring its tag to be `expected`.
pub(crate) fn expect<'a>(
    reader: &mut Reader<'a>,
    expected: &'static str,
) -> ReadResult<Reader<'a>> {
    let position = reader.buffer_position();
    let (tag, body) = read(reader)?;
    if &tag[..] != expected.as_bytes() {
        return Err(crate::reader::ReaderError::parse_error(
            position,
            ChunkError::TypeMismatch {
                expected,
                actual: tag,
            }
            .into(),
        ));
    }
    Ok(body)
}

/// Frame a finished body: tag, length, body.
pub(crate) fn write(tag: &[u8; 4], body: &[u8], out: &mut Writer) -> Result<(), EncodeError> {
    let len = u32::try_from(body.len()).map_err(|_| EncodeError::ChunkLength(body.len()))?;
    out.write_bytes(tag);
    out.write_u32_be(len);
    out.write_bytes(body);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseError;
    use crate::reader::ReaderErrorKind;

    #[test]
    fn frame_and_unframe() {
        let mut out = Writer::new();
        write(TRACK_TAG, &[0x00, 0xFF, 0x2F, 0x00], &mut out).unwrap();
        assert_eq!(
            out.as_slice(),
            &[0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x04, 0x00, 0xFF, 0x2F, 0x00]
        );

        let bytes = out.into_vec();
        let mut reader = Reader::from_byte_slice(&bytes);
        let body = expect(&mut reader, "MTrk").unwrap();
        assert_eq!(body.remaining(), 4);
        assert!(reader.is_empty());
    }

    #[test]
    fn mismatched_tag_reports_both_tags() {
        let bytes = [0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x00];
        let mut reader = Reader::from_byte_slice(&bytes);
        let err = expect(&mut reader, "MTrk").unwrap_err();
        assert_eq!(err.position(), 0);
        match err.error_kind() {
            ReaderErrorKind::ParseError(ParseError::Chunk(ChunkError::TypeMismatch {
                expected,
                actual,
            })) => {
                assert_eq!(*expected, "MTrk");
                assert_eq!(actual, b"MThd");
            }
            kind => panic!("unexpected kind {kind:?}"),
        }
    }

    #[test]
    fn truncated_body_is_out_of_bounds() {
        let bytes = [0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x08, 0x00];
        let mut reader = Reader::from_byte_slice(&bytes);
        let err = read(&mut reader).unwrap_err();
        assert!(err.is_out_of_bounds());
    }
}
