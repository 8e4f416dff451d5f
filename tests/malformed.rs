use smfio::prelude::*;

/// Build a single-track file around the given `MTrk` body.
fn file_with_track_body(body: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&[
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x01, 0x00, 0x01, 0x00, 0x60,
    ]);
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&(body.len() as u32).to_be_bytes());
    bytes.extend_from_slice(body);
    bytes
}

fn parse_error_of(bytes: &[u8]) -> ParseError {
    let err = MidiFile::parse(bytes).unwrap_err();
    match err.error_kind() {
        ReaderErrorKind::ParseError(e) => e.clone(),
        kind => panic!("expected a parse error, got {kind:?}"),
    }
}

#[test]
fn riff_magic_is_not_midi() {
    let bytes = [0x52, 0x49, 0x46, 0x46, 0x00, 0x00, 0x00, 0x00];
    assert_eq!(parse_error_of(&bytes), ParseError::NotMidi);
}

#[test]
fn empty_buffer_is_not_midi() {
    assert_eq!(parse_error_of(&[]), ParseError::NotMidi);
}

#[test]
fn truncated_varint_fails() {
    // four delta bytes with the continuation bit set and no terminator
    let bytes = file_with_track_body(&[0xFF, 0xFF, 0xFF, 0xFF, 0x00]);
    assert_eq!(parse_error_of(&bytes), ParseError::UnterminatedVarInt);
}

#[test]
fn tempo_with_wrong_payload_length_fails() {
    let bytes = file_with_track_body(&[0x00, 0xFF, 0x51, 0x02, 0x07, 0xA1]);
    assert_eq!(
        parse_error_of(&bytes),
        ParseError::Event(EventError::MetaLength {
            kind: 0x51,
            expected: 3,
            actual: 2
        })
    );
}

#[test]
fn time_signature_with_wrong_payload_length_fails() {
    let bytes = file_with_track_body(&[0x00, 0xFF, 0x58, 0x03, 0x04, 0x02, 0x18]);
    assert_eq!(
        parse_error_of(&bytes),
        ParseError::Event(EventError::MetaLength {
            kind: 0x58,
            expected: 4,
            actual: 3
        })
    );
}

#[test]
fn missing_end_of_track_fails() {
    let bytes = file_with_track_body(&[0x00, 0x90, 0x3C, 0x40]);
    assert_eq!(
        parse_error_of(&bytes),
        ParseError::Event(EventError::MissingEndOfTrack)
    );
}

#[test]
fn running_status_without_prior_status_fails() {
    let bytes = file_with_track_body(&[0x00, 0x3C, 0x40]);
    assert_eq!(
        parse_error_of(&bytes),
        ParseError::Event(EventError::OrphanRunningStatus)
    );
}

#[test]
fn realtime_status_inside_a_track_fails() {
    let bytes = file_with_track_body(&[0x00, 0xF8, 0x00, 0xFF, 0x2F, 0x00]);
    assert_eq!(
        parse_error_of(&bytes),
        ParseError::Event(EventError::Unsupported(0xF8))
    );
}

#[test]
fn missing_declared_track_fails() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&[
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x01, 0x00, 0x02, 0x00, 0x60,
    ]);
    bytes.extend_from_slice(&[
        0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x04, 0x00, 0xFF, 0x2F, 0x00,
    ]);
    assert_eq!(
        parse_error_of(&bytes),
        ParseError::File(FileError::MissingTracks {
            expected: 2,
            found: 1
        })
    );
}

#[test]
fn duplicate_header_chunk_fails() {
    let mut bytes = Vec::new();
    let header = [
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x01, 0x00, 0x01, 0x00, 0x60,
    ];
    bytes.extend_from_slice(&header);
    bytes.extend_from_slice(&header);
    assert_eq!(
        parse_error_of(&bytes),
        ParseError::Chunk(ChunkError::DuplicateHeader)
    );
}

#[test]
fn wrong_header_chunk_length_fails() {
    let bytes = [
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x07, 0x00, 0x01, 0x00, 0x01, 0x00, 0x60, 0x00,
    ];
    assert_eq!(
        parse_error_of(&bytes),
        ParseError::Header(HeaderError::Length(7))
    );
}

#[test]
fn format_zero_with_zero_tracks_fails() {
    let bytes = [
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0x60,
    ];
    assert_eq!(
        parse_error_of(&bytes),
        ParseError::Header(HeaderError::SingleTrackCount(0))
    );
}

#[test]
fn truncated_track_chunk_is_out_of_bounds() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&[
        0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x01, 0x00, 0x01, 0x00, 0x60,
    ]);
    // declares 64 body bytes, provides 4
    bytes.extend_from_slice(b"MTrk");
    bytes.extend_from_slice(&64u32.to_be_bytes());
    bytes.extend_from_slice(&[0x00, 0xFF, 0x2F, 0x00]);

    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(err.is_out_of_bounds());
    assert_eq!(err.position(), 22);
}

#[test]
fn error_positions_point_into_the_buffer() {
    // the bad tempo length sits in the first track body
    let bytes = file_with_track_body(&[0x00, 0xFF, 0x51, 0x02, 0x07, 0xA1]);
    let err = MidiFile::parse(&bytes).unwrap_err();
    assert!(err.position() >= 22 && err.position() <= bytes.len());
}
