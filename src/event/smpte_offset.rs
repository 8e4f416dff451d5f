use crate::{bytes::in_range, file::SmpteFps, SmpteError};

#[doc = r#"
The SMPTE time at which a track starts, from a `0x54` meta event.

When a file uses SMPTE-based timing this pins the track to an absolute
position instead of the start of the sequence, which is what video and
broadcast work needs.

The payload is five bytes:
- Byte 0: `0rrhhhhh` - frame rate type in bits 5-6, hours in the low five
- Byte 1: minutes (0-59)
- Byte 2: seconds (0-59)
- Byte 3: frames (bounded by the frame rate)
- Byte 4: fractional frames in 100ths (0-99)
"#]
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmpteOffset {
    /// The frame rate for this offset.
    ///
    /// This should match the file's frame rate when the file uses
    /// SMPTE-based timing; mismatched rates cause synchronization errors.
    pub fps: SmpteFps,
    /// Hour component of the time code (0-23).
    pub hour: u8,
    /// Minute component of the time code (0-59).
    pub minute: u8,
    /// Second component of the time code (0-59).
    pub second: u8,
    /// Frame number within the current second.
    ///
    /// The valid range depends on the frame rate (0-23 at 24 fps, up to
    /// 0-29 at 30 fps).
    pub frame: u8,
    /// Subframe component for additional precision (0-99).
    ///
    /// Each subframe is 1/100th of a frame.
    pub subframe: u8,
}

impl SmpteOffset {
    /// Calculate the offset in microseconds using a different frame rate.
    ///
    /// Useful when the file's timing uses a different SMPTE rate than the
    /// offset itself; the provided `fps` overrides the offset's own rate.
    pub fn as_micros_with_override(&self, fps: SmpteFps) -> f64 {
        let whole_seconds =
            u64::from(self.hour) * 3600 + u64::from(self.minute) * 60 + u64::from(self.second);
        // subframes are hundredths of a frame
        let frames = f64::from(self.frame) + f64::from(self.subframe) / 100.0;
        whole_seconds as f64 * 1_000_000.0 + frames * 1_000_000.0 / fps.as_f64()
    }

    /// Convert this SMPTE offset to microseconds using its own frame rate.
    pub fn as_micros(&self) -> f64 {
        self.as_micros_with_override(self.fps)
    }

    /// Parse a SMPTE offset from the 5-byte payload of a `0x54` meta event.
    ///
    /// Every clock field is range-checked. The frame number is not, since
    /// its bound depends on the frame rate and files disagree on whether
    /// to honor it.
    pub fn parse(data: &[u8]) -> Result<Self, SmpteError> {
        let &[lead, minute, second, frame, subframe] = data else {
            return Err(SmpteError::Length(data.len()));
        };
        Ok(Self {
            fps: SmpteFps::from_offset_bits(lead >> 5)?,
            hour: in_range(lead & 0x1F, 0..=23, SmpteError::HourOffset)?,
            minute: in_range(minute, 0..=59, SmpteError::MinuteOffset)?,
            second: in_range(second, 0..=59, SmpteError::SecondOffset)?,
            frame,
            subframe: in_range(subframe, 0..=99, SmpteError::Subframe)?,
        })
    }

    /// The inverse of [`SmpteOffset::parse`].
    pub(crate) const fn as_bytes(&self) -> [u8; 5] {
        [
            (self.fps.as_offset_bits() << 5) | (self.hour & 0x1F),
            self.minute,
            self.second,
            self.frame,
            self.subframe,
        ]
    }
}

#[test]
fn parse_offset_payload() {
    use pretty_assertions::assert_eq;
    // 05:42:07 at 30 fps, frame 11 and 60/100
    let bytes = [0x65, 0x2A, 0x07, 0x0B, 0x3C];
    let offset = SmpteOffset::parse(&bytes).unwrap();

    assert_eq!(offset.fps, SmpteFps::Thirty);
    assert_eq!(offset.hour, 5);
    assert_eq!(offset.minute, 42);
    assert_eq!(offset.second, 7);
    assert_eq!(offset.frame, 11);
    assert_eq!(offset.subframe, 60);

    assert_eq!(offset.as_bytes(), bytes);
}

#[test]
fn reject_out_of_range_fields() {
    use pretty_assertions::assert_eq;
    let cases: [(&[u8], SmpteError); 6] = [
        (&[0x65, 0x2A, 0x07, 0x0B], SmpteError::Length(4)),
        (&[0x9D, 0x00, 0x00, 0x00, 0x00], SmpteError::TrackFrame(4)),
        (&[0x1D, 0x00, 0x00, 0x00, 0x00], SmpteError::HourOffset(29)),
        (&[0x65, 0x3D, 0x00, 0x00, 0x00], SmpteError::MinuteOffset(61)),
        (&[0x65, 0x00, 0x3C, 0x00, 0x00], SmpteError::SecondOffset(60)),
        (&[0x65, 0x00, 0x00, 0x00, 0xFF], SmpteError::Subframe(255)),
    ];
    for (bytes, expected) in cases {
        assert_eq!(SmpteOffset::parse(bytes).unwrap_err(), expected);
    }
}

#[test]
fn micros_scale_with_the_frame_rate() {
    // one frame and fifty subframes: 1.5 frames past the whole second
    let offset = SmpteOffset {
        fps: SmpteFps::TwentyFive,
        hour: 0,
        minute: 0,
        second: 2,
        frame: 1,
        subframe: 50,
    };
    let at_25 = 2_000_000.0 + 1.5 * 1_000_000.0 / 25.0;
    assert!((offset.as_micros() - at_25).abs() < 0.001);

    let at_24 = 2_000_000.0 + 1.5 * 1_000_000.0 / 24.0;
    assert!((offset.as_micros_with_override(SmpteFps::TwentyFour) - at_24).abs() < 0.001);
}
