use alloc::vec::Vec;

use crate::{
    event::TrackEvent,
    file::chunk,
    reader::{ReadResult, Reader, ReaderError},
    writer::Writer,
    ArgumentError, EncodeError, EventError,
};

#[doc = r#"
An ordered sequence of [`TrackEvent`]s.

On the wire the last event of every track is an end-of-track meta event.
The parser enforces that; the constructor and encoder guarantee it by
appending one at delta 0 when the caller's list lacks it.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    events: Vec<TrackEvent>,
}

impl Track {
    /// Create a track from a list of events, appending an end-of-track
    /// event at delta 0 when the list does not already end in one.
    pub fn new(mut events: Vec<TrackEvent>) -> Self {
        if !matches!(events.last(), Some(event) if event.is_end_of_track()) {
            events.push(TrackEvent::end_of_track());
        }
        Self { events }
    }

    /// The events of this track, in order.
    pub fn events(&self) -> &[TrackEvent] {
        &self.events
    }

    /// The event at `index`, or nothing if out of range.
    pub fn event(&self, index: usize) -> Option<&TrackEvent> {
        self.events.get(index)
    }

    /// How many events this track holds.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when the track holds no events at all.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append an event.
    pub fn push_event(&mut self, event: TrackEvent) {
        self.events.push(event);
    }

    /// Insert an event at `index`, shifting everything after it.
    pub fn insert_event(&mut self, index: usize, event: TrackEvent) -> Result<(), ArgumentError> {
        if index > self.events.len() {
            return Err(ArgumentError::IndexOutOfBounds {
                index,
                len: self.events.len(),
            });
        }
        self.events.insert(index, event);
        Ok(())
    }

    /// Remove and return the event at `index`.
    pub fn remove_event(&mut self, index: usize) -> Result<TrackEvent, ArgumentError> {
        if index >= self.events.len() {
            return Err(ArgumentError::IndexOutOfBounds {
                index,
                len: self.events.len(),
            });
        }
        Ok(self.events.remove(index))
    }

    /// Remove and return the last event.
    pub fn pop_event(&mut self) -> Result<TrackEvent, ArgumentError> {
        self.events.pop().ok_or(ArgumentError::NoEventToRemove)
    }

    /// Parse a track chunk body: events until the body is exhausted, the
    /// last of which must be end-of-track. Running status starts cleared.
    pub(crate) fn read(mut body: Reader<'_>) -> ReadResult<Self> {
        let mut events = Vec::new();
        let mut running_status = None;
        while !body.is_empty() {
            events.push(TrackEvent::read(&mut body, &mut running_status)?);
        }
        if !matches!(events.last(), Some(event) if event.is_end_of_track()) {
            return Err(ReaderError::parse_error(
                body.buffer_position(),
                EventError::MissingEndOfTrack.into(),
            ));
        }
        Ok(Self { events })
    }

    /// Encode the track as an `MTrk` chunk. Running status starts cleared;
    /// an end-of-track event is appended when the list lacks one.
    pub(crate) fn write(&self, out: &mut Writer) -> Result<(), EncodeError> {
        // a little over 3 bytes/event is typical with running status
        let mut body = Writer::with_capacity(self.events.len() * 4 + 4);
        let mut running_status = None;
        for event in &self.events {
            event.write(&mut running_status, &mut body)?;
        }
        if !matches!(self.events.last(), Some(event) if event.is_end_of_track()) {
            TrackEvent::end_of_track().write(&mut running_status, &mut body)?;
        }
        chunk::write(chunk::TRACK_TAG, body.as_slice(), out)
    }
}

impl IntoIterator for Track {
    type IntoIter = alloc::vec::IntoIter<TrackEvent>;
    type Item = TrackEvent;
    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl<'a> IntoIterator for &'a Track {
    type IntoIter = core::slice::Iter<'a, TrackEvent>;
    type Item = &'a TrackEvent;
    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{MetaMessage, Tempo};

    #[test]
    fn new_appends_end_of_track() {
        let track = Track::new(alloc::vec![]);
        assert_eq!(track.events(), &[TrackEvent::end_of_track()]);

        let already_terminated = Track::new(alloc::vec![TrackEvent::end_of_track()]);
        assert_eq!(already_terminated.len(), 1);
    }

    #[test]
    fn empty_track_encodes_to_twelve_bytes() {
        let mut out = Writer::new();
        Track::new(alloc::vec![]).write(&mut out).unwrap();
        assert_eq!(
            out.as_slice(),
            &[0x4D, 0x54, 0x72, 0x6B, 0x00, 0x00, 0x00, 0x04, 0x00, 0xFF, 0x2F, 0x00]
        );
    }

    #[test]
    fn track_without_terminator_fails_to_parse() {
        // a lone tempo event, no end-of-track
        let body = [0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20];
        let err = Track::read(Reader::from_byte_slice(&body)).unwrap_err();
        assert!(matches!(
            err.error_kind(),
            crate::reader::ReaderErrorKind::ParseError(crate::ParseError::Event(
                EventError::MissingEndOfTrack
            ))
        ));
    }

    #[test]
    fn event_mutation_by_index() {
        let mut track = Track::new(alloc::vec![]);
        let tempo = TrackEvent::new(0, MetaMessage::Tempo(Tempo::new(500_000).unwrap())).unwrap();
        track.insert_event(0, tempo.clone()).unwrap();
        assert_eq!(track.len(), 2);
        assert_eq!(track.event(0), Some(&tempo));

        assert_eq!(
            track.insert_event(5, tempo.clone()),
            Err(ArgumentError::IndexOutOfBounds { index: 5, len: 2 })
        );
        assert_eq!(track.remove_event(0).unwrap(), tempo);
        assert!(matches!(
            track.remove_event(7),
            Err(ArgumentError::IndexOutOfBounds { index: 7, len: 1 })
        ));

        track.pop_event().unwrap();
        assert_eq!(track.pop_event(), Err(ArgumentError::NoEventToRemove));
    }
}
