#![doc = r#"
A codec for Standard MIDI Files (`.mid`).

`smfio` parses a byte buffer into an owned [`MidiFile`](file::MidiFile)
(header, tracks, events), lets you mutate the track and event lists, and
serializes the result back to bytes. The codec is strict: the first
structural violation aborts with an error carrying the byte offset, and
recognized meta payloads are length-checked on parse.

# Example

```
use smfio::prelude::*;

let mut file = MidiFile::default();
file.add_track(vec![]).unwrap();

let bytes = file.write().unwrap();
let parsed = MidiFile::parse(&bytes).unwrap();
assert_eq!(file, parsed);
```

# Scope

This crate is the file codec only. Live device I/O, playback scheduling and
instrument tables are deliberately out of scope; the event model here is the
shape such layers consume.
"#]

extern crate alloc;

mod bytes;
pub use bytes::*;

mod error;
pub use error::*;

pub mod event;

pub mod file;

pub mod reader;

pub mod writer;

#[doc = r#"
Re-exports every type needed to read, edit and write a MIDI file.
"#]
pub mod prelude {
    pub use crate::{
        bytes::*,
        error::*,
        event::*,
        file::*,
        reader::{ReadResult, Reader, ReaderError, ReaderErrorKind},
        writer::{Writer, VARINT_MAX},
    };
}
