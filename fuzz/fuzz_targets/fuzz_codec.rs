#![no_main]

//! Inbound codec fuzzer.
//!
//! Feeds arbitrary bytes to a full session. Any input may be rejected with
//! an error, but none may panic.

use std::io::{Cursor, sink};

use libfuzzer_sys::fuzz_target;
use tankbot::protocol::MessageReader;
use tankbot::{PolicyEngine, session};

fuzz_target!(|data: &[u8]| {
    let reader = MessageReader::new(Cursor::new(data));
    let _ = session::play(reader, sink(), PolicyEngine::default());
});
