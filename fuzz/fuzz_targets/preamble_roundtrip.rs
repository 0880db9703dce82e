#![no_main]

use libfuzzer_sys::fuzz_target;
use dessem_store::preamble::{Preamble, PREAMBLE_SIZE};

// Fuzz target: snapshot preamble parse->write roundtrip.
//
// Any 40 bytes that parse must serialize back to the same bytes, apart
// from the minor version which the writer always sets to its own.
fuzz_target!(|data: &[u8]| {
    let Ok(preamble) = Preamble::parse(data) else {
        return;
    };
    let mut expected = [0u8; PREAMBLE_SIZE];
    expected.copy_from_slice(&data[..PREAMBLE_SIZE]);

    let rebuilt = Preamble {
        version_minor: preamble.version_minor,
        ..Preamble::new(preamble.source_digest, preamble.compressed)
    };
    assert_eq!(rebuilt.to_bytes(), expected);
});
