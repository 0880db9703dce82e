#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: snapshot container reader.
//
// Catches bugs in:
// - Preamble validation (magic, version, flag bits, reserved byte)
// - Digest slicing on short inputs
// - zstd payload inflation and the size limit
// - Record stream length in the payload
fuzz_target!(|data: &[u8]| {
    let _ = dessem_store::Snapshot::from_bytes(data);
});
