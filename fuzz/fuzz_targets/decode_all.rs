#![no_main]

use libfuzzer_sys::fuzz_target;
use dessem_wire::RECORD_SIZE;

// Fuzz target: full HIDR.DAT decoder entry point.
//
// Any input either decodes to exactly len / 792 records or fails with
// InvalidLength; nothing may panic.
fuzz_target!(|data: &[u8]| {
    match dessem_decoder::HidrDecoder::decode_all(data) {
        Ok(records) => assert_eq!(records.len(), data.len() / RECORD_SIZE),
        Err(_) => assert_ne!(data.len() % RECORD_SIZE, 0),
    }
});
