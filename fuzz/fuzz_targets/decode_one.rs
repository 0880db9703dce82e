#![no_main]

use libfuzzer_sys::fuzz_target;
use dessem_wire::RECORD_SIZE;

// Fuzz target: single-record decode over arbitrary record contents.
//
// The input is cycled to fill one 792-byte record so short inputs still
// reach every field.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let chunk: [u8; RECORD_SIZE] = std::array::from_fn(|i| data[i % data.len()]);
    let record = dessem_decoder::HidrDecoder::decode_one(&chunk);
    let _ = record.machine_sets.installed_capacity();
    let _ = record.tailrace.active_families().count();
    let _ = record.regulation();
});
