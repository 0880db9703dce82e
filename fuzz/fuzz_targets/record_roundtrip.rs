#![no_main]

use libfuzzer_sys::fuzz_target;
use dessem_decoder::HidrDecoder;
use dessem_encoder::HidrEncoder;
use dessem_wire::layout::{offsets, RESERVED_LEN};
use dessem_wire::RECORD_SIZE;

// Fuzz target: decode -> encode -> decode over arbitrary records.
//
// Every decoded record must be encodable (decoded strings are Latin-1 and
// never longer than their slot), and a second pass must reproduce the
// bytes of the first.
fuzz_target!(|data: &[u8]| {
    if data.len() < RECORD_SIZE {
        return;
    }
    let raw: [u8; RECORD_SIZE] = match data[..RECORD_SIZE].try_into() {
        Ok(raw) => raw,
        Err(_) => return,
    };

    let first = HidrEncoder::encode_one(&HidrDecoder::decode_one(&raw)).unwrap();
    assert!(first[offsets::RESERVED..offsets::RESERVED + RESERVED_LEN]
        .iter()
        .all(|&b| b == 0));

    let second = HidrEncoder::encode_one(&HidrDecoder::decode_one(&first)).unwrap();
    assert_eq!(first, second);
});
