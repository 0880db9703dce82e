//! Conformance tests: decoded output pinned against the HIDR.DAT layout.
//!
//! Fixtures are encoded in code (see `dessem_tests::fixtures`) and patched
//! at known byte offsets, so each test states exactly which bytes it puts
//! where and what the decoder must make of them. Rendered values are pinned
//! with inline insta snapshots.

use dessem_decoder::{DecodeError, HidrDecoder};
use dessem_encoder::HidrEncoder;
use dessem_tests::fixtures;
use dessem_types::{HydroPlantRecord, MachineSets};
use dessem_wire::RECORD_SIZE;
use dessem_wire::layout::{RESERVED_LEN, offsets};
use insta::assert_snapshot;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn put_i32(bytes: &mut [u8], at: usize, value: i32) {
    bytes[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

fn put_f32(bytes: &mut [u8], at: usize, value: f32) {
    bytes[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

fn put_i64(bytes: &mut [u8], at: usize, value: i64) {
    bytes[at..at + 8].copy_from_slice(&value.to_le_bytes());
}

fn put_str(bytes: &mut [u8], at: usize, width: usize, value: &[u8]) {
    bytes[at..at + width].fill(b' ');
    bytes[at..at + value.len()].copy_from_slice(value);
}

fn summary(record: &HydroPlantRecord) -> String {
    format!(
        "{} #{} db={} vol={}..{} sets={} cap={}",
        record.name,
        record.station_id,
        record.database_id,
        record.min_volume,
        record.max_volume,
        record.machine_sets.active_len(),
        record.installed_capacity()
    )
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[test]
fn scenario_a_two_records_in_order() {
    let mut bytes = vec![0u8; 2 * RECORD_SIZE];
    put_i32(&mut bytes, offsets::STATION_ID, 7);
    put_f32(&mut bytes, offsets::VOLUMES + 4, 1234.5);
    put_i32(&mut bytes, RECORD_SIZE + offsets::STATION_ID, 42);
    assert_eq!(bytes.len(), 1584);

    let records = HidrDecoder::decode_all(&bytes).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].station_id, 7);
    assert_eq!(records[0].max_volume, 1234.5);
    assert_eq!(records[1].station_id, 42);
    assert_eq!(records[1].max_volume, 0.0);
}

#[test]
fn scenario_b_short_input_rejected() {
    let err = HidrDecoder::decode_all(&[0u8; 791]).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::InvalidLength {
            actual_length: 791,
            record_size: 792
        }
    ));
    assert_snapshot!(err.to_string(), @"input length 791 is not a multiple of the 792-byte record size");
}

#[test]
fn scenario_c_no_active_sets_has_no_capacity() {
    let mut plant = fixtures::plant(3, "SEM MAQUINA");
    plant.machine_sets.active_count = 0;
    let records = HidrDecoder::decode_all(&fixtures::encode(&[plant])).unwrap();

    let sets = &records[0].machine_sets;
    assert_eq!(sets.active().count(), 0);
    assert_eq!(sets.installed_capacity(), 0.0);
    assert_eq!(records[0].installed_capacity(), 0.0);
}

#[test]
fn scenario_d_reserved_bytes_are_ignored() {
    let clean = fixtures::registry_bytes(3);
    let mut noisy = clean.clone();
    for index in 0..3 {
        let start = index * RECORD_SIZE + offsets::RESERVED;
        for (i, b) in noisy[start..start + RESERVED_LEN].iter_mut().enumerate() {
            *b = u8::try_from((i * 37 + index) % 256).unwrap();
        }
    }
    assert_ne!(clean, noisy);

    assert_eq!(
        HidrDecoder::decode_all(&clean).unwrap(),
        HidrDecoder::decode_all(&noisy).unwrap()
    );
}

// ── Byte layout ───────────────────────────────────────────────────────────────

/// Every field gets its own value at a hand-written offset, so a field read
/// from the wrong place, or two fields swapped, shows up as a mismatch.
#[test]
fn every_offset_decodes_its_own_field() {
    let mut raw = [0u8; RECORD_SIZE];
    put_str(&mut raw, 0, 12, b"FURNAS");
    put_i32(&mut raw, 12, 6);
    put_i64(&mut raw, 16, 0x0102_0304_0506_0708);
    put_i32(&mut raw, 24, 21);
    put_i32(&mut raw, 28, 31);
    put_i32(&mut raw, 32, 41);
    put_i32(&mut raw, 36, 51);
    for (i, value) in [5733.0, 22950.0, 22951.5, 17.25, 750.0, 768.0].into_iter().enumerate() {
        put_f32(&mut raw, 40 + 4 * i, value);
    }
    for i in 0..5u8 {
        let at = usize::from(i) * 4;
        put_f32(&mut raw, 64 + at, 10.0 + f32::from(i));
        put_f32(&mut raw, 84 + at, 20.0 + f32::from(i));
        put_i32(&mut raw, 156 + at, 40 + i32::from(i));
        put_f32(&mut raw, 176 + at, 50.0 + f32::from(i));
        put_f32(&mut raw, 496 + at, 60.0 + f32::from(i));
        put_i32(&mut raw, 516 + at, 70 + i32::from(i));
    }
    for month in 0..12u8 {
        put_i32(&mut raw, 104 + usize::from(month) * 4, 30 + i32::from(month));
    }
    put_i32(&mut raw, 152, 3);
    put_f32(&mut raw, 536, 0.75);
    put_f32(&mut raw, 540, 1.25);
    put_i32(&mut raw, 544, 4);
    for k in 0..36u8 {
        put_f32(&mut raw, 548 + usize::from(k) * 4, 80.0 + f32::from(k));
    }
    put_f32(&mut raw, 692, 650.5);
    put_i32(&mut raw, 696, 2);
    put_f32(&mut raw, 700, 95.5);
    put_f32(&mut raw, 704, 12.5);
    put_i32(&mut raw, 708, 333);
    put_i32(&mut raw, 712, 7);
    put_i32(&mut raw, 716, 3);
    put_i32(&mut raw, 720, 1);
    put_f32(&mut raw, 724, 2.75);
    put_f32(&mut raw, 728, 4.125);
    put_i32(&mut raw, 732, 5);
    put_str(&mut raw, 736, 12, b"01/05/1963");
    put_str(&mut raw, 748, 39, b"RIO GRANDE");
    put_f32(&mut raw, 787, 4321.5);
    put_str(&mut raw, 791, 1, b"D");

    let r = HidrDecoder::decode_one(&raw);

    assert_eq!(r.name, "FURNAS");
    assert_eq!(r.station_id, 6);
    assert_eq!(r.database_id, 0x0102_0304_0506_0708);
    assert_eq!(r.subsystem_id, 21);
    assert_eq!(r.company_id, 31);
    assert_eq!(r.downstream_station_id, 41);
    assert_eq!(r.diversion_flag, 51);

    assert_eq!(r.min_volume, 5733.0);
    assert_eq!(r.max_volume, 22950.0);
    assert_eq!(r.spillway_volume, 22951.5);
    assert_eq!(r.diversion_volume, 17.25);
    assert_eq!(r.min_elevation, 750.0);
    assert_eq!(r.max_elevation, 768.0);

    assert_eq!(r.volume_elevation.coefficients, [10.0, 11.0, 12.0, 13.0, 14.0]);
    assert_eq!(r.elevation_area.coefficients, [20.0, 21.0, 22.0, 23.0, 24.0]);
    assert_eq!(r.evaporation, std::array::from_fn(|m| 30 + i32::try_from(m).unwrap()));

    let sets = &r.machine_sets;
    assert_eq!(sets.active_count, 3);
    assert_eq!(sets.unit_count, [40, 41, 42, 43, 44]);
    assert_eq!(sets.effective_power, [50.0, 51.0, 52.0, 53.0, 54.0]);
    assert_eq!(sets.effective_head, [60.0, 61.0, 62.0, 63.0, 64.0]);
    assert_eq!(sets.effective_flow, [70, 71, 72, 73, 74]);

    assert_eq!(r.specific_productivity, 0.75);
    assert_eq!(r.hydraulic_losses, 1.25);
    assert_eq!(r.tailrace.family_count, 4);
    for (f, family) in r.tailrace.families.iter().enumerate() {
        for (c, &value) in family.iter().enumerate() {
            assert_eq!(value, 80.0 + f64::from(u8::try_from(f * 6 + c).unwrap()));
        }
    }

    assert_eq!(r.average_tailrace_elevation, 650.5);
    assert_eq!(r.spillage_influence, 2);
    assert_eq!(r.max_load_factor, 95.5);
    assert_eq!(r.min_load_factor, 12.5);
    assert_eq!(r.historic_min_flow, 333);
    assert_eq!(r.base_unit_count, 7);
    assert_eq!(r.turbine_type, 3);
    assert_eq!(r.set_representation, 1);
    assert_eq!(r.forced_outage_rate, 2.75);
    assert_eq!(r.maintenance_rate, 4.125);
    assert_eq!(r.loss_type, 5);

    assert_eq!(r.reference_date, "01/05/1963");
    assert_eq!(r.comment, "RIO GRANDE");
    assert_eq!(r.reference_volume, 4321.5);
    assert_eq!(r.regulation_code, "D");

    // The encoder puts every field back where it was found.
    assert_eq!(HidrEncoder::encode_one(&r).unwrap(), raw);
}

// ── Properties ────────────────────────────────────────────────────────────────

#[test]
fn record_count_is_length_over_record_size() {
    for n in [0, 1, 2, 7, 32] {
        let bytes = fixtures::registry_bytes(n);
        assert_eq!(bytes.len(), n * RECORD_SIZE);
        assert_eq!(HidrDecoder::decode_all(&bytes).unwrap().len(), n);
        assert_eq!(HidrDecoder::record_count(bytes.len()).unwrap(), n);
    }
}

#[test]
fn record_i_comes_from_byte_range_i() {
    let bytes = fixtures::registry_bytes(9);
    let records = HidrDecoder::decode_all(&bytes).unwrap();
    for (i, record) in records.iter().enumerate() {
        let chunk: &[u8; RECORD_SIZE] = bytes[fixtures::record_range(i)].try_into().unwrap();
        assert_eq!(&HidrDecoder::decode_one(chunk), record);
    }
}

#[test]
fn placeholders_keep_their_position() {
    let records = HidrDecoder::decode_all(&fixtures::registry_bytes(12)).unwrap();
    let positions: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_placeholder())
        .map(|(i, _)| i)
        .collect();
    assert_eq!(positions, vec![3, 7, 11]);
}

#[test]
fn only_active_slots_are_meaningful() {
    let mut plant = fixtures::plant(9, "DUAS");
    plant.machine_sets = MachineSets {
        active_count: 2,
        unit_count: [3, 1, 99, 99, 99],
        effective_power: [50.0, 25.0, 999.0, 999.0, 999.0],
        effective_head: [40.0, 39.5, -1.0, -1.0, -1.0],
        effective_flow: [120, 60, 7, 7, 7],
    };
    let records = HidrDecoder::decode_all(&fixtures::encode(&[plant])).unwrap();
    let sets = &records[0].machine_sets;

    let active: Vec<(i32, f64)> = sets
        .active()
        .map(|s| (s.unit_count, s.effective_power))
        .collect();
    assert_eq!(active, vec![(3, 50.0), (1, 25.0)]);
    assert_eq!(sets.total_units(), 4);
    assert_eq!(sets.installed_capacity(), 175.0);
    // Trailing slots are carried through untouched.
    assert_eq!(sets.unit_count[2], 99);
}

#[test]
fn every_non_multiple_length_is_rejected() {
    let base = fixtures::registry_bytes(2);
    for extra in [1, 4, 396, 791] {
        let mut bytes = base.clone();
        bytes.extend(std::iter::repeat_n(0u8, extra));
        match HidrDecoder::decode_all(&bytes) {
            Err(DecodeError::InvalidLength { actual_length, .. }) => {
                assert_eq!(actual_length, 2 * RECORD_SIZE + extra);
            }
            other => panic!("expected InvalidLength for +{extra}, got {other:?}"),
        }
    }
}

// ── Rendered values ───────────────────────────────────────────────────────────

#[test]
fn fixture_plant_summary() {
    let records = HidrDecoder::decode_all(&fixtures::registry_bytes(2)).unwrap();
    assert_snapshot!(summary(&records[0]), @"UHE 1 #1 db=10000000001 vol=1001..5001 sets=2 cap=1101");
    assert_snapshot!(summary(&records[1]), @"UHE 2 #2 db=10000000002 vol=1002..5002 sets=2 cap=1101");
}

#[test]
fn fixture_plant_operational_fields() {
    let records = HidrDecoder::decode_all(&fixtures::registry_bytes(1)).unwrap();
    let r = &records[0];
    let rendered = format!(
        "{} | {} | {:?} | teif={} ip={} | downstream={:?}",
        r.reference_date,
        r.comment,
        r.regulation(),
        r.forced_outage_rate,
        r.maintenance_rate,
        r.downstream()
    );
    assert_snapshot!(rendered, @"01/01/2020 | PLANT 1 | Some(Monthly) | teif=3.5 ip=7.25 | downstream=Some(2)");
}

#[test]
fn tailrace_families_follow_wire_order() {
    let records = HidrDecoder::decode_all(&fixtures::registry_bytes(1)).unwrap();
    let tailrace = &records[0].tailrace;
    assert_eq!(tailrace.active_len(), 2);
    assert_eq!(tailrace.family(0).map(|f| f[0]), Some(650.0));
    assert_eq!(tailrace.family(1).map(|f| f[0]), Some(651.5));
    assert_eq!(tailrace.family(2), None);
    assert_snapshot!(format!("{:?}", tailrace.evaluate(0, 512.0)), @"Some(651.0)");
}
