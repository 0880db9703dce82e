/// Implementation of `dessem validate`.
///
/// Decodes the whole file and runs consistency checks over the registry,
/// printing a `✓` line per passed check and `✗` for the first failure.
/// Unresolved downstream links are reported with `!` but do not fail the
/// file.
///
/// # Success output
///
/// ```text
/// ✓ Length: 2376 bytes = 3 records of 792 bytes
/// ✓ Records: 3 decoded (2 plants, 1 placeholder)
/// ✓ Station ids: unique
/// ✓ Machine sets: active counts within 0..=5
/// ✓ Cascade: all downstream links resolve
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Length: input length 800 is not a multiple of the 792-byte record size
/// ```
use std::collections::HashMap;
use std::fs;

use anyhow::{Context, Result, anyhow};
use dessem_decoder::{DecodeError, HidrDecoder};
use dessem_types::Cascade;
use dessem_wire::RECORD_SIZE;
use dessem_wire::layout::MACHINE_SET_SLOTS;

use crate::ValidateArgs;

/// Run the `dessem validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or any check fails; the
/// main dispatcher converts it to exit code 1.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let records = match HidrDecoder::decode_all(&bytes) {
        Ok(records) => records,
        Err(e @ DecodeError::InvalidLength { .. }) => return fail("Length", &e),
        Err(e) => return fail("Records", &e),
    };
    println!(
        "✓ Length: {} bytes = {} records of {RECORD_SIZE} bytes",
        bytes.len(),
        records.len()
    );

    let placeholders = records.iter().filter(|r| r.is_placeholder()).count();
    println!(
        "✓ Records: {} decoded ({} plants, {placeholders} placeholder{})",
        records.len(),
        records.len() - placeholders,
        if placeholders == 1 { "" } else { "s" }
    );

    let mut first_seen: HashMap<i32, usize> = HashMap::new();
    for (idx, record) in records.iter().enumerate() {
        if record.is_placeholder() {
            continue;
        }
        if let Some(&first) = first_seen.get(&record.station_id) {
            return fail(
                "Station ids",
                &format!(
                    "station {} appears at records {first} and {idx}",
                    record.station_id
                ),
            );
        }
        first_seen.insert(record.station_id, idx);
    }
    println!("✓ Station ids: unique");

    let slots = i32::try_from(MACHINE_SET_SLOTS).unwrap_or(i32::MAX);
    if let Some((idx, record)) = records
        .iter()
        .enumerate()
        .find(|(_, r)| !(0..=slots).contains(&r.machine_sets.active_count))
    {
        return fail(
            "Machine sets",
            &format!(
                "record {idx} has active count {}, expected 0..={slots}",
                record.machine_sets.active_count
            ),
        );
    }
    println!("✓ Machine sets: active counts within 0..={slots}");

    let cascade = Cascade::new(&records);
    let dangling: Vec<i32> = records
        .iter()
        .filter(|r| !r.is_placeholder())
        .filter(|r| r.downstream().is_some_and(|id| cascade.get(id).is_none()))
        .map(|r| r.station_id)
        .collect();
    if dangling.is_empty() {
        println!("✓ Cascade: all downstream links resolve");
    } else {
        println!(
            "! Cascade: {} station{} link to unknown downstream ids: {dangling:?}",
            dangling.len(),
            if dangling.len() == 1 { "" } else { "s" }
        );
    }

    Ok(())
}

fn fail(check: &str, reason: &dyn std::fmt::Display) -> Result<()> {
    println!("✗ {check}: {reason}");
    Err(anyhow!("validation failed"))
}
