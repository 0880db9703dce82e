/// Implementation of `dessem encode`.
///
/// Reads a JSON array of records (the format `dessem decode` writes) and
/// encodes it into a HIDR.DAT file.
///
/// ```json
/// [
///   { "name": "CAMARGOS", "station_id": 1, "database_id": 0, ... },
///   { "name": "", "station_id": 0, ... }
/// ]
/// ```
use std::fs;

use anyhow::{Context, Result};
use dessem_encoder::HidrEncoder;
use dessem_types::HydroPlantRecord;

use crate::EncodeArgs;

/// Run the `dessem encode` command.
///
/// # Errors
///
/// Returns an error if the JSON cannot be read or parsed, a string field
/// does not fit its slot, or the output cannot be written.
pub fn run(args: &EncodeArgs) -> Result<()> {
    let json = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;

    let records: Vec<HydroPlantRecord> = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse records from {}", args.input.display()))?;

    let bytes = HidrEncoder::new()
        .add_records(records)
        .encode()
        .context("failed to encode records")?;

    fs::write(&args.output, &bytes)
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    println!("Wrote {} bytes to {}", bytes.len(), args.output.display());
    Ok(())
}
