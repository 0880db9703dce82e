/// Implementation of `dessem inspect`.
///
/// Decodes every record and prints one summary line per record. With
/// `--record N` only that record is shown; `--sets` adds a line per active
/// machine set and `--show-reserved` dumps the reserved span, which the
/// decoder otherwise never looks at.
///
/// # Output format
///
/// ```text
/// HIDR.DAT: 3 records (2 plants, 1 placeholder)
/// Record 0: #1 CAMARGOS subsystem=1 downstream=2 sets=1 capacity=46.0 MW
///          set 1: 2 units x 23.0 MW, head 25.5 m, flow 110 m3/s
/// Record 1: (placeholder)
/// Record 2: #2 ITUTINGA subsystem=1 terminal sets=1 capacity=52.0 MW
/// ```
use std::fmt::Write as _;
use std::fs;

use anyhow::{Context, Result, bail};
use dessem_decoder::HidrDecoder;
use dessem_types::HydroPlantRecord;
use dessem_wire::RECORD_SIZE;
use dessem_wire::layout::{RESERVED_LEN, offsets};

use crate::InspectArgs;

/// Run the `dessem inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a whole number of
/// records, or `--record` names an index past the end.
pub fn run(args: &InspectArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;

    let records = HidrDecoder::decode_all(&bytes)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    if let Some(target) = args.record
        && target >= records.len()
    {
        bail!(
            "record {target} out of range ({} record{} in file)",
            records.len(),
            plural(records.len())
        );
    }

    let placeholders = records.iter().filter(|r| r.is_placeholder()).count();
    println!(
        "{}: {} record{} ({} plant{}, {placeholders} placeholder{})",
        args.file.display(),
        records.len(),
        plural(records.len()),
        records.len() - placeholders,
        plural(records.len() - placeholders),
        plural(placeholders)
    );

    for (idx, record) in records.iter().enumerate() {
        if let Some(target) = args.record
            && idx != target
        {
            continue;
        }

        println!("Record {idx}: {}", summary_line(record));

        if args.sets && !record.is_placeholder() {
            for (n, set) in record.machine_sets.active().enumerate() {
                println!(
                    "         set {}: {} units x {:.1} MW, head {:.1} m, flow {} m3/s",
                    n + 1,
                    set.unit_count,
                    set.effective_power,
                    set.effective_head,
                    set.effective_flow
                );
            }
        }

        if args.show_reserved {
            let start = idx * RECORD_SIZE + offsets::RESERVED;
            println!("         Reserved:");
            print_hex(&bytes[start..start + RESERVED_LEN]);
        }
    }

    Ok(())
}

/// One-line description of a record, without the index prefix.
pub fn summary_line(record: &HydroPlantRecord) -> String {
    if record.is_placeholder() {
        return "(placeholder)".to_string();
    }
    let mut line = format!(
        "#{} {} subsystem={}",
        record.station_id, record.name, record.subsystem_id
    );
    match record.downstream() {
        Some(id) => {
            let _ = write!(line, " downstream={id}");
        }
        None => line.push_str(" terminal"),
    }
    let _ = write!(
        line,
        " sets={} capacity={:.1} MW",
        record.machine_sets.active_len(),
        record.installed_capacity()
    );
    line
}

fn print_hex(raw: &[u8]) {
    for (i, chunk) in raw.chunks(16).enumerate() {
        let offset = i * 16;
        let hex: String = chunk
            .iter()
            .fold(String::with_capacity(chunk.len() * 3), |mut s, b| {
                if !s.is_empty() {
                    s.push(' ');
                }
                let _ = write!(s, "{b:02x}");
                s
            });
        let ascii: String = chunk
            .iter()
            .map(|&b| if b.is_ascii_graphic() { b as char } else { '.' })
            .collect();
        println!("           {offset:04x}  {hex:<48}  {ascii}");
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
