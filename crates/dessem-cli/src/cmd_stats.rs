/// Implementation of `dessem stats`.
///
/// Prints record and placeholder counts, then a per-subsystem table of
/// plant count, unit count, installed capacity, and useful storage.
///
/// # Example output
///
/// ```text
/// File:         HIDR.DAT  (253440 bytes)
/// Records:      320 total, 165 plants, 155 placeholders
///
/// Subsystem   Plants   Units   Capacity (MW)   Useful vol. (hm3)
/// ──────────────────────────────────────────────────────────────
/// 1               95     412         60321.4            182310.0
/// 2               31     107         15876.0             19870.5
/// ──────────────────────────────────────────────────────────────
/// Total          126     519         76197.4            202180.5
/// ```
use std::collections::BTreeMap;
use std::fs;

use anyhow::{Context, Result};
use dessem_decoder::HidrDecoder;
use dessem_types::HydroPlantRecord;

use crate::StatsArgs;

#[derive(Default)]
struct SubsystemTotals {
    plants: usize,
    units: i64,
    capacity: f64,
    useful_volume: f64,
}

impl SubsystemTotals {
    fn add(&mut self, record: &HydroPlantRecord) {
        self.plants += 1;
        self.units += record.machine_sets.total_units();
        self.capacity += record.installed_capacity();
        self.useful_volume += record.useful_volume();
    }
}

/// Run the `dessem stats` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn run(args: &StatsArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;
    let records = HidrDecoder::decode_all(&bytes)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    let mut by_subsystem: BTreeMap<i32, SubsystemTotals> = BTreeMap::new();
    let mut total = SubsystemTotals::default();
    for record in records.iter().filter(|r| !r.is_placeholder()) {
        by_subsystem.entry(record.subsystem_id).or_default().add(record);
        total.add(record);
    }
    let placeholders = records.len() - total.plants;

    println!(
        "File:         {}  ({} bytes)",
        args.file.display(),
        bytes.len()
    );
    println!(
        "Records:      {} total, {} plants, {placeholders} placeholders",
        records.len(),
        total.plants
    );
    println!();

    let sep = "─".repeat(62);
    println!(
        "{:<10}{:>8}{:>8}{:>16}{:>20}",
        "Subsystem", "Plants", "Units", "Capacity (MW)", "Useful vol. (hm3)"
    );
    println!("{sep}");
    for (subsystem, t) in &by_subsystem {
        print_row(&subsystem.to_string(), t);
    }
    println!("{sep}");
    print_row("Total", &total);

    Ok(())
}

fn print_row(label: &str, t: &SubsystemTotals) {
    println!(
        "{label:<10}{:>8}{:>8}{:>16.1}{:>20.1}",
        t.plants, t.units, t.capacity, t.useful_volume
    );
}
