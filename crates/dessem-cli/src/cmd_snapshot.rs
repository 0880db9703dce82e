/// Implementation of `dessem snapshot`.
///
/// Write mode decodes a HIDR.DAT file and stores the records with the
/// BLAKE3 digest of the source bytes. Read mode (`--read`) prints the
/// snapshot summary and, with `--verify FILE`, checks that `FILE` is still
/// the file the snapshot was taken from.
///
/// ```text
/// $ dessem snapshot HIDR.DAT -o hidr.hsn --compress
/// Wrote 18342 bytes to hidr.hsn (320 records, zstd)
///
/// $ dessem snapshot --read hidr.hsn --verify HIDR.DAT
/// Snapshot: hidr.hsn
/// Source:   blake3 6f1c...e2
/// Records:  320 (165 plants)
/// ✓ Source matches
/// ```
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use dessem_store::{Preamble, Snapshot, SnapshotOptions, StoreError};

use crate::SnapshotArgs;

/// Run the `dessem snapshot` command.
///
/// # Errors
///
/// Returns an error if any file cannot be read or written, the source or
/// snapshot is malformed, or `--verify` finds a digest mismatch.
pub fn run(args: &SnapshotArgs) -> Result<()> {
    if let Some(ref path) = args.read {
        return read(path, args.verify.as_deref());
    }

    let (Some(file), Some(output)) = (&args.file, &args.output) else {
        return Err(anyhow!("snapshot needs FILE and --output, or --read"));
    };

    let source = fs::read(file).with_context(|| format!("cannot read {}", file.display()))?;
    let snapshot = Snapshot::from_source(&source)
        .with_context(|| format!("failed to decode {}", file.display()))?;

    let options = SnapshotOptions {
        compress: args.compress,
        level: args.level,
    };
    let bytes = snapshot
        .to_bytes(&options)
        .context("failed to build snapshot")?;
    fs::write(output, &bytes).with_context(|| format!("cannot write {}", output.display()))?;

    let compressed = Preamble::parse(&bytes).is_ok_and(|p| p.compressed);
    println!(
        "Wrote {} bytes to {} ({} records{})",
        bytes.len(),
        output.display(),
        snapshot.records.len(),
        if compressed { ", zstd" } else { "" }
    );
    Ok(())
}

fn read(path: &Path, verify: Option<&Path>) -> Result<()> {
    let snapshot =
        Snapshot::read_file(path).with_context(|| format!("cannot load {}", path.display()))?;

    println!("Snapshot: {}", path.display());
    println!("Source:   blake3 {}", snapshot.source_digest_hex());
    println!(
        "Records:  {} ({} plants)",
        snapshot.records.len(),
        snapshot.plant_count()
    );

    if let Some(source_path) = verify {
        let source = fs::read(source_path)
            .with_context(|| format!("cannot read {}", source_path.display()))?;
        match snapshot.verify_source(&source) {
            Ok(()) => println!("✓ Source matches"),
            Err(e @ StoreError::DigestMismatch { .. }) => {
                println!("✗ {e}");
                return Err(anyhow!("{} has changed since the snapshot", source_path.display()));
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
