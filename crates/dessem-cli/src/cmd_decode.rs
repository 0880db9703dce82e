/// Implementation of `dessem decode`.
///
/// Decodes a HIDR.DAT file and writes the records as a JSON array, either
/// to stdout or to `--output`. Placeholders are kept in position unless
/// `--skip-placeholders` is given.
use std::fs;

use anyhow::{Context, Result};
use dessem_decoder::HidrDecoder;

use crate::DecodeArgs;

/// Run the `dessem decode` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or decoded, or the output
/// cannot be written.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let mut records = HidrDecoder::decode_file(&args.file)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    if args.skip_placeholders {
        records.retain(|r| !r.is_placeholder());
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&records)
    } else {
        serde_json::to_string(&records)
    }
    .context("failed to serialize records")?;

    if let Some(ref path) = args.output {
        fs::write(path, &json).with_context(|| format!("cannot write {}", path.display()))?;
        log::info!("wrote {} records to {}", records.len(), path.display());
    } else {
        println!("{json}");
    }

    Ok(())
}
