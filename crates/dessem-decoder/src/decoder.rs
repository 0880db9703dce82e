use std::io::Read;
use std::path::Path;

use dessem_types::{HydroPlantRecord, MachineSets, Polynomial, TailracePolynomials};
use dessem_wire::RecordCursor;
use dessem_wire::layout::{
    COMMENT_WIDTH, NAME_WIDTH, RECORD_SIZE, REFERENCE_DATE_WIDTH, REGULATION_WIDTH, RESERVED_LEN,
    offsets,
};

use crate::error::DecodeError;

/// HIDR.DAT decoder: a byte stream in, an ordered list of plants out.
///
/// The file is a bare sequence of 792-byte records with no header or
/// count; the number of plants is `len / 792`. Decoding proceeds in two
/// steps:
///
///   1. **Length check**: reject any input whose length is not a multiple
///      of [`RECORD_SIZE`]. Nothing is decoded from a malformed stream.
///   2. **Records**: walk the stream in 792-byte chunks, decoding each with
///      a fresh [`RecordCursor`] that reads fields strictly in offset order
///      and steps over the 300-byte reserved span. After the last field the
///      cursor must sit exactly on the record boundary.
///
/// Placeholder records (station id 0) are kept, so index `i` of the result
/// always corresponds to bytes `[i * 792, (i + 1) * 792)` of the input.
///
/// ```text
///   bytes ──▶ len % 792 == 0 ? ──▶ chunk 0 ──▶ HydroPlantRecord
///                                  chunk 1 ──▶ HydroPlantRecord
///                                  ...
/// ```
///
/// # Example
///
/// ```rust
/// use dessem_decoder::{DecodeError, HidrDecoder};
///
/// let plants = HidrDecoder::decode_all(&[0u8; 792 * 2]).unwrap();
/// assert_eq!(plants.len(), 2);
/// assert!(plants.iter().all(|p| p.is_placeholder()));
///
/// let err = HidrDecoder::decode_all(&[0u8; 791]).unwrap_err();
/// assert!(matches!(
///     err,
///     DecodeError::InvalidLength { actual_length: 791, record_size: 792 }
/// ));
/// ```
pub struct HidrDecoder;

impl HidrDecoder {
    /// Number of records in an input of `len` bytes.
    ///
    /// # Errors
    ///
    /// [`DecodeError::InvalidLength`] if `len` is not a multiple of
    /// [`RECORD_SIZE`].
    pub fn record_count(len: usize) -> Result<usize, DecodeError> {
        if len % RECORD_SIZE != 0 {
            return Err(DecodeError::InvalidLength {
                actual_length: len,
                record_size: RECORD_SIZE,
            });
        }
        Ok(len / RECORD_SIZE)
    }

    /// Decode every record in `bytes`, in input order.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::InvalidLength`] if `bytes` is not a whole number of
    ///   records.
    /// - [`DecodeError::CursorMisaligned`] if a record decode does not end
    ///   on its 792-byte boundary.
    pub fn decode_all(bytes: &[u8]) -> Result<Vec<HydroPlantRecord>, DecodeError> {
        let count = Self::record_count(bytes.len())?;
        let (chunks, _) = bytes.as_chunks::<RECORD_SIZE>();

        let mut records = Vec::with_capacity(count);
        for (record_index, chunk) in chunks.iter().enumerate() {
            let (record, position) = Self::decode_record(chunk);
            if position != RECORD_SIZE {
                return Err(DecodeError::CursorMisaligned {
                    record_index,
                    position,
                    expected: RECORD_SIZE,
                });
            }
            if record.is_placeholder() {
                log::trace!("record {record_index} is a placeholder");
            }
            records.push(record);
        }

        log::debug!(
            "decoded {} records ({} placeholders) from {} bytes",
            records.len(),
            records.iter().filter(|r| r.is_placeholder()).count(),
            bytes.len()
        );
        Ok(records)
    }

    /// Decode a single 792-byte record.
    ///
    /// Every field has a fixed type and width, so this cannot fail for a
    /// correctly sized chunk.
    pub fn decode_one(chunk: &[u8; RECORD_SIZE]) -> HydroPlantRecord {
        let (record, position) = Self::decode_record(chunk);
        debug_assert_eq!(position, RECORD_SIZE, "record decode ended off the boundary");
        record
    }

    /// Read a whole source into memory, then decode it.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Io`] if reading fails, plus everything
    /// [`decode_all`](Self::decode_all) returns.
    pub fn decode_reader<R: Read>(mut reader: R) -> Result<Vec<HydroPlantRecord>, DecodeError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::decode_all(&bytes)
    }

    /// Read a HIDR.DAT file and decode it.
    ///
    /// The file is opened, read to the end, and closed before decoding
    /// starts.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Io`] if the file cannot be read, plus everything
    /// [`decode_all`](Self::decode_all) returns.
    pub fn decode_file(path: impl AsRef<Path>) -> Result<Vec<HydroPlantRecord>, DecodeError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        log::debug!("read {} bytes from {}", bytes.len(), path.display());
        Self::decode_all(&bytes)
    }

    /// Decode one record and report where the cursor stopped.
    fn decode_record(chunk: &[u8; RECORD_SIZE]) -> (HydroPlantRecord, usize) {
        let mut c = RecordCursor::new(chunk);

        // Identification
        let name = c.read_string(NAME_WIDTH);
        let station_id = c.read_i32();
        let database_id = c.read_i64();
        let subsystem_id = c.read_i32();
        let company_id = c.read_i32();
        let downstream_station_id = c.read_i32();
        let diversion_flag = c.read_i32();

        // Storage and elevation
        debug_assert_eq!(c.position(), offsets::VOLUMES);
        let min_volume = c.read_f32();
        let max_volume = c.read_f32();
        let spillway_volume = c.read_f32();
        let diversion_volume = c.read_f32();
        let min_elevation = c.read_f32();
        let max_elevation = c.read_f32();

        let volume_elevation = Polynomial::new(c.read_f32_array());
        let elevation_area = Polynomial::new(c.read_f32_array());
        let evaporation = c.read_i32_array();

        // Machine sets, split by the reserved span
        debug_assert_eq!(c.position(), offsets::ACTIVE_SETS);
        let active_count = c.read_i32();
        let unit_count = c.read_i32_array();
        let effective_power = c.read_f32_array();

        debug_assert_eq!(c.position(), offsets::RESERVED);
        c.skip(RESERVED_LEN);

        let effective_head = c.read_f32_array();
        let effective_flow = c.read_i32_array();

        // Performance and tailrace
        let specific_productivity = c.read_f32();
        let hydraulic_losses = c.read_f32();
        let family_count = c.read_i32();
        debug_assert_eq!(c.position(), offsets::TAILRACE);
        let tailrace = TailracePolynomials::from_flat(family_count, &c.read_f32_array());

        // Operational
        debug_assert_eq!(c.position(), offsets::AVERAGE_TAILRACE);
        let average_tailrace_elevation = c.read_f32();
        let spillage_influence = c.read_i32();
        let max_load_factor = c.read_f32();
        let min_load_factor = c.read_f32();
        let historic_min_flow = c.read_i32();
        let base_unit_count = c.read_i32();
        let turbine_type = c.read_i32();
        let set_representation = c.read_i32();
        let forced_outage_rate = c.read_f32();
        let maintenance_rate = c.read_f32();
        let loss_type = c.read_i32();

        debug_assert_eq!(c.position(), offsets::REFERENCE_DATE);
        let reference_date = c.read_string(REFERENCE_DATE_WIDTH);
        let comment = c.read_string(COMMENT_WIDTH);
        let reference_volume = c.read_f32();
        let regulation_code = c.read_string(REGULATION_WIDTH);

        let record = HydroPlantRecord {
            name,
            station_id,
            database_id,
            subsystem_id,
            company_id,
            downstream_station_id,
            diversion_flag,
            min_volume,
            max_volume,
            spillway_volume,
            diversion_volume,
            min_elevation,
            max_elevation,
            volume_elevation,
            elevation_area,
            evaporation,
            machine_sets: MachineSets {
                active_count,
                unit_count,
                effective_power,
                effective_head,
                effective_flow,
            },
            specific_productivity,
            hydraulic_losses,
            tailrace,
            average_tailrace_elevation,
            spillage_influence,
            max_load_factor,
            min_load_factor,
            historic_min_flow,
            base_unit_count,
            turbine_type,
            set_representation,
            forced_outage_rate,
            maintenance_rate,
            loss_type,
            reference_date,
            comment,
            reference_volume,
            regulation_code,
        };

        (record, c.position())
    }
}
