use std::path::Path;

use dessem_types::HydroPlantRecord;
use dessem_wire::RecordWriter;
use dessem_wire::layout::{
    COMMENT_WIDTH, NAME_WIDTH, RECORD_SIZE, REFERENCE_DATE_WIDTH, REGULATION_WIDTH, RESERVED_LEN,
    offsets,
};

use crate::error::EncodeError;

/// HIDR.DAT encoder: builds the 792-byte record stream from plants.
///
/// The inverse of `HidrDecoder::decode_all` from `dessem-decoder`.
/// Methods like [`add_record`](Self::add_record) and
/// [`add_placeholder`](Self::add_placeholder) append plants to an internal
/// list; [`encode`](Self::encode) serializes them in order.
///
/// Every field is written at its fixed offset. `f64` values are narrowed to
/// `f32`, strings are written as Latin-1 and right-padded with spaces, and
/// the 300-byte reserved span is zero-filled.
///
/// # Usage
///
/// ```rust
/// use dessem_encoder::HidrEncoder;
/// use dessem_types::HydroPlantRecord;
///
/// let bytes = HidrEncoder::new()
///     .add_record(HydroPlantRecord {
///         name: "CAMARGOS".to_string(),
///         station_id: 1,
///         ..HydroPlantRecord::default()
///     })
///     .add_placeholder()
///     .encode()
///     .unwrap();
///
/// assert_eq!(bytes.len(), 2 * 792);
/// ```
///
/// # Output layout
///
/// ```text
/// ┌──────────────┬──────────────────────────────────────────┐
/// │ [792 bytes]  │ Record 0                                 │
/// │ [792 bytes]  │ Record 1                                 │
/// │ ...          │                                          │
/// └──────────────┴──────────────────────────────────────────┘
/// ```
///
/// There is no header and no terminator; the record count is implied by
/// the file length.
#[derive(Default)]
pub struct HidrEncoder {
    records: Vec<HydroPlantRecord>,
}

impl HidrEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plant.
    pub fn add_record(&mut self, record: HydroPlantRecord) -> &mut Self {
        self.records.push(record);
        self
    }

    /// Append every plant from `records`, in order.
    pub fn add_records(&mut self, records: impl IntoIterator<Item = HydroPlantRecord>) -> &mut Self {
        self.records.extend(records);
        self
    }

    /// Append an empty slot (station id 0).
    pub fn add_placeholder(&mut self) -> &mut Self {
        self.records.push(HydroPlantRecord::placeholder());
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize all accumulated plants.
    ///
    /// An encoder with no plants produces an empty stream, which is a valid
    /// zero-record file.
    ///
    /// # Errors
    ///
    /// [`EncodeError::Field`] for the first string field that does not fit
    /// its slot.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::with_capacity(self.records.len() * RECORD_SIZE);
        for (index, record) in self.records.iter().enumerate() {
            out.extend_from_slice(&encode_record(index, record)?);
        }
        log::debug!("encoded {} records ({} bytes)", self.records.len(), out.len());
        Ok(out)
    }

    /// Serialize and write to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Everything [`encode`](Self::encode) returns, plus
    /// [`EncodeError::Io`] if the file cannot be written.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), EncodeError> {
        let bytes = self.encode()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Encode a single plant into one record.
    ///
    /// # Errors
    ///
    /// [`EncodeError::Field`] (with `record_index` 0) if a string field
    /// does not fit its slot.
    pub fn encode_one(record: &HydroPlantRecord) -> Result<[u8; RECORD_SIZE], EncodeError> {
        encode_record(0, record)
    }
}

fn encode_record(
    record_index: usize,
    r: &HydroPlantRecord,
) -> Result<[u8; RECORD_SIZE], EncodeError> {
    let string = |w: &mut RecordWriter, field: &'static str, text: &str, width: usize| {
        w.write_string(text, width)
            .map_err(|source| EncodeError::Field {
                record_index,
                field,
                source,
            })
    };

    let mut w = RecordWriter::new();

    string(&mut w, "name", &r.name, NAME_WIDTH)?;
    w.write_i32(r.station_id);
    w.write_i64(r.database_id);
    w.write_i32(r.subsystem_id);
    w.write_i32(r.company_id);
    w.write_i32(r.downstream_station_id);
    w.write_i32(r.diversion_flag);

    w.write_f32(r.min_volume);
    w.write_f32(r.max_volume);
    w.write_f32(r.spillway_volume);
    w.write_f32(r.diversion_volume);
    w.write_f32(r.min_elevation);
    w.write_f32(r.max_elevation);

    w.write_f32_array(&r.volume_elevation.coefficients);
    w.write_f32_array(&r.elevation_area.coefficients);
    w.write_i32_array(&r.evaporation);

    let sets = &r.machine_sets;
    w.write_i32(sets.active_count);
    w.write_i32_array(&sets.unit_count);
    w.write_f32_array(&sets.effective_power);
    debug_assert_eq!(w.position(), offsets::RESERVED);
    w.fill(RESERVED_LEN, 0);
    w.write_f32_array(&sets.effective_head);
    w.write_i32_array(&sets.effective_flow);

    w.write_f32(r.specific_productivity);
    w.write_f32(r.hydraulic_losses);
    w.write_i32(r.tailrace.family_count);
    for coefficient in r.tailrace.flat() {
        w.write_f32(coefficient);
    }

    debug_assert_eq!(w.position(), offsets::AVERAGE_TAILRACE);
    w.write_f32(r.average_tailrace_elevation);
    w.write_i32(r.spillage_influence);
    w.write_f32(r.max_load_factor);
    w.write_f32(r.min_load_factor);
    w.write_i32(r.historic_min_flow);
    w.write_i32(r.base_unit_count);
    w.write_i32(r.turbine_type);
    w.write_i32(r.set_representation);
    w.write_f32(r.forced_outage_rate);
    w.write_f32(r.maintenance_rate);
    w.write_i32(r.loss_type);

    string(&mut w, "reference_date", &r.reference_date, REFERENCE_DATE_WIDTH)?;
    string(&mut w, "comment", &r.comment, COMMENT_WIDTH)?;
    w.write_f32(r.reference_volume);
    string(&mut w, "regulation_code", &r.regulation_code, REGULATION_WIDTH)?;

    debug_assert_eq!(w.position(), RECORD_SIZE);
    Ok(w.into_bytes())
}
