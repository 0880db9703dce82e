//! Byte layout of one HIDR.DAT hydro-plant record.
//!
//! Every record is exactly [`RECORD_SIZE`] bytes, little-endian, with no
//! header, footer, or count prefix in the file. Fields are read strictly in
//! offset order; the table below is the interoperability contract.
//!
//! ```text
//! ┌───────────┬──────────────────────────────────────────────┐
//! │ Offset    │ Field                                        │
//! ├───────────┼──────────────────────────────────────────────┤
//! │ [0,12)    │ name (fixed string)                          │
//! │ [12,16)   │ station_id (i32)                             │
//! │ [16,24)   │ database_id (i64), the only 8-byte field     │
//! │ [24,28)   │ subsystem_id (i32)                           │
//! │ [28,32)   │ company_id (i32)                             │
//! │ [32,36)   │ downstream_station_id (i32, 0 = terminal)    │
//! │ [36,40)   │ diversion_flag (i32)                         │
//! │ [40,64)   │ 6 x f32 volumes / elevations                 │
//! │ [64,84)   │ 5 x f32 volume -> elevation coefficients     │
//! │ [84,104)  │ 5 x f32 elevation -> area coefficients       │
//! │ [104,152) │ 12 x i32 monthly evaporation                 │
//! │ [152,156) │ active machine-set count (i32)               │
//! │ [156,176) │ 5 x i32 units per set                        │
//! │ [176,196) │ 5 x f32 effective power per set              │
//! │ [196,496) │ RESERVED (300 bytes, skipped)                │
//! │ [496,516) │ 5 x f32 effective head per set               │
//! │ [516,536) │ 5 x i32 effective flow per set               │
//! │ [536,548) │ productivity, losses, tailrace family count  │
//! │ [548,692) │ 36 x f32 tailrace coefficients (6 x 6)       │
//! │ [692,736) │ operational scalars                          │
//! │ [736,748) │ reference date (fixed string)                │
//! │ [748,787) │ comment (fixed string)                       │
//! │ [787,791) │ reference volume (f32)                       │
//! │ [791,792) │ regulation type (1-byte code)                │
//! └───────────┴──────────────────────────────────────────────┘
//! ```

/// Size of one record in bytes.
pub const RECORD_SIZE: usize = 792;

/// Width of the plant name field.
pub const NAME_WIDTH: usize = 12;

/// Number of coefficients in the volume/elevation and elevation/area polynomials.
pub const POLYNOMIAL_COEFFICIENTS: usize = 5;

/// Monthly evaporation slots, January first.
pub const EVAPORATION_MONTHS: usize = 12;

/// Capacity of every machine-set array.
pub const MACHINE_SET_SLOTS: usize = 5;

/// Length of the reserved span that is skipped without interpretation.
pub const RESERVED_LEN: usize = 300;

/// Number of tailrace polynomial families.
pub const TAILRACE_FAMILIES: usize = 6;

/// Coefficients per tailrace family.
pub const TAILRACE_COEFFICIENTS: usize = 6;

/// Width of the reference date field.
pub const REFERENCE_DATE_WIDTH: usize = 12;

/// Width of the free-text comment field.
pub const COMMENT_WIDTH: usize = 39;

/// Width of the regulation type code.
pub const REGULATION_WIDTH: usize = 1;

/// Start offsets of the field groups, used as cursor checkpoints.
pub mod offsets {
    pub const NAME: usize = 0;
    pub const STATION_ID: usize = 12;
    pub const DATABASE_ID: usize = 16;
    pub const VOLUMES: usize = 40;
    pub const VOLUME_ELEVATION: usize = 64;
    pub const ELEVATION_AREA: usize = 84;
    pub const EVAPORATION: usize = 104;
    pub const ACTIVE_SETS: usize = 152;
    pub const UNIT_COUNT: usize = 156;
    pub const EFFECTIVE_POWER: usize = 176;
    pub const RESERVED: usize = 196;
    pub const EFFECTIVE_HEAD: usize = 496;
    pub const EFFECTIVE_FLOW: usize = 516;
    pub const SPECIFIC_PRODUCTIVITY: usize = 536;
    pub const TAILRACE: usize = 548;
    pub const AVERAGE_TAILRACE: usize = 692;
    pub const REFERENCE_DATE: usize = 736;
    pub const COMMENT: usize = 748;
    pub const REFERENCE_VOLUME: usize = 787;
    pub const REGULATION: usize = 791;
}
