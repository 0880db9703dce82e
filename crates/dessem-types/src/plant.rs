use dessem_wire::layout::EVAPORATION_MONTHS;

use crate::machine_set::MachineSets;
use crate::polynomial::{Polynomial, TailracePolynomials};
use crate::regulation::RegulationType;

/// One hydroelectric plant as stored in a 792-byte HIDR.DAT record.
///
/// Field order follows the byte layout (see `dessem_wire::layout`). All
/// `f32` fields on the wire are held as `f64`. Strings are already trimmed
/// of their right padding.
///
/// A record whose `station_id` is 0 is a placeholder: an unused slot in the
/// registry. Placeholders are ordinary values of this type and keep their
/// position in any decoded list.
///
/// ```text
/// ┌──────────────────────────────────────────────────────────┐
/// │ HydroPlantRecord                                         │
/// │   identification   name, station/database/subsystem ids  │
/// │   storage          volumes (hm³), elevations (m)         │
/// │   polynomials      volume→elevation, elevation→area      │
/// │   evaporation      [i32; 12], January first              │
/// │   machine_sets     MachineSets (5 slots + active count)  │
/// │   performance      productivity, losses                  │
/// │   tailrace         TailracePolynomials (6 × 6)           │
/// │   operational      load factors, rates, codes, strings   │
/// └──────────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HydroPlantRecord {
    pub name: String,
    pub station_id: i32,
    /// Hydrological database id, the only 64-bit field in the record.
    pub database_id: i64,
    pub subsystem_id: i32,
    pub company_id: i32,
    /// Station id of the next plant downstream; 0 for a terminal plant.
    pub downstream_station_id: i32,
    pub diversion_flag: i32,

    /// hm³
    pub min_volume: f64,
    pub max_volume: f64,
    pub spillway_volume: f64,
    pub diversion_volume: f64,
    /// m
    pub min_elevation: f64,
    pub max_elevation: f64,

    pub volume_elevation: Polynomial,
    pub elevation_area: Polynomial,

    pub evaporation: [i32; EVAPORATION_MONTHS],

    pub machine_sets: MachineSets,

    pub specific_productivity: f64,
    /// MW
    pub hydraulic_losses: f64,

    pub tailrace: TailracePolynomials,

    pub average_tailrace_elevation: f64,
    pub spillage_influence: i32,
    pub max_load_factor: f64,
    pub min_load_factor: f64,
    pub historic_min_flow: i32,
    pub base_unit_count: i32,
    pub turbine_type: i32,
    pub set_representation: i32,
    /// Forced outage rate (TEIF).
    pub forced_outage_rate: f64,
    /// Scheduled maintenance rate (IP).
    pub maintenance_rate: f64,
    pub loss_type: i32,
    pub reference_date: String,
    pub comment: String,
    pub reference_volume: f64,
    /// Raw one-character regulation code; see [`regulation`](Self::regulation).
    pub regulation_code: String,
}

impl HydroPlantRecord {
    /// An empty registry slot, as written for unused station numbers.
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// `true` when this record is an unused slot (station id 0).
    pub fn is_placeholder(&self) -> bool {
        self.station_id == 0
    }

    /// Downstream station id, or `None` for a terminal plant.
    pub fn downstream(&self) -> Option<i32> {
        (self.downstream_station_id != 0).then_some(self.downstream_station_id)
    }

    pub fn regulation(&self) -> Option<RegulationType> {
        RegulationType::from_code(&self.regulation_code)
    }

    /// Installed capacity in MW over the active machine sets.
    pub fn installed_capacity(&self) -> f64 {
        self.machine_sets.installed_capacity()
    }

    /// Useful storage: `max_volume - min_volume`, hm³.
    pub fn useful_volume(&self) -> f64 {
        self.max_volume - self.min_volume
    }

    /// Monthly evaporation for `month` in `1..=12`.
    pub fn evaporation_for(&self, month: usize) -> Option<i32> {
        month
            .checked_sub(1)
            .and_then(|i| self.evaporation.get(i))
            .copied()
    }

    /// Upstream elevation for a stored volume, from the volume → elevation curve.
    pub fn elevation_at(&self, volume: f64) -> f64 {
        self.volume_elevation.evaluate(volume)
    }

    /// Reservoir surface area for an elevation, from the elevation → area curve.
    pub fn area_at(&self, elevation: f64) -> f64 {
        self.elevation_area.evaluate(elevation)
    }
}
