use std::collections::{HashMap, HashSet};

use crate::plant::HydroPlantRecord;

/// Station-id index over a decoded registry, for following river cascades.
///
/// Each plant names its downstream neighbour by station id
/// (`downstream_station_id`, 0 = terminal). The link is a reference into
/// the same registry, not ownership, so the cascade borrows the record
/// slice and resolves ids on demand.
///
/// Placeholders are not indexed. If two records share a station id the
/// first one wins and the duplicate is logged.
///
/// ```text
///   station 1 ──▶ station 2 ──▶ station 6 ──▶ 0 (outlet)
/// ```
pub struct Cascade<'a> {
    records: &'a [HydroPlantRecord],
    by_station: HashMap<i32, usize>,
}

impl<'a> Cascade<'a> {
    pub fn new(records: &'a [HydroPlantRecord]) -> Self {
        let mut by_station = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            if record.is_placeholder() {
                continue;
            }
            if let Some(&first) = by_station.get(&record.station_id) {
                log::warn!(
                    "station {} appears at records {first} and {index}, keeping the first",
                    record.station_id
                );
                continue;
            }
            by_station.insert(record.station_id, index);
        }
        Self {
            records,
            by_station,
        }
    }

    /// Number of indexed (non-placeholder) plants.
    pub fn len(&self) -> usize {
        self.by_station.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_station.is_empty()
    }

    /// Look up a plant by station id.
    pub fn get(&self, station_id: i32) -> Option<&'a HydroPlantRecord> {
        self.by_station
            .get(&station_id)
            .map(|&index| &self.records[index])
    }

    /// The plant immediately downstream of `station_id`.
    ///
    /// `None` when the station is unknown, terminal, or points at an id that
    /// is not in the registry.
    pub fn downstream_of(&self, station_id: i32) -> Option<&'a HydroPlantRecord> {
        self.get(station_id)?.downstream().and_then(|id| self.get(id))
    }

    /// Plants from `station_id` down to the outlet, starting with the station
    /// itself.
    ///
    /// The walk stops at a terminal plant, at a link to an unknown station,
    /// or when a station would be visited twice (a malformed cyclic link).
    pub fn path_to_outlet(&self, station_id: i32) -> Vec<&'a HydroPlantRecord> {
        let mut path = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.get(station_id);

        while let Some(plant) = current {
            if !seen.insert(plant.station_id) {
                log::warn!("cascade cycle detected at station {}", plant.station_id);
                break;
            }
            path.push(plant);
            current = plant.downstream().and_then(|id| self.get(id));
        }
        path
    }

    /// Plants that nothing else flows into.
    pub fn headwaters(&self) -> Vec<&'a HydroPlantRecord> {
        let fed: HashSet<i32> = self
            .by_station
            .values()
            .filter_map(|&i| self.records[i].downstream())
            .collect();
        let mut heads: Vec<_> = self
            .by_station
            .iter()
            .filter(|&(id, _)| !fed.contains(id))
            .map(|(_, &i)| i)
            .collect();
        heads.sort_unstable();
        heads.into_iter().map(|i| &self.records[i]).collect()
    }
}
