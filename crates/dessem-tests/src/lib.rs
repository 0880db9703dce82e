//! Shared fixtures for the integration tests and benches.
//!
//! Every fixture is built in code through the encoder, so there are no
//! binary files to keep in sync with the layout. All float values are
//! exactly representable as `f32`, which lets tests compare decoded records
//! with `==`.

pub mod fixtures {
    use dessem_encoder::HidrEncoder;
    use dessem_types::{HydroPlantRecord, MachineSets, Polynomial, TailracePolynomials};
    use dessem_wire::RECORD_SIZE;

    /// A fully populated plant with two active machine sets.
    ///
    /// Station ids above 0 give a real plant; the id is mixed into a few
    /// numeric fields so plants in a registry differ from each other.
    pub fn plant(station_id: i32, name: &str) -> HydroPlantRecord {
        let scale = f64::from(station_id);
        HydroPlantRecord {
            name: name.to_string(),
            station_id,
            database_id: 10_000_000_000 + i64::from(station_id),
            subsystem_id: 1 + station_id % 4,
            company_id: 10,
            downstream_station_id: 0,
            diversion_flag: 0,
            min_volume: 1000.0 + scale,
            max_volume: 5000.0 + scale,
            spillway_volume: 5000.0 + scale,
            diversion_volume: 0.0,
            min_elevation: 700.5,
            max_elevation: 760.25,
            volume_elevation: Polynomial::new([700.5, 0.015625, -0.0009765625, 0.0, 0.0]),
            elevation_area: Polynomial::new([-3000.0, 4.5, 0.0, 0.0, 0.0]),
            evaporation: [70, 55, 45, 30, 20, 15, 10, 15, 35, 50, 60, 75],
            machine_sets: MachineSets {
                active_count: 2,
                unit_count: [4, 2, 0, 0, 0],
                effective_power: [200.0, 150.5, 0.0, 0.0, 0.0],
                effective_head: [88.0, 86.5, 0.0, 0.0, 0.0],
                effective_flow: [250, 190, 0, 0, 0],
            },
            specific_productivity: 0.0087890625,
            hydraulic_losses: 2.5,
            tailrace: TailracePolynomials::from_flat(
                2,
                &std::array::from_fn(|i| match i {
                    0 => 650.0,
                    1 => 0.001953125,
                    6 => 651.5,
                    7 => 0.0009765625,
                    _ => 0.0,
                }),
            ),
            average_tailrace_elevation: 651.0,
            spillage_influence: 1,
            max_load_factor: 100.0,
            min_load_factor: 20.0,
            historic_min_flow: 120,
            base_unit_count: 0,
            turbine_type: 1,
            set_representation: 0,
            forced_outage_rate: 3.5,
            maintenance_rate: 7.25,
            loss_type: 2,
            reference_date: "01/01/2020".to_string(),
            comment: format!("PLANT {station_id}"),
            reference_volume: 5000.0 + scale,
            regulation_code: "M".to_string(),
        }
    }

    /// `n` records where every fourth slot is a placeholder and each plant
    /// flows into the next station id.
    pub fn registry(n: usize) -> Vec<HydroPlantRecord> {
        (0..n)
            .map(|i| {
                if i % 4 == 3 {
                    return HydroPlantRecord::placeholder();
                }
                let id = i32::try_from(i + 1).unwrap();
                let mut p = plant(id, &format!("UHE {id}"));
                p.downstream_station_id = id + 1;
                p
            })
            .collect()
    }

    /// Encode records into a HIDR.DAT byte stream.
    pub fn encode(records: &[HydroPlantRecord]) -> Vec<u8> {
        HidrEncoder::new()
            .add_records(records.iter().cloned())
            .encode()
            .unwrap()
    }

    /// Encoded [`registry`].
    pub fn registry_bytes(n: usize) -> Vec<u8> {
        encode(&registry(n))
    }

    /// Byte range of record `index` in an encoded stream.
    pub fn record_range(index: usize) -> std::ops::Range<usize> {
        index * RECORD_SIZE..(index + 1) * RECORD_SIZE
    }
}
