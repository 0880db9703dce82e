use dessem_wire::layout::MACHINE_SET_SLOTS;

/// The five parallel machine-set arrays of a plant, plus the active count.
///
/// The record always carries [`MACHINE_SET_SLOTS`] slots per array. Only the
/// first `active_count` of them describe real machine sets; the remaining
/// slots are kept exactly as read and carry no meaning. They are not zeroed,
/// so nothing downstream should rely on their content.
///
/// ```text
///            slot 0   slot 1   slot 2   slot 3   slot 4
///  units     [  4   ][  2   ][ ?? ][ ?? ][ ?? ]
///  power MW  [ 90.0 ][ 45.0 ][ ?? ][ ?? ][ ?? ]
///  head m    [ 80.2 ][ 80.2 ][ ?? ][ ?? ][ ?? ]
///  flow m3/s [ 130  ][  65  ][ ?? ][ ?? ][ ?? ]
///            └──── active_count = 2 ─┘
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MachineSets {
    /// Number of meaningful slots, 0 through 5 in well-formed files.
    pub active_count: i32,
    /// Generating units per set.
    pub unit_count: [i32; MACHINE_SET_SLOTS],
    /// Effective power per unit, MW.
    pub effective_power: [f64; MACHINE_SET_SLOTS],
    /// Effective head, m.
    pub effective_head: [f64; MACHINE_SET_SLOTS],
    /// Effective flow, m³/s.
    pub effective_flow: [i32; MACHINE_SET_SLOTS],
}

/// One active machine set, gathered from the parallel arrays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MachineSet {
    pub unit_count: i32,
    pub effective_power: f64,
    pub effective_head: f64,
    pub effective_flow: i32,
}

impl MachineSets {
    /// Number of slots to treat as active.
    ///
    /// Negative counts read as 0 and counts above the slot capacity read as
    /// [`MACHINE_SET_SLOTS`].
    pub fn active_len(&self) -> usize {
        let len = usize::try_from(self.active_count).unwrap_or(0);
        if len > MACHINE_SET_SLOTS {
            log::warn!(
                "active machine-set count {} exceeds {MACHINE_SET_SLOTS} slots, clamping",
                self.active_count
            );
        }
        len.min(MACHINE_SET_SLOTS)
    }

    /// Iterate over the active sets in slot order.
    pub fn active(&self) -> impl Iterator<Item = MachineSet> + '_ {
        (0..self.active_len()).map(move |i| MachineSet {
            unit_count: self.unit_count[i],
            effective_power: self.effective_power[i],
            effective_head: self.effective_head[i],
            effective_flow: self.effective_flow[i],
        })
    }

    /// Total generating units across active sets.
    ///
    /// Summed as `i64`, so no combination of slot values can overflow.
    pub fn total_units(&self) -> i64 {
        self.active().map(|set| i64::from(set.unit_count)).sum()
    }

    /// Installed capacity in MW: Σ `unit_count × effective_power` over active sets.
    pub fn installed_capacity(&self) -> f64 {
        self.active().map(|set| set.capacity()).sum()
    }
}

impl MachineSet {
    /// Capacity of this set in MW.
    pub fn capacity(&self) -> f64 {
        f64::from(self.unit_count) * self.effective_power
    }
}
