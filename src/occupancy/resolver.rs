//! # Dock Occupancy Resolver

//! Maps {configured dock set} x {active load records} x {block-list} to a per-dock status.
//! Occupancy is a pure projection over the current data: it is recomputed on demand, never
//! stored, so the reported state cannot drift from the daily log. The resolver is
//! deterministic and has no side effects beyond a warning log for unmapped records, so it
//! is safe to call on every state-changing event at whatever cadence the caller chooses.

use std::collections::HashMap;
use tracing::warn;
use crate::config::YardSettings;
use crate::models::{DockOccupancy, DockStatus, LoadRecord, YardOccupancy, RAMP_SENTINEL};

/// Resolves per-dock occupancy for a fixed yard layout.
pub struct OccupancyResolver {
    dock_set: Vec<String>,
    ramp_exempt: bool,
}

impl OccupancyResolver {
    /// Creates a resolver for the configured yard.
    pub fn new(yard: &YardSettings) -> Self {
        OccupancyResolver {
            dock_set: yard.dock_set(),
            ramp_exempt: !yard.include_ramp,
        }
    }

    /// Creates a resolver over an explicit dock set. The `Ramp` sentinel participates
    /// only if it appears in the set.
    pub fn with_dock_set(dock_set: Vec<String>) -> Self {
        let ramp_exempt = !dock_set.iter().any(|d| d == RAMP_SENTINEL);
        OccupancyResolver { dock_set, ramp_exempt }
    }

    /// Computes the status of every dock in the configured set.
    ///
    /// Every configured dock appears exactly once in the output, occupied or not.
    /// Records are grouped by dock number; a dock with active records is `in-use`
    /// (exactly one) or `double-booked` (two or more). A dock present in the
    /// block-list is `blocked` regardless of occupant count and its occupant list is
    /// suppressed; the underlying records are untouched.
    ///
    /// A record pointing at a dock outside the configured set is logged and dropped
    /// rather than failing the whole computation.
    ///
    /// # Arguments
    ///
    /// * `records`: the current load records; inactive ones are ignored
    /// * `block_list`: dock number -> operator-supplied reason
    pub fn resolve(
        &self,
        records: &[LoadRecord],
        block_list: &HashMap<String, String>,
    ) -> YardOccupancy {
        let mut occupants: HashMap<&str, Vec<&LoadRecord>> = HashMap::new();

        for record in records.iter().filter(|r| r.is_active()) {
            let dock = match record.dock_number.as_deref() {
                Some(dock) => dock,
                None => continue,
            };
            if self.ramp_exempt && dock == RAMP_SENTINEL {
                continue;
            }
            if !self.dock_set.iter().any(|d| d == dock) {
                warn!(
                    record_id = %record.id,
                    dock = %dock,
                    "load record references a dock outside the configured yard; excluding it"
                );
                continue;
            }
            occupants.entry(dock).or_default().push(record);
        }

        let docks = self
            .dock_set
            .iter()
            .map(|dock| {
                if let Some(reason) = block_list.get(dock) {
                    return DockOccupancy {
                        dock_number: dock.clone(),
                        status: DockStatus::Blocked,
                        occupants: Vec::new(),
                        blocked_reason: Some(reason.clone()),
                    };
                }

                match occupants.get(dock.as_str()) {
                    None => DockOccupancy::available(dock.clone()),
                    Some(active) => DockOccupancy {
                        dock_number: dock.clone(),
                        status: if active.len() == 1 {
                            DockStatus::InUse
                        } else {
                            DockStatus::DoubleBooked
                        },
                        occupants: active.iter().map(|r| r.occupant_summary()).collect(),
                        blocked_reason: None,
                    },
                }
            })
            .collect();

        YardOccupancy { docks }
    }
}
