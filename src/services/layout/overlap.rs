//! Overlap resolution for a single day.
//!
//! Appointments are grouped into clusters (connected components of the half-open interval
//! intersection graph). Every member of a cluster gets its own lane: `column_count` is the cluster
//! size and `column_index` is the member's rank by `(start, id)`. Members that never coincide still
//! get separate lanes.

use std::collections::HashMap;

use crate::models::appointment::{AppointmentId, TimedAppointment};
use crate::models::layout::ColumnAssignment;

#[derive(Debug, Clone, Copy, Default)]
pub struct OverlapResolver;

impl OverlapResolver {
    pub fn new() -> Self {
        Self
    }

    /// Column assignments keyed by appointment id
    pub fn resolve(&self, day: &[TimedAppointment]) -> HashMap<AppointmentId, ColumnAssignment> {
        self.resolve_indexed(day)
            .into_iter()
            .zip(day)
            .map(|(assignment, appointment)| (appointment.id.clone(), assignment))
            .collect()
    }

    /// Column assignments aligned with the input slice
    pub fn resolve_indexed(&self, day: &[TimedAppointment]) -> Vec<ColumnAssignment> {
        let mut assignments = vec![ColumnAssignment::SOLO; day.len()];

        for cluster in Self::clusters(day) {
            let column_count = cluster.len();
            for (column_index, &idx) in cluster.iter().enumerate() {
                assignments[idx] = ColumnAssignment {
                    column_index,
                    column_count,
                };
            }
        }

        assignments
    }

    /// Indices of each overlap cluster, members ordered by `(start, id)`
    pub fn clusters(day: &[TimedAppointment]) -> Vec<Vec<usize>> {
        let mut order: Vec<usize> = (0..day.len()).collect();
        order.sort_by(|&a, &b| {
            day[a]
                .start
                .cmp(&day[b].start)
                .then_with(|| day[a].id.cmp(&day[b].id))
        });

        let mut clusters: Vec<Vec<usize>> = Vec::new();
        let mut current: Vec<usize> = Vec::new();
        let mut current_end = None;

        for idx in order {
            let appointment = &day[idx];

            // With members sorted by start, the newcomer intersects some member iff it starts
            // before the latest end seen in the cluster.
            match current_end {
                Some(end) if appointment.start < end => {
                    current.push(idx);
                    current_end = Some(end.max(appointment.end));
                }
                _ => {
                    if !current.is_empty() {
                        clusters.push(std::mem::take(&mut current));
                    }
                    current.push(idx);
                    current_end = Some(appointment.end);
                }
            }
        }

        if !current.is_empty() {
            clusters.push(current);
        }

        clusters
    }
}
