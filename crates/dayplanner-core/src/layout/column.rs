//! Column assignment within a cluster.
//!
//! The number of columns is the cluster's peak concurrency. Members are then
//! placed first-fit, lowest column index first, in `(start, id)` order.

use super::cluster::{sort_intervals, Cluster};
use super::interval::Interval;
use crate::error::InvariantViolation;

/// Kind of boundary point in the concurrency sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Boundary {
    // Declared first so ends sort before starts at the same minute.
    End,
    Start,
}

/// Maximum number of intervals active at any single minute.
///
/// Ends are processed before starts at equal timestamps, so an interval
/// ending at minute M is not concurrent with one starting at M.
pub fn peak_concurrency(intervals: &[Interval]) -> usize {
    let mut points: Vec<(u32, Boundary)> = Vec::with_capacity(intervals.len() * 2);
    for interval in intervals {
        points.push((interval.start_minutes(), Boundary::Start));
        points.push((interval.end_minutes(), Boundary::End));
    }
    points.sort_unstable();

    let mut active = 0usize;
    let mut peak = 0usize;
    for (_, boundary) in points {
        match boundary {
            Boundary::Start => {
                active += 1;
                peak = peak.max(active);
            }
            Boundary::End => active = active.saturating_sub(1),
        }
    }
    peak
}

/// An interval with its column inside its cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAssigned {
    pub interval: Interval,
    pub column_index: usize,
    pub total_columns: usize,
}

/// Column assignment for one cluster.
#[derive(Debug, Clone, Default)]
pub struct ColumnAssignment {
    pub assigned: Vec<ColumnAssigned>,
    /// Intervals that fit no column and were forced into column 0.
    pub violations: Vec<InvariantViolation>,
}

/// Place `members` (already in `(start, id)` order) into `total_columns`
/// columns, first-fit by index.
pub(crate) fn place_first_fit(members: &[Interval], total_columns: usize) -> ColumnAssignment {
    let total_columns = total_columns.max(1);
    let mut columns: Vec<Vec<&Interval>> = vec![Vec::new(); total_columns];
    let mut out = ColumnAssignment::default();

    for interval in members {
        let slot = columns
            .iter()
            .position(|column| column.iter().all(|placed| !placed.overlaps(interval)));

        let column_index = match slot {
            Some(index) => index,
            None => {
                let violation = InvariantViolation {
                    id: interval.id().to_string(),
                    total_columns,
                };
                tracing::warn!("{violation}");
                out.violations.push(violation);
                0
            }
        };

        columns[column_index].push(interval);
        out.assigned.push(ColumnAssigned {
            interval: interval.clone(),
            column_index,
            total_columns,
        });
    }

    out
}

/// Assign columns to every member of `cluster`.
pub fn assign_columns(cluster: &Cluster) -> ColumnAssignment {
    let members = cluster.members();
    let total_columns = if members.len() == 1 {
        1
    } else {
        peak_concurrency(members)
    };

    let mut ordered: Vec<Interval> = members.to_vec();
    sort_intervals(&mut ordered);

    let assignment = place_first_fit(&ordered, total_columns);
    debug_assert!(
        assignment.violations.is_empty(),
        "peak concurrency {total_columns} was not enough: {:?}",
        assignment.violations
    );
    assignment
}
