//! Layout engine: normalize, cluster, assign columns, position.

use serde::Serialize;

use super::cluster::build_clusters;
use super::column::assign_columns;
use super::interval::{normalize, normalize_lenient, Interval};
use super::position::Position;
use crate::config::LayoutConfig;
use crate::error::{InvariantViolation, LayoutError, ValidationError};
use crate::items::{Event, ItemRef, Task};

/// An interval placed in the day view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedInterval {
    #[serde(flatten)]
    pub interval: Interval,
    pub column_index: usize,
    /// Peak concurrency of the interval's cluster
    pub total_columns: usize,
    /// Percent
    pub left: f64,
    /// Percent
    pub width: f64,
}

impl PositionedInterval {
    pub fn id(&self) -> &str {
        self.interval.id()
    }

    pub fn position(&self) -> Position {
        Position {
            left: self.left,
            width: self.width,
        }
    }
}

/// An item left out of a lenient layout run.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedItem {
    pub item: ItemRef,
    pub error: ValidationError,
}

/// Outcome of [`LayoutEngine::compute_report`].
#[derive(Debug, Clone, Default)]
pub struct LayoutReport {
    pub positioned: Vec<PositionedInterval>,
    pub rejected: Vec<RejectedItem>,
    pub cluster_count: usize,
    pub invariant_violations: Vec<InvariantViolation>,
}

/// Computes column layouts for one day of events and tasks.
///
/// Stateless between calls; every call recomputes the full day.
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Create an engine with default config.
    pub fn new() -> Self {
        Self {
            config: LayoutConfig::default(),
        }
    }

    /// Create an engine with custom config.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out `events` and `tasks`, failing on the first invalid item.
    ///
    /// Output is ordered by `(start, id)`.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] for a malformed scheduled time, an empty
    /// or out-of-day time range, or a duplicate id.
    pub fn compute(
        &self,
        events: &[Event],
        tasks: &[Task],
    ) -> Result<Vec<PositionedInterval>, LayoutError> {
        let intervals = normalize(events, tasks, &self.config)?;
        Ok(layout_intervals(intervals).positioned)
    }

    /// Lay out every valid item and report the invalid ones.
    pub fn compute_report(&self, events: &[Event], tasks: &[Task]) -> LayoutReport {
        let normalized = normalize_lenient(events, tasks, &self.config);
        for (item, error) in &normalized.rejected {
            tracing::debug!(
                "Skipping {} #{}: {}",
                item.kind.as_str(),
                item.index,
                error
            );
        }

        let mut report = layout_intervals(normalized.intervals);
        report.rejected = normalized
            .rejected
            .into_iter()
            .map(|(item, error)| RejectedItem { item, error })
            .collect();
        report
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Cluster, assign and position already-normalized intervals.
pub fn layout_intervals(intervals: Vec<Interval>) -> LayoutReport {
    let input_len = intervals.len();
    let clusters = build_clusters(intervals);
    let mut report = LayoutReport {
        positioned: Vec::with_capacity(input_len),
        cluster_count: clusters.len(),
        ..LayoutReport::default()
    };

    for cluster in &clusters {
        let assignment = assign_columns(cluster);
        if let Some((start, end)) = cluster.span() {
            tracing::debug!(
                "Cluster {}-{}: {} item(s) in {} column(s)",
                start,
                end,
                cluster.len(),
                assignment.assigned.first().map_or(1, |a| a.total_columns)
            );
        }

        report.invariant_violations.extend(assignment.violations);
        report
            .positioned
            .extend(assignment.assigned.into_iter().map(|assigned| {
                let position = Position::of_column(assigned.column_index, assigned.total_columns);
                PositionedInterval {
                    interval: assigned.interval,
                    column_index: assigned.column_index,
                    total_columns: assigned.total_columns,
                    left: position.left,
                    width: position.width,
                }
            }));
    }

    report
        .positioned
        .sort_by(|a, b| a.interval.sort_key().cmp(&b.interval.sort_key()));

    tracing::debug!(
        "Laid out {} interval(s) in {} cluster(s)",
        report.positioned.len(),
        report.cluster_count
    );
    report
}

/// Lay out `events` and `tasks` with the default config.
///
/// # Errors
/// See [`LayoutEngine::compute`].
pub fn compute_layout(
    events: &[Event],
    tasks: &[Task],
) -> Result<Vec<PositionedInterval>, LayoutError> {
    LayoutEngine::new().compute(events, tasks)
}
