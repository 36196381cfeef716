//! Overlap layout for a day view.
//!
//! This module provides:
//! - Normalization of events and tasks into minute-of-day intervals
//! - Partitioning of intervals into overlap clusters
//! - First-fit column assignment sized by each cluster's peak concurrency
//! - Conversion of columns into percentage offsets and widths

mod cluster;
mod column;
mod engine;
mod interval;
mod position;

pub use cluster::{build_clusters, sort_intervals, Cluster, ClusterBuilder};
pub use column::{assign_columns, peak_concurrency, ColumnAssigned, ColumnAssignment};
pub use engine::{
    compute_layout, layout_intervals, LayoutEngine, LayoutReport, PositionedInterval,
    RejectedItem,
};
pub use interval::{
    format_minutes, normalize, normalize_lenient, parse_time_of_day, Interval, Normalized,
    Normalizer, MINUTES_PER_DAY,
};
pub use position::Position;
