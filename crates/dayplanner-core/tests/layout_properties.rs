//! Property tests for the overlap layout, checked against brute-force oracles.

use std::collections::HashMap;

use dayplanner_core::layout::{layout_intervals, Interval, MINUTES_PER_DAY};
use dayplanner_core::ItemRef;
use proptest::prelude::*;

fn build(spans: &[(u32, u32)]) -> Vec<Interval> {
    spans
        .iter()
        .enumerate()
        .map(|(i, &(start, len))| {
            let end = (start + len).min(MINUTES_PER_DAY);
            Interval::new(format!("item-{i:02}"), start, end, ItemRef::event(i)).unwrap()
        })
        .collect()
}

/// Connected components by repeated pairwise merging.
fn oracle_components(intervals: &[Interval]) -> Vec<usize> {
    let mut component: Vec<usize> = (0..intervals.len()).collect();
    let mut changed = true;
    while changed {
        changed = false;
        for i in 0..intervals.len() {
            for j in 0..intervals.len() {
                if intervals[i].overlaps(&intervals[j]) && component[i] != component[j] {
                    let low = component[i].min(component[j]);
                    component[i] = low;
                    component[j] = low;
                    changed = true;
                }
            }
        }
    }
    component
}

/// Peak number of intervals covering any single minute.
fn oracle_peak(intervals: &[&Interval]) -> usize {
    (0..MINUTES_PER_DAY)
        .map(|m| {
            intervals
                .iter()
                .filter(|iv| iv.start_minutes() <= m && m < iv.end_minutes())
                .count()
        })
        .max()
        .unwrap_or(0)
}

fn spans() -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec((0u32..1430, 1u32..240), 0..24)
}

proptest! {
    #[test]
    fn prop_every_interval_appears_once(spans in spans()) {
        let intervals = build(&spans);
        let report = layout_intervals(intervals.clone());

        prop_assert_eq!(report.positioned.len(), intervals.len());
        let mut ids: Vec<_> = report.positioned.iter().map(|p| p.id().to_string()).collect();
        ids.sort();
        ids.dedup();
        prop_assert_eq!(ids.len(), intervals.len());
    }

    #[test]
    fn prop_shared_column_never_overlaps(spans in spans()) {
        let report = layout_intervals(build(&spans));
        let positioned = &report.positioned;

        for (i, a) in positioned.iter().enumerate() {
            for b in positioned.iter().skip(i + 1) {
                if a.column_index == b.column_index && a.interval.overlaps(&b.interval) {
                    prop_assert!(false, "{} and {} share column {}", a.id(), b.id(), a.column_index);
                }
            }
        }
        prop_assert!(report.invariant_violations.is_empty());
    }

    #[test]
    fn prop_total_columns_is_peak_concurrency(spans in spans()) {
        let intervals = build(&spans);
        let components = oracle_components(&intervals);
        let report = layout_intervals(intervals.clone());

        let by_id: HashMap<&str, usize> = report
            .positioned
            .iter()
            .map(|p| (p.id(), p.total_columns))
            .collect();

        let mut peaks: HashMap<usize, usize> = HashMap::new();
        for &component in &components {
            peaks.entry(component).or_insert_with(|| {
                let members: Vec<&Interval> = intervals
                    .iter()
                    .zip(&components)
                    .filter(|(_, c)| **c == component)
                    .map(|(iv, _)| iv)
                    .collect();
                oracle_peak(&members)
            });
        }

        for (interval, component) in intervals.iter().zip(&components) {
            prop_assert_eq!(by_id[interval.id()], peaks[component]);
        }

        let mut distinct = components.clone();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(report.cluster_count, distinct.len());
    }

    #[test]
    fn prop_positions_stay_in_bounds(spans in spans()) {
        let report = layout_intervals(build(&spans));
        for p in &report.positioned {
            prop_assert!(p.column_index < p.total_columns);
            prop_assert!(p.left >= 0.0 && p.left < 100.0);
            prop_assert!((p.width - 100.0 / p.total_columns as f64).abs() < 1e-9);
            prop_assert!(p.left + p.width <= 100.0 + 1e-9);
        }
    }

    #[test]
    fn prop_isolated_interval_is_full_width(spans in spans()) {
        let intervals = build(&spans);
        let report = layout_intervals(intervals.clone());
        for p in &report.positioned {
            let isolated = intervals
                .iter()
                .filter(|other| other.id() != p.id())
                .all(|other| !other.overlaps(&p.interval));
            if isolated {
                prop_assert_eq!(p.total_columns, 1);
                prop_assert_eq!(p.left, 0.0);
                prop_assert_eq!(p.width, 100.0);
            }
        }
    }

    #[test]
    fn prop_layout_is_deterministic(spans in spans()) {
        let intervals = build(&spans);
        let mut shuffled = intervals.clone();
        shuffled.reverse();

        let first = serde_json::to_string(&layout_intervals(intervals).positioned).unwrap();
        let second = serde_json::to_string(&layout_intervals(shuffled).positioned).unwrap();
        prop_assert_eq!(first, second);
    }
}
