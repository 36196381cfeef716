//! Partitioning intervals into overlap clusters.
//!
//! A cluster is a connected component of the "overlaps" graph. Two intervals
//! that never overlap directly still share a cluster when a chain of
//! overlapping intervals links them.

use super::interval::Interval;

/// A maximal group of transitively overlapping intervals, ordered by
/// `(start, id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    members: Vec<Interval>,
}

impl Cluster {
    fn singleton(interval: Interval) -> Self {
        Self {
            members: vec![interval],
        }
    }

    pub fn members(&self) -> &[Interval] {
        &self.members
    }

    pub fn into_members(self) -> Vec<Interval> {
        self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Earliest start and latest end across the members.
    pub fn span(&self) -> Option<(u32, u32)> {
        let start = self.members.first()?.start_minutes();
        let end = self.members.iter().map(Interval::end_minutes).max()?;
        Some((start, end))
    }

    fn touches(&self, interval: &Interval) -> bool {
        self.members.iter().any(|member| member.overlaps(interval))
    }
}

/// Sort intervals into the canonical `(start, id)` order.
pub fn sort_intervals(intervals: &mut [Interval]) {
    intervals.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

/// Incremental cluster builder.
///
/// Intervals may be pushed in any order; an interval that overlaps members of
/// several open clusters merges them.
#[derive(Debug, Default)]
pub struct ClusterBuilder {
    clusters: Vec<Cluster>,
}

impl ClusterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one interval, joining or merging clusters as needed.
    pub fn push(&mut self, interval: Interval) {
        let hits: Vec<usize> = self
            .clusters
            .iter()
            .enumerate()
            .filter(|(_, cluster)| cluster.touches(&interval))
            .map(|(i, _)| i)
            .collect();

        let Some((&first, rest)) = hits.split_first() else {
            self.clusters.push(Cluster::singleton(interval));
            return;
        };

        // Remove highest index first so the remaining indices stay valid.
        for &index in rest.iter().rev() {
            let merged = self.clusters.remove(index);
            self.clusters[first].members.extend(merged.members);
        }
        let target = &mut self.clusters[first];
        target.members.push(interval);
        sort_intervals(&mut target.members);
    }

    /// Clusters ordered by their earliest member.
    pub fn finish(self) -> Vec<Cluster> {
        let mut clusters = self.clusters;
        clusters.sort_by(|a, b| {
            let a_key = a.members.first().map(Interval::sort_key);
            let b_key = b.members.first().map(Interval::sort_key);
            a_key.cmp(&b_key)
        });
        clusters
    }
}

/// Partition `intervals` into clusters.
///
/// Clusters come back ordered by their earliest member; each cluster's
/// members are ordered by `(start, id)`.
pub fn build_clusters(intervals: Vec<Interval>) -> Vec<Cluster> {
    let mut sorted = intervals;
    sort_intervals(&mut sorted);

    let mut builder = ClusterBuilder::new();
    for interval in sorted {
        builder.push(interval);
    }
    builder.finish()
}
