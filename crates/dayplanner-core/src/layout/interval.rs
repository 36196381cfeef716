//! Normalization of events and tasks into minute-of-day intervals.

use std::collections::HashSet;

use chrono::{DateTime, NaiveTime, Timelike, Utc};
use serde::Serialize;

use crate::config::LayoutConfig;
use crate::error::ValidationError;
use crate::items::{Event, ItemRef, Task};

/// Minutes in one day; the exclusive upper bound of the timeline.
pub const MINUTES_PER_DAY: u32 = 1440;

/// A half-open `[start, end)` span of one day's timeline.
///
/// Bounds are checked on construction and cannot change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    id: String,
    start_minutes: u32,
    end_minutes: u32,
    payload: ItemRef,
}

impl Interval {
    /// Create an interval.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidTimeRange`] unless
    /// `start < end <= 1440`.
    pub fn new(
        id: impl Into<String>,
        start_minutes: u32,
        end_minutes: u32,
        payload: ItemRef,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        if start_minutes >= end_minutes || end_minutes > MINUTES_PER_DAY {
            return Err(ValidationError::InvalidTimeRange {
                id,
                start: format_minutes(start_minutes),
                end: format_minutes(end_minutes),
            });
        }
        Ok(Self {
            id,
            start_minutes,
            end_minutes,
            payload,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn start_minutes(&self) -> u32 {
        self.start_minutes
    }

    pub fn end_minutes(&self) -> u32 {
        self.end_minutes
    }

    pub fn payload(&self) -> ItemRef {
        self.payload
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end_minutes - self.start_minutes
    }

    /// Half-open overlap: touching at a boundary is not an overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_minutes < other.end_minutes && other.start_minutes < self.end_minutes
    }

    /// Ordering key used everywhere the engine needs a deterministic order.
    pub(crate) fn sort_key(&self) -> (u32, &str) {
        (self.start_minutes, self.id.as_str())
    }
}

/// Render minutes since midnight as `HH:MM` (`24:00` for end of day).
pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Parse a strict `HH:MM` time of day into minutes since midnight.
pub fn parse_time_of_day(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    let bytes = trimmed.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b':'
        && bytes[..2].iter().chain(&bytes[3..]).all(u8::is_ascii_digit);
    if !well_formed {
        return None;
    }
    let time = NaiveTime::parse_from_str(trimmed, "%H:%M").ok()?;
    Some(time.hour() * 60 + time.minute())
}

fn minute_of_day_floor(instant: &DateTime<Utc>) -> u32 {
    instant.num_seconds_from_midnight() / 60
}

fn minute_of_day_ceil(instant: &DateTime<Utc>) -> u32 {
    let mut seconds = instant.num_seconds_from_midnight();
    if instant.nanosecond() > 0 {
        seconds += 1;
    }
    seconds.div_ceil(60)
}

/// Turns raw events and tasks into [`Interval`]s.
pub struct Normalizer<'a> {
    config: &'a LayoutConfig,
}

impl<'a> Normalizer<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    /// Normalize one event. `Ok(None)` means the event is all-day and is not
    /// laid out.
    pub fn event(&self, index: usize, event: &Event) -> Result<Option<Interval>, ValidationError> {
        if event.all_day {
            return Ok(None);
        }
        if event.end_time <= event.start_time {
            return Err(ValidationError::InvalidTimeRange {
                id: event.id.clone(),
                start: event.start_time.to_rfc3339(),
                end: event.end_time.to_rfc3339(),
            });
        }

        let start = minute_of_day_floor(&event.start_time);
        let end = if event.end_time.date_naive() > event.start_time.date_naive() {
            let next_day = event.start_time.date_naive().succ_opt();
            let ends_at_midnight = Some(event.end_time.date_naive()) == next_day
                && event.end_time.num_seconds_from_midnight() == 0
                && event.end_time.nanosecond() == 0;
            if !ends_at_midnight && !self.config.clamp_to_day_end {
                return Err(ValidationError::InvalidTimeRange {
                    id: event.id.clone(),
                    start: event.start_time.to_rfc3339(),
                    end: event.end_time.to_rfc3339(),
                });
            }
            MINUTES_PER_DAY
        } else {
            minute_of_day_ceil(&event.end_time)
        };

        Interval::new(event.id.clone(), start, end, ItemRef::event(index)).map(Some)
    }

    /// Normalize one task. `Ok(None)` means the task is all-day or has no
    /// scheduled time and is not laid out.
    pub fn task(&self, index: usize, task: &Task) -> Result<Option<Interval>, ValidationError> {
        if task.all_day {
            return Ok(None);
        }
        let Some(raw) = task.scheduled_time.as_deref() else {
            return Ok(None);
        };
        let start = parse_time_of_day(raw).ok_or_else(|| ValidationError::InvalidScheduledTime {
            task_id: task.id.clone(),
            value: raw.to_string(),
        })?;

        let duration = match task.duration {
            Some(minutes) if minutes > 0 => minutes,
            _ => i64::from(self.config.default_task_minutes),
        };
        let requested_end = i64::from(start).saturating_add(duration);
        if requested_end > i64::from(MINUTES_PER_DAY) && !self.config.clamp_to_day_end {
            return Err(ValidationError::InvalidTimeRange {
                id: task.id.clone(),
                start: format_minutes(start),
                end: format!("{requested_end} min"),
            });
        }
        let end = requested_end.min(i64::from(MINUTES_PER_DAY)) as u32;

        Interval::new(task.id.clone(), start, end, ItemRef::task(index)).map(Some)
    }
}

/// Result of a lenient normalization pass.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub intervals: Vec<Interval>,
    pub rejected: Vec<(ItemRef, ValidationError)>,
}

/// Normalize every item, failing on the first invalid one.
///
/// # Errors
/// Returns the first [`ValidationError`] in input order (events before
/// tasks).
pub fn normalize(
    events: &[Event],
    tasks: &[Task],
    config: &LayoutConfig,
) -> Result<Vec<Interval>, ValidationError> {
    let normalized = normalize_lenient(events, tasks, config);
    match normalized.rejected.into_iter().next() {
        Some((_, err)) => Err(err),
        None => Ok(normalized.intervals),
    }
}

/// Normalize every item, setting invalid ones aside instead of failing.
pub fn normalize_lenient(events: &[Event], tasks: &[Task], config: &LayoutConfig) -> Normalized {
    let normalizer = Normalizer::new(config);
    let mut out = Normalized::default();
    let mut seen = HashSet::new();

    let results = events
        .iter()
        .enumerate()
        .map(|(i, e)| (ItemRef::event(i), normalizer.event(i, e)))
        .chain(
            tasks
                .iter()
                .enumerate()
                .map(|(i, t)| (ItemRef::task(i), normalizer.task(i, t))),
        );

    for (item, result) in results {
        match result {
            Ok(Some(interval)) => {
                if config.reject_duplicate_ids && !seen.insert(interval.id.clone()) {
                    out.rejected.push((
                        item,
                        ValidationError::DuplicateId {
                            id: interval.id.clone(),
                        },
                    ));
                    continue;
                }
                out.intervals.push(interval);
            }
            Ok(None) => {}
            Err(err) => out.rejected.push((item, err)),
        }
    }

    out
}
