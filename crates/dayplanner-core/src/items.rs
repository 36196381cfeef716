//! Calendar events and tasks as supplied by the planner's store layer.
//!
//! These are the only shapes the layout engine accepts. Anything richer the
//! application keeps (descriptions, colours, list membership) stays on the
//! caller's side; the engine only carries back an [`ItemRef`] to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Kind of item an interval was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Event,
    Task,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Task => "task",
        }
    }
}

/// Opaque reference back to the input item: its kind and its index in the
/// slice the caller passed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRef {
    pub kind: ItemKind,
    pub index: usize,
}

impl ItemRef {
    pub fn event(index: usize) -> Self {
        Self {
            kind: ItemKind::Event,
            index,
        }
    }

    pub fn task(index: usize) -> Self {
        Self {
            kind: ItemKind::Task,
            index,
        }
    }
}

/// A calendar event with start and end instants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub all_day: bool,
}

impl Event {
    /// Create a timed event
    pub fn new(id: impl Into<String>, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            start_time,
            end_time,
            all_day: false,
        }
    }

    /// Set title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Mark as all-day
    pub fn with_all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }
}

/// A task from a task list, optionally pinned to a time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// `HH:MM`, 24-hour clock
    #[serde(default)]
    pub scheduled_time: Option<String>,
    /// Minutes; anything but a positive whole number reads as unset
    #[serde(default, deserialize_with = "positive_minutes")]
    pub duration: Option<i64>,
    #[serde(default)]
    pub all_day: bool,
}

impl Task {
    /// Create an unscheduled task
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            scheduled_time: None,
            duration: None,
            all_day: false,
        }
    }

    /// Set title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Pin to a time of day (`HH:MM`)
    pub fn scheduled_at(mut self, time: impl Into<String>) -> Self {
        self.scheduled_time = Some(time.into());
        self
    }

    /// Set duration in minutes
    pub fn with_duration(mut self, minutes: i64) -> Self {
        self.duration = Some(minutes);
        self
    }

    /// Mark as all-day
    pub fn with_all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }
}

/// Keep positive whole-number durations; map every other value to `None`
/// so the task falls back to the default duration.
fn positive_minutes<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let minutes = match value {
        Some(serde_json::Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 1.0 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        _ => None,
    };
    Ok(minutes.filter(|m| *m > 0))
}

/// One day's worth of items, as read by the CLI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutInput {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}
