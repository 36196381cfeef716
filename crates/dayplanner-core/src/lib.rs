//! # Dayplanner Core Library
//!
//! This library provides the calendar layout logic for the Dayplanner daily
//! planner. The web application and the standalone CLI are thin layers over
//! the same core library.
//!
//! ## Architecture
//!
//! - **Layout**: Turns one day's events and scheduled tasks into
//!   side-by-side columns so overlapping items never collide
//! - **Items**: The event and task shapes the store layer hands over
//! - **Config**: TOML-based layout preferences
//!
//! ## Key Components
//!
//! - [`compute_layout`]: One-shot layout with default settings
//! - [`LayoutEngine`]: Configurable layout with a lenient reporting mode
//! - [`Config`]: Application configuration management

pub mod config;
pub mod error;
pub mod items;
pub mod layout;

pub use config::{Config, LayoutConfig};
pub use error::{ConfigError, CoreError, InvariantViolation, LayoutError, ValidationError};
pub use items::{Event, ItemKind, ItemRef, LayoutInput, Task};
pub use layout::{
    compute_layout, Interval, LayoutEngine, LayoutReport, Position, PositionedInterval,
    RejectedItem,
};
