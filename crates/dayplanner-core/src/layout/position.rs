//! Horizontal position of a column as percentages of the day column width.

use serde::{Deserialize, Serialize};

/// Left offset and width, both in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub left: f64,
    pub width: f64,
}

impl Position {
    /// Position of `column_index` out of `total_columns`.
    ///
    /// `total_columns` of 0 is treated as 1.
    pub fn of_column(column_index: usize, total_columns: usize) -> Self {
        let total = total_columns.max(1) as f64;
        let width = 100.0 / total;
        Self {
            left: column_index as f64 * width,
            width,
        }
    }

    /// Convert to pixels for a container `container_px` wide.
    pub fn to_pixels(&self, container_px: f64) -> (f64, f64) {
        (
            self.left / 100.0 * container_px,
            self.width / 100.0 * container_px,
        )
    }
}
