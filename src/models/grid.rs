//! Weekly time-grid model.
//!
//! The week is a fixed grid of days × hour rows. Two address spaces
//! index the same grid:
//!
//! - **Render index**: `day * render_hours_per_day + render_hour`.
//!   Covers every displayed row, including the reserved lunch row.
//! - **Logic index**: `day * schedulable_hours_per_day + logic_hour`.
//!   Covers only schedulable rows; this is the bit space masks live in.
//!
//! Rows after the lunch row shift down by one when mapped to logic
//! space. The lunch row itself has no logic index.
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{GridConfig, TimeGrid};
//!
//! let grid = TimeGrid::new(GridConfig::default()).unwrap();
//! // Monday, 13:30 row (render hour 5) sits right after lunch (row 4).
//! let render = grid.render_index(0, 5).unwrap();
//! assert_eq!(grid.to_logic_index(render), Some(4));
//! assert_eq!(grid.to_render_index(4), Some(render));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};

/// Width of one mask chunk in bits.
pub const MASK_CHUNK_BITS: usize = u32::BITS as usize;

fn default_chunk_size() -> usize {
    MASK_CHUNK_BITS
}

/// Generates hour-row labels `HH:30-(HH+1):20` for `start..=end`.
///
/// ```
/// use u_timetable::models::hour_marks;
///
/// assert_eq!(hour_marks(8, 9), vec!["08:30-09:20", "09:30-10:20"]);
/// ```
pub fn hour_marks(start_hour: u32, end_hour: u32) -> Vec<String> {
    (start_hour..=end_hour)
        .map(|h| format!("{:02}:30-{:02}:20", h, h + 1))
        .collect()
}

/// Grid geometry supplied by the caller.
///
/// `Default` is the reference week: Monday–Friday, rows from 08:30 to
/// 22:20, lunch on the 12:30 row (index 4).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridConfig {
    /// Day labels, in week order.
    pub days: Vec<String>,
    /// Displayed hour-row labels, lunch row included.
    pub hours: Vec<String>,
    /// Render row reserved for lunch (never schedulable).
    pub lunch_row_index: usize,
    /// Mask chunk width in bits. Only 32 is supported.
    #[serde(default = "default_chunk_size")]
    pub mask_chunk_size: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            days: ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
            hours: hour_marks(8, 21),
            lunch_row_index: 4,
            mask_chunk_size: MASK_CHUNK_BITS,
        }
    }
}

impl GridConfig {
    /// Replaces the day labels.
    pub fn with_days<I, S>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.days = days.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the hour-row labels.
    pub fn with_hours(mut self, hours: Vec<String>) -> Self {
        self.hours = hours;
        self
    }

    /// Sets the lunch row.
    pub fn with_lunch_row(mut self, lunch_row_index: usize) -> Self {
        self.lunch_row_index = lunch_row_index;
        self
    }

    /// Parses a grid configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Validated, immutable grid geometry with index arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    config: GridConfig,
    render_hours: usize,
    schedulable_hours: usize,
    chunk_count: usize,
}

impl TimeGrid {
    /// Validates `config` and builds the grid.
    ///
    /// # Errors
    /// `InvalidGrid` if there are no days, fewer than two hour rows,
    /// a lunch row outside the hour rows, or a chunk width other than 32.
    pub fn new(config: GridConfig) -> Result<Self> {
        if config.days.is_empty() {
            return Err(TimetableError::InvalidGrid("no days defined".into()));
        }
        if config.hours.len() < 2 {
            return Err(TimetableError::InvalidGrid(format!(
                "need at least 2 hour rows (lunch + one schedulable), got {}",
                config.hours.len()
            )));
        }
        if config.lunch_row_index >= config.hours.len() {
            return Err(TimetableError::InvalidGrid(format!(
                "lunch row {} outside {} hour rows",
                config.lunch_row_index,
                config.hours.len()
            )));
        }
        if config.mask_chunk_size != MASK_CHUNK_BITS {
            return Err(TimetableError::InvalidGrid(format!(
                "mask chunk size must be {MASK_CHUNK_BITS}, got {}",
                config.mask_chunk_size
            )));
        }

        Ok(Self::from_checked(config))
    }

    fn from_checked(config: GridConfig) -> Self {
        let render_hours = config.hours.len();
        let schedulable_hours = render_hours - 1;
        let chunk_count = (config.days.len() * schedulable_hours).div_ceil(MASK_CHUNK_BITS);
        Self {
            config,
            render_hours,
            schedulable_hours,
            chunk_count,
        }
    }

    /// The configuration this grid was built from.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn days(&self) -> &[String] {
        &self.config.days
    }

    pub fn hours(&self) -> &[String] {
        &self.config.hours
    }

    #[inline]
    pub fn day_count(&self) -> usize {
        self.config.days.len()
    }

    #[inline]
    pub fn render_hours_per_day(&self) -> usize {
        self.render_hours
    }

    #[inline]
    pub fn schedulable_hours_per_day(&self) -> usize {
        self.schedulable_hours
    }

    #[inline]
    pub fn lunch_row_index(&self) -> usize {
        self.config.lunch_row_index
    }

    /// Number of cells in render space.
    #[inline]
    pub fn render_len(&self) -> usize {
        self.day_count() * self.render_hours
    }

    /// Number of cells (bits) in logic space.
    #[inline]
    pub fn logic_len(&self) -> usize {
        self.day_count() * self.schedulable_hours
    }

    /// Number of 32-bit chunks a mask over this grid needs.
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// Render index of `(day, render_hour)`, or `None` outside the grid.
    pub fn render_index(&self, day: usize, render_hour: usize) -> Option<usize> {
        (day < self.day_count() && render_hour < self.render_hours)
            .then(|| day * self.render_hours + render_hour)
    }

    /// Logic index of `(day, logic_hour)`, or `None` outside the grid.
    pub fn logic_index(&self, day: usize, logic_hour: usize) -> Option<usize> {
        (day < self.day_count() && logic_hour < self.schedulable_hours)
            .then(|| day * self.schedulable_hours + logic_hour)
    }

    /// Splits a render index into `(day, render_hour)`.
    pub fn split_render(&self, render_index: usize) -> Option<(usize, usize)> {
        (render_index < self.render_len())
            .then(|| (render_index / self.render_hours, render_index % self.render_hours))
    }

    /// Whether a render index falls on the lunch row.
    pub fn is_lunch(&self, render_index: usize) -> bool {
        self.split_render(render_index)
            .is_some_and(|(_, hour)| hour == self.config.lunch_row_index)
    }

    /// Logic hour for a render hour within a day; `None` on the lunch row.
    pub fn to_logic_hour(&self, render_hour: usize) -> Option<usize> {
        let lunch = self.config.lunch_row_index;
        match render_hour {
            h if h >= self.render_hours || h == lunch => None,
            h if h > lunch => Some(h - 1),
            h => Some(h),
        }
    }

    /// Maps a render index to logic space.
    ///
    /// Returns `None` for the lunch row and for indices outside the grid.
    pub fn to_logic_index(&self, render_index: usize) -> Option<usize> {
        let (day, hour) = self.split_render(render_index)?;
        let logic_hour = self.to_logic_hour(hour)?;
        Some(day * self.schedulable_hours + logic_hour)
    }

    /// Maps a logic index back to render space.
    ///
    /// Returns `None` for indices outside the grid.
    pub fn to_render_index(&self, logic_index: usize) -> Option<usize> {
        if logic_index >= self.logic_len() {
            return None;
        }
        let day = logic_index / self.schedulable_hours;
        let logic_hour = logic_index % self.schedulable_hours;
        let render_hour = if logic_hour >= self.config.lunch_row_index {
            logic_hour + 1
        } else {
            logic_hour
        };
        Some(day * self.render_hours + render_hour)
    }
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self::from_checked(GridConfig::default())
    }
}
