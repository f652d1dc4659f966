//! Fixed interval ladder.
//!
//! Each correct answer climbs one rung, each miss drops back to the bottom.
//! The rung reached selects the number of days until the next review.

use super::ReviewScheduler;
use crate::error::{ProgressError, Result};
use crate::types::ReviewItem;
use chrono::{Days, NaiveDate};

/// Days until the next review for levels 1, 2, 3, ...
pub const DEFAULT_INTERVALS: [u32; 4] = [1, 3, 7, 14];

/// Days before a missed item comes back.
const RETRY_AFTER_DAYS: u64 = 1;

/// Scheduler driven by a table of review intervals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalLadder {
    intervals: Vec<u32>,
}

impl Default for IntervalLadder {
    fn default() -> Self {
        Self {
            intervals: DEFAULT_INTERVALS.to_vec(),
        }
    }
}

impl IntervalLadder {
    /// Build a ladder from interval days, one entry per level.
    pub fn new(intervals: Vec<u32>) -> Result<Self> {
        if intervals.is_empty() {
            return Err(ProgressError::InvalidIntervals(
                "at least one interval is required".to_string(),
            ));
        }
        if let Some(position) = intervals.iter().position(|&days| days == 0) {
            return Err(ProgressError::InvalidIntervals(format!(
                "interval {} must be a positive number of days",
                position + 1
            )));
        }
        Ok(Self { intervals })
    }

    /// Parse a comma-separated list such as `1,3,7,14`.
    pub fn parse(list: &str) -> Result<Self> {
        let intervals = list
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<u32>().map_err(|_| {
                    ProgressError::InvalidIntervals(format!("{part:?} is not a number of days"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(intervals)
    }

    pub fn intervals(&self) -> &[u32] {
        &self.intervals
    }

    /// Interval for a level; level 0 has none.
    fn interval_days(&self, level: u32) -> u32 {
        match level {
            0 => 0,
            n => self.intervals[n as usize - 1],
        }
    }
}

impl ReviewScheduler for IntervalLadder {
    fn max_level(&self) -> u32 {
        self.intervals.len() as u32
    }

    fn next_state(&self, item: Option<&ReviewItem>, is_correct: bool, today: NaiveDate) -> ReviewItem {
        let level = item.map_or(0, |item| item.level);

        let (new_level, wait_days) = if is_correct {
            let new_level = level.saturating_add(1).min(self.max_level());
            (new_level, u64::from(self.interval_days(new_level)))
        } else {
            (0, RETRY_AFTER_DAYS)
        };

        ReviewItem {
            level: new_level,
            next_review_date: today
                .checked_add_days(Days::new(wait_days))
                .unwrap_or(NaiveDate::MAX),
        }
    }
}
