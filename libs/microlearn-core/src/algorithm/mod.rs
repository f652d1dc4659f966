//! Spaced repetition scheduling.

pub mod ladder;

pub use ladder::IntervalLadder;

use crate::types::ReviewItem;
use chrono::NaiveDate;

/// Trait for spaced repetition schedulers.
pub trait ReviewScheduler {
    /// Highest mastery level an item can reach.
    fn max_level(&self) -> u32;

    /// Calculate the review state after an answer.
    ///
    /// `None` stands for an item that was never answered, which is treated as
    /// level 0.
    fn next_state(&self, item: Option<&ReviewItem>, is_correct: bool, today: NaiveDate) -> ReviewItem;
}
