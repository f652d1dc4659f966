//! Performance feedback shown on a topic's dashboard.

use crate::types::{QuizAttempt, TopicProgress};
use serde::Serialize;

/// Last-quiz percentage at or below which a review is recommended.
pub const REVIEW_THRESHOLD_PERCENT: u32 = 70;

/// Advice derived from the most recent quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    ReviewMaterial,
    KeepGoing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PerformanceFeedback {
    pub last_score_percent: u32,
    pub recommendation: Recommendation,
}

impl PerformanceFeedback {
    /// Feedback for a topic, `None` before its first quiz.
    pub fn for_progress(progress: &TopicProgress) -> Option<Self> {
        progress.last_quiz().map(Self::from_attempt)
    }

    pub fn from_attempt(attempt: &QuizAttempt) -> Self {
        let last_score_percent = (attempt.score * 100.0).round().clamp(0.0, 100.0) as u32;
        let recommendation = if last_score_percent <= REVIEW_THRESHOLD_PERCENT {
            Recommendation::ReviewMaterial
        } else {
            Recommendation::KeepGoing
        };
        Self {
            last_score_percent,
            recommendation,
        }
    }

    pub fn message(&self) -> String {
        let advice = match self.recommendation {
            Recommendation::ReviewMaterial => {
                "We recommend reviewing the Short Reading and Flashcards."
            }
            Recommendation::KeepGoing => "Excellent work! You're showing strong understanding.",
        };
        format!("Your last quiz score was {}%. {}", self.last_score_percent, advice)
    }
}
