//! Topic dashboard and short reading.

use std::io::Write;

use chrono::NaiveDate;
use microlearn_core::{BlobStore, PerformanceFeedback, ProgressError};

use crate::state::AppState;

/// Print a topic's title, due counts and last-quiz feedback.
pub fn show_dashboard<B: BlobStore, G, W: Write>(
    state: &mut AppState<B, G>,
    topic: &str,
    today: NaiveDate,
    out: &mut W,
) -> anyhow::Result<()> {
    state.select_topic(topic)?;
    let progress = state
        .store
        .topic_progress(topic)
        .ok_or_else(|| ProgressError::TopicNotFound(topic.to_string()))?;
    let counts = state.store.review_counts(topic, today)?;

    writeln!(out, "{}", progress.module.topic)?;
    writeln!(out, "Flashcards due: {}", counts.flashcards)?;
    writeln!(out, "Quiz questions due: {}", counts.quiz)?;
    if let Some(feedback) = PerformanceFeedback::for_progress(progress) {
        writeln!(out)?;
        writeln!(out, "{}", feedback.message())?;
    }
    Ok(())
}

/// Print the module summary.
pub fn show_reading<B: BlobStore, G, W: Write>(
    state: &mut AppState<B, G>,
    topic: &str,
    out: &mut W,
) -> anyhow::Result<()> {
    state.select_topic(topic)?;
    let module = state
        .store
        .module(topic)
        .ok_or_else(|| ProgressError::TopicNotFound(topic.to_string()))?;

    writeln!(out, "Short Reading: {}", module.topic)?;
    writeln!(out)?;
    writeln!(out, "{}", module.summary)?;
    Ok(())
}
