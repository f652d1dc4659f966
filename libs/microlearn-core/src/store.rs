//! Per-topic progress store.
//!
//! The store owns the whole progress map in memory and writes it back to a
//! [`BlobStore`] after every mutation. A mutation that fails to persist is
//! rolled back, so readers never see state that was not saved.

use crate::algorithm::{IntervalLadder, ReviewScheduler};
use crate::error::{ProgressError, Result, StorageError};
use crate::selector::{count_due, select_due, DueItem};
use crate::storage::{free_backup_key, BlobStore, PROGRESS_KEY};
use crate::types::{
    Flashcard, ItemId, ItemKind, Module, QuizAttempt, QuizQuestion, ReviewCounts, ReviewItem,
    TopicProgress,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

type ProgressMap = BTreeMap<String, TopicProgress>;

/// Progress for every topic, backed by a blob store.
pub struct ProgressStore<B, R = IntervalLadder> {
    blob: B,
    scheduler: R,
    topics: ProgressMap,
    current_topic: Option<String>,
}

impl<B: BlobStore, R: ReviewScheduler> ProgressStore<B, R> {
    /// Load persisted progress.
    ///
    /// Missing or blank data yields an empty store. Data that is present but
    /// unreadable is reported as [`ProgressError::CorruptState`].
    pub fn load(blob: B, scheduler: R) -> Result<Self> {
        let topics = match blob.get(PROGRESS_KEY)? {
            Some(raw) => parse_progress(&raw)?,
            None => ProgressMap::new(),
        };
        debug!(topics = topics.len(), "loaded progress");
        Ok(Self::from_parts(blob, scheduler, topics))
    }

    /// Load persisted progress, moving unreadable data aside.
    ///
    /// A corrupt blob is copied to the first free backup key (see
    /// [`CORRUPT_BACKUP_KEY`](crate::storage::CORRUPT_BACKUP_KEY)) before the
    /// store starts empty, so the original bytes stay recoverable.
    pub fn recover(mut blob: B, scheduler: R) -> Result<Self> {
        let raw = blob.get(PROGRESS_KEY)?;
        let topics = match raw.as_deref().map(parse_progress) {
            None => ProgressMap::new(),
            Some(Ok(topics)) => topics,
            Some(Err(err)) => {
                let backup_key = free_backup_key(&blob)?;
                warn!(error = %err, %backup_key, "moving corrupt progress aside");
                blob.set(&backup_key, raw.as_deref().unwrap_or_default())?;
                blob.set(PROGRESS_KEY, "{}")?;
                ProgressMap::new()
            }
        };
        Ok(Self::from_parts(blob, scheduler, topics))
    }

    fn from_parts(blob: B, scheduler: R, topics: ProgressMap) -> Self {
        Self {
            blob,
            scheduler,
            topics,
            current_topic: None,
        }
    }

    /// Start tracking a topic.
    ///
    /// Does nothing if the topic already exists. Returns whether it was created.
    pub fn initialize_topic_progress(&mut self, topic: &str, module: Module) -> Result<bool> {
        if self.topics.contains_key(topic) {
            debug!(topic, "topic already initialized");
            return Ok(false);
        }

        self.topics.insert(topic.to_string(), TopicProgress::new(module));
        if let Err(err) = self.persist() {
            self.topics.remove(topic);
            return Err(err);
        }

        info!(topic, "initialized topic progress");
        Ok(true)
    }

    /// Apply an answer to an item and return its new review state.
    pub fn update_item_progress(
        &mut self,
        topic: &str,
        item: ItemId,
        is_correct: bool,
        today: NaiveDate,
    ) -> Result<ReviewItem> {
        let scheduler = &self.scheduler;
        let next = {
            let progress = self
                .topics
                .get(topic)
                .ok_or_else(|| ProgressError::TopicNotFound(topic.to_string()))?;
            if !progress.module.contains(item) {
                return Err(ProgressError::ItemNotFound {
                    topic: topic.to_string(),
                    item,
                });
            }
            scheduler.next_state(progress.review_item(item), is_correct, today)
        };

        self.mutate(topic, |progress| {
            progress.items.insert(item, next);
        })?;

        debug!(topic, %item, is_correct, level = next.level, next_review = %next.next_review_date, "updated item");
        Ok(next)
    }

    /// Append a completed quiz session to the topic's history.
    pub fn record_quiz_performance(
        &mut self,
        topic: &str,
        score: f64,
        today: NaiveDate,
    ) -> Result<QuizAttempt> {
        if !score.is_finite() || !(0.0..=1.0).contains(&score) {
            return Err(ProgressError::InvalidScore(score));
        }

        let attempt = QuizAttempt { score, date: today };
        self.mutate(topic, |progress| {
            progress.performance.quiz_history.push(attempt);
        })?;

        info!(topic, score, "recorded quiz performance");
        Ok(attempt)
    }

    /// Tracked topic names, sorted.
    pub fn topics(&self) -> impl Iterator<Item = &str> + '_ {
        self.topics.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn topic_progress(&self, topic: &str) -> Option<&TopicProgress> {
        self.topics.get(topic)
    }

    pub fn module(&self, topic: &str) -> Option<&Module> {
        self.topic_progress(topic).map(|progress| &progress.module)
    }

    /// Flashcards due on the given day, in module order.
    pub fn due_flashcards(&self, topic: &str, today: NaiveDate) -> Result<Vec<DueItem<Flashcard>>> {
        let progress = self.require(topic)?;
        Ok(select_due(
            ItemKind::Flashcard,
            &progress.module.flashcards,
            &progress.items,
            today,
        ))
    }

    /// Quiz questions due on the given day, in module order.
    pub fn due_quiz(&self, topic: &str, today: NaiveDate) -> Result<Vec<DueItem<QuizQuestion>>> {
        let progress = self.require(topic)?;
        Ok(select_due(
            ItemKind::Quiz,
            &progress.module.quiz,
            &progress.items,
            today,
        ))
    }

    /// Sizes of both due sets.
    pub fn review_counts(&self, topic: &str, today: NaiveDate) -> Result<ReviewCounts> {
        let progress = self.require(topic)?;
        let module = &progress.module;
        Ok(ReviewCounts {
            flashcards: count_due(ItemKind::Flashcard, module.flashcards.len(), &progress.items, today),
            quiz: count_due(ItemKind::Quiz, module.quiz.len(), &progress.items, today),
        })
    }

    /// Topic selected in the current session. Never persisted.
    pub fn current_topic(&self) -> Option<&str> {
        self.current_topic.as_deref()
    }

    pub fn set_current_topic(&mut self, topic: &str) -> Result<()> {
        self.require(topic)?;
        self.current_topic = Some(topic.to_string());
        Ok(())
    }

    pub fn clear_current_topic(&mut self) {
        self.current_topic = None;
    }

    pub fn scheduler(&self) -> &R {
        &self.scheduler
    }

    /// Give back the underlying blob store.
    pub fn into_blob_store(self) -> B {
        self.blob
    }

    fn require(&self, topic: &str) -> Result<&TopicProgress> {
        self.topics
            .get(topic)
            .ok_or_else(|| ProgressError::TopicNotFound(topic.to_string()))
    }

    /// Apply a change to one topic and persist it, restoring the previous
    /// value if the write fails.
    fn mutate(&mut self, topic: &str, apply: impl FnOnce(&mut TopicProgress)) -> Result<()> {
        let progress = self
            .topics
            .get_mut(topic)
            .ok_or_else(|| ProgressError::TopicNotFound(topic.to_string()))?;
        let snapshot = progress.clone();
        apply(progress);

        if let Err(err) = self.persist() {
            self.topics.insert(topic.to_string(), snapshot);
            return Err(err);
        }
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        let raw = serde_json::to_string(&self.topics)
            .map_err(|err| StorageError(format!("failed to serialize progress: {err}")))?;
        self.blob.set(PROGRESS_KEY, &raw)?;
        debug!(bytes = raw.len(), "persisted progress");
        Ok(())
    }
}

fn parse_progress(raw: &str) -> Result<ProgressMap> {
    if raw.trim().is_empty() {
        return Ok(ProgressMap::new());
    }
    serde_json::from_str(raw).map_err(|err| ProgressError::CorruptState(err.to_string()))
}
