//! Review sessions over a topic's due items.
//!
//! A session snapshots the due set when it starts and walks it in order.
//! Each answer is applied to the store immediately. A quiz session records
//! its score once, when the last due question is answered.

use crate::algorithm::ReviewScheduler;
use crate::error::{ProgressError, Result};
use crate::selector::DueItem;
use crate::storage::BlobStore;
use crate::store::ProgressStore;
use crate::types::{Flashcard, ItemKind, QuizAttempt, QuizQuestion};
use chrono::NaiveDate;
use serde::Serialize;

/// Fraction of correct answers, `None` for an empty session.
pub fn session_score(correct: usize, total: usize) -> Option<f64> {
    (total > 0).then(|| correct as f64 / total as f64)
}

/// Totals for a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionSummary {
    pub correct: usize,
    pub total: usize,
    pub score: f64,
    /// Quiz attempt written to the history; `None` for flashcard sessions.
    pub recorded: Option<QuizAttempt>,
}

/// What happened after an answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionStep {
    Continue { remaining: usize },
    Completed(SessionSummary),
}

/// A pass over the items that were due when the session started.
#[derive(Debug, Clone)]
pub struct ReviewSession<T> {
    topic: String,
    kind: ItemKind,
    queue: Vec<DueItem<T>>,
    position: usize,
    correct: usize,
    /// Last answer applied but the quiz score not yet written.
    unrecorded: bool,
}

impl ReviewSession<Flashcard> {
    /// Start a flashcard review, or `None` when nothing is due.
    pub fn flashcards<B: BlobStore, R: ReviewScheduler>(
        store: &ProgressStore<B, R>,
        topic: &str,
        today: NaiveDate,
    ) -> Result<Option<Self>> {
        let due = store.due_flashcards(topic, today)?;
        Ok(Self::start(topic, ItemKind::Flashcard, due))
    }
}

impl ReviewSession<QuizQuestion> {
    /// Start a quiz over the due questions, or `None` when nothing is due.
    pub fn quiz<B: BlobStore, R: ReviewScheduler>(
        store: &ProgressStore<B, R>,
        topic: &str,
        today: NaiveDate,
    ) -> Result<Option<Self>> {
        let due = store.due_quiz(topic, today)?;
        Ok(Self::start(topic, ItemKind::Quiz, due))
    }
}

impl<T> ReviewSession<T> {
    fn start(topic: &str, kind: ItemKind, queue: Vec<DueItem<T>>) -> Option<Self> {
        if queue.is_empty() {
            return None;
        }
        Some(Self {
            topic: topic.to_string(),
            kind,
            queue,
            position: 0,
            correct: 0,
            unrecorded: false,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Item awaiting an answer.
    pub fn current(&self) -> Option<&DueItem<T>> {
        self.queue.get(self.position)
    }

    /// Zero-based position of the current item.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.queue.len()
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    /// Apply an answer for the current item and move on.
    ///
    /// The session only completes once the quiz score is written. If that
    /// write fails the last item stays current, and the next call retries the
    /// score alone; its `is_correct` is ignored.
    pub fn answer<B: BlobStore, R: ReviewScheduler>(
        &mut self,
        store: &mut ProgressStore<B, R>,
        is_correct: bool,
        today: NaiveDate,
    ) -> Result<SessionStep> {
        if !self.unrecorded {
            let item = self.current().ok_or(ProgressError::SessionFinished)?.id;
            store.update_item_progress(&self.topic, item, is_correct, today)?;
            if is_correct {
                self.correct += 1;
            }

            if self.position + 1 < self.queue.len() {
                self.position += 1;
                return Ok(SessionStep::Continue {
                    remaining: self.queue.len() - self.position,
                });
            }
            self.unrecorded = true;
        }

        let total = self.queue.len();
        let score = session_score(self.correct, total).unwrap_or_default();
        let recorded = match self.kind {
            ItemKind::Quiz => Some(store.record_quiz_performance(&self.topic, score, today)?),
            ItemKind::Flashcard => None,
        };
        self.unrecorded = false;
        self.position = total;

        Ok(SessionStep::Completed(SessionSummary {
            correct: self.correct,
            total,
            score,
            recorded,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::IntervalLadder;
    use crate::error::StorageError;
    use crate::storage::MemoryBlobStore;
    use crate::types::{ItemId, Module};
    use chrono::Days;
    use std::cell::Cell;
    use std::rc::Rc;

    fn day(n: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap() + Days::new(n)
    }

    fn question(n: usize) -> QuizQuestion {
        QuizQuestion {
            question: format!("Question {n}?"),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            answer: "a".to_string(),
        }
    }

    /// Blob store that accepts a limited number of writes.
    struct LimitedBlobStore {
        inner: MemoryBlobStore,
        writes_left: Rc<Cell<usize>>,
    }

    impl BlobStore for LimitedBlobStore {
        fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
            match self.writes_left.get() {
                0 => Err(StorageError("disk full".to_string())),
                n => {
                    self.writes_left.set(n - 1);
                    self.inner.set(key, value)
                }
            }
        }
    }

    fn store_with_quiz(questions: usize) -> ProgressStore<MemoryBlobStore> {
        store_with_quiz_in(MemoryBlobStore::new(), questions)
    }

    fn store_with_quiz_in<B: BlobStore>(blob: B, questions: usize) -> ProgressStore<B> {
        let mut store = ProgressStore::load(blob, IntervalLadder::default()).unwrap();
        let module = Module {
            topic: "T".to_string(),
            summary: String::new(),
            flashcards: vec![Flashcard {
                term: "term".to_string(),
                definition: "definition".to_string(),
            }],
            quiz: (0..questions).map(question).collect(),
        };
        store.initialize_topic_progress("T", module).unwrap();
        store
    }

    #[test]
    fn score_is_fraction_of_correct() {
        assert_eq!(session_score(3, 4), Some(0.75));
        assert_eq!(session_score(0, 2), Some(0.0));
        assert_eq!(session_score(0, 0), None);
    }

    #[test]
    fn quiz_records_score_once_on_completion() {
        let mut store = store_with_quiz(4);
        let mut session = ReviewSession::quiz(&store, "T", day(0)).unwrap().unwrap();
        assert_eq!(session.len(), 4);

        let answers = [true, true, false, true];
        let mut last = None;
        for (n, correct) in answers.into_iter().enumerate() {
            let step = session.answer(&mut store, correct, day(0)).unwrap();
            if n < 3 {
                assert_eq!(step, SessionStep::Continue { remaining: 3 - n });
                assert!(store.topic_progress("T").unwrap().last_quiz().is_none());
            }
            last = Some(step);
        }

        let Some(SessionStep::Completed(summary)) = last else {
            panic!("session should be complete");
        };
        assert_eq!(summary.correct, 3);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.score, 0.75);

        let history = &store.topic_progress("T").unwrap().performance.quiz_history;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].score, 0.75);
        assert_eq!(summary.recorded, Some(history[0]));
    }

    #[test]
    fn answers_are_applied_as_they_come() {
        let mut store = store_with_quiz(2);
        let mut session = ReviewSession::quiz(&store, "T", day(0)).unwrap().unwrap();
        session.answer(&mut store, false, day(0)).unwrap();

        let item = store.topic_progress("T").unwrap().review_item(ItemId::quiz(0)).copied();
        assert_eq!(item.map(|item| (item.level, item.next_review_date)), Some((0, day(1))));
        assert!(store.topic_progress("T").unwrap().last_quiz().is_none());
    }

    #[test]
    fn flashcard_session_records_no_score() {
        let mut store = store_with_quiz(1);
        let mut session = ReviewSession::flashcards(&store, "T", day(0)).unwrap().unwrap();
        let step = session.answer(&mut store, true, day(0)).unwrap();

        assert!(matches!(
            step,
            SessionStep::Completed(SessionSummary { recorded: None, correct: 1, .. })
        ));
        assert!(store.topic_progress("T").unwrap().last_quiz().is_none());
    }

    #[test]
    fn nothing_due_starts_no_session() {
        let mut store = store_with_quiz(1);
        store.update_item_progress("T", ItemId::flashcard(0), true, day(0)).unwrap();

        assert!(ReviewSession::flashcards(&store, "T", day(0)).unwrap().is_none());
        assert!(ReviewSession::flashcards(&store, "T", day(1)).unwrap().is_some());
    }

    #[test]
    fn finished_session_rejects_more_answers() {
        let mut store = store_with_quiz(1);
        let mut session = ReviewSession::quiz(&store, "T", day(0)).unwrap().unwrap();
        session.answer(&mut store, true, day(0)).unwrap();

        assert!(session.is_complete());
        assert!(matches!(
            session.answer(&mut store, true, day(0)),
            Err(ProgressError::SessionFinished)
        ));
        assert_eq!(store.topic_progress("T").unwrap().performance.quiz_history.len(), 1);
    }

    #[test]
    fn session_keeps_snapshot_of_due_set() {
        let mut store = store_with_quiz(3);
        let mut session = ReviewSession::quiz(&store, "T", day(0)).unwrap().unwrap();
        let ids: Vec<_> = (0..3)
            .map(|_| {
                let id = session.current().unwrap().id;
                session.answer(&mut store, true, day(0)).unwrap();
                id
            })
            .collect();
        assert_eq!(ids, vec![ItemId::quiz(0), ItemId::quiz(1), ItemId::quiz(2)]);
    }

    #[test]
    fn failed_score_write_can_be_retried() {
        let writes_left = Rc::new(Cell::new(usize::MAX));
        let blob = LimitedBlobStore {
            inner: MemoryBlobStore::new(),
            writes_left: Rc::clone(&writes_left),
        };
        let mut store = store_with_quiz_in(blob, 1);
        let mut session = ReviewSession::quiz(&store, "T", day(0)).unwrap().unwrap();

        // The answer is saved, the score write is not.
        writes_left.set(1);
        assert!(matches!(
            session.answer(&mut store, true, day(0)),
            Err(ProgressError::Storage(_))
        ));
        assert!(!session.is_complete());
        let progress = store.topic_progress("T").unwrap();
        assert_eq!(progress.review_item(ItemId::quiz(0)).unwrap().level, 1);
        assert!(progress.last_quiz().is_none());

        writes_left.set(usize::MAX);
        let step = session.answer(&mut store, false, day(0)).unwrap();
        let SessionStep::Completed(summary) = step else {
            panic!("session should be complete");
        };
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.score, 1.0);
        assert!(session.is_complete());

        let progress = store.topic_progress("T").unwrap();
        assert_eq!(progress.performance.quiz_history.len(), 1);
        assert_eq!(progress.review_item(ItemId::quiz(0)).unwrap().level, 1);
        assert!(matches!(
            session.answer(&mut store, true, day(0)),
            Err(ProgressError::SessionFinished)
        ));
    }
}
