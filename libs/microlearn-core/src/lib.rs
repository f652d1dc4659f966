//! Core microlearning library.
//!
//! Provides:
//! - Progress store persisted to a key-value blob
//! - Interval-ladder spaced repetition scheduler
//! - Due-set selection for flashcards and quiz questions
//! - Review sessions and quiz scoring
//! - Parsing of generated modules
//! - Shared types (Module, ItemId, ReviewItem, TopicProgress, etc.)

pub mod algorithm;
pub mod error;
pub mod feedback;
pub mod module;
pub mod selector;
pub mod session;
pub mod storage;
pub mod store;
pub mod types;

pub use algorithm::{IntervalLadder, ReviewScheduler};
pub use error::{GenerationError, ProgressError, Result, StorageError};
pub use feedback::{PerformanceFeedback, Recommendation};
pub use module::parse_module;
pub use selector::{is_due, select_due, DueItem};
pub use session::{session_score, ReviewSession, SessionStep, SessionSummary};
pub use storage::{free_backup_key, BlobStore, MemoryBlobStore, CORRUPT_BACKUP_KEY, PROGRESS_KEY};
pub use store::ProgressStore;
pub use types::{
    Flashcard, ItemId, ItemKind, Module, Performance, QuizAttempt, QuizQuestion, ReviewCounts,
    ReviewItem, TopicProgress,
};
