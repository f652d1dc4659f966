//! Core types for the microlearning tracker.

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A single term/definition pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub term: String,
    pub definition: String,
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl QuizQuestion {
    /// Number of options every quiz question must offer.
    pub const OPTION_COUNT: usize = 4;

    /// Whether the chosen option text is the correct answer.
    pub fn is_correct(&self, choice: &str) -> bool {
        choice.trim() == self.answer.trim()
    }

    /// Position of the correct answer among the options.
    pub fn answer_index(&self) -> Option<usize> {
        self.options.iter().position(|option| self.is_correct(option))
    }
}

/// Generated learning content for one topic.
///
/// Treated as immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub topic: String,
    pub summary: String,
    pub flashcards: Vec<Flashcard>,
    pub quiz: Vec<QuizQuestion>,
}

impl Module {
    /// Number of reviewable items of the given kind.
    pub fn item_count(&self, kind: ItemKind) -> usize {
        match kind {
            ItemKind::Flashcard => self.flashcards.len(),
            ItemKind::Quiz => self.quiz.len(),
        }
    }

    /// Whether the id points at an item in this module.
    pub fn contains(&self, id: ItemId) -> bool {
        id.index < self.item_count(id.kind)
    }
}

/// Pool a review item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemKind {
    Flashcard,
    Quiz,
}

impl ItemKind {
    fn prefix(self) -> &'static str {
        match self {
            Self::Flashcard => "f",
            Self::Quiz => "q",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "f" => Some(Self::Flashcard),
            "q" => Some(Self::Quiz),
            _ => None,
        }
    }
}

/// Identity of a review item inside a topic.
///
/// Persisted as `f_<index>` / `q_<index>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId {
    pub kind: ItemKind,
    pub index: usize,
}

impl ItemId {
    pub fn new(kind: ItemKind, index: usize) -> Self {
        Self { kind, index }
    }

    pub fn flashcard(index: usize) -> Self {
        Self::new(ItemKind::Flashcard, index)
    }

    pub fn quiz(index: usize) -> Self {
        Self::new(ItemKind::Quiz, index)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.kind.prefix(), self.index)
    }
}

/// Failure to read an item id from its persisted form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid item id: {0:?}")]
pub struct ItemIdParseError(pub String);

impl FromStr for ItemId {
    type Err = ItemIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ItemIdParseError(s.to_string());
        let (prefix, index) = s.split_once('_').ok_or_else(invalid)?;
        let kind = ItemKind::from_prefix(prefix).ok_or_else(invalid)?;
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let index = index.parse().map_err(|_| invalid())?;
        Ok(Self { kind, index })
    }
}

impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Review state of an item that has been answered at least once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewItem {
    pub level: u32,
    #[serde(rename = "nextReviewDate")]
    pub next_review_date: NaiveDate,
}

/// One completed quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub score: f64,
    pub date: NaiveDate,
}

/// Quiz history for a topic, in the order sessions completed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    #[serde(rename = "quizHistory", default)]
    pub quiz_history: Vec<QuizAttempt>,
}

/// Everything tracked for a single topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicProgress {
    pub module: Module,
    #[serde(default)]
    pub items: BTreeMap<ItemId, ReviewItem>,
    #[serde(default)]
    pub performance: Performance,
}

impl TopicProgress {
    pub fn new(module: Module) -> Self {
        Self {
            module,
            items: BTreeMap::new(),
            performance: Performance::default(),
        }
    }

    /// Review state for an item, `None` if it was never answered.
    pub fn review_item(&self, id: ItemId) -> Option<&ReviewItem> {
        self.items.get(&id)
    }

    /// Most recent quiz attempt.
    pub fn last_quiz(&self) -> Option<&QuizAttempt> {
        self.performance.quiz_history.last()
    }
}

/// Sizes of the due sets for a topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCounts {
    pub flashcards: usize,
    pub quiz: usize,
}
