use crate::CoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type CardId = String;

pub const EF_MIN: f64 = 1.3;
pub const EF_DEFAULT: f64 = 2.5;
pub const DEFAULT_CATEGORY: &str = "general";

/// Lowest quality that counts as a successful recall.
pub const CORRECT_THRESHOLD: u8 = 3;

/// Categories offered by the add flow. The set is open; any text is accepted.
pub const SUGGESTED_CATEGORIES: [&str; 6] = [
    "vocabulary",
    "phrase",
    "idiom",
    "phrasal verb",
    "collocation",
    "other",
];

/// Learner's recall rating, always within 0..=5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u8);

impl Quality {
    pub const MAX: u8 = 5;

    pub fn new(raw: i64) -> Result<Self, CoreError> {
        if (0..=Self::MAX as i64).contains(&raw) {
            Ok(Self(raw as u8))
        } else {
            Err(CoreError::QualityOutOfRange(raw))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_correct(self) -> bool {
        self.0 >= CORRECT_THRESHOLD
    }

    pub fn describe(self) -> &'static str {
        match self.0 {
            0 => "complete blackout",
            1 => "incorrect, remembered on seeing the answer",
            2 => "incorrect, but the answer felt familiar",
            3 => "correct with serious difficulty",
            4 => "correct after some hesitation",
            _ => "perfect recall",
        }
    }

    pub fn all() -> impl Iterator<Item = Quality> {
        (0..=Self::MAX).map(Quality)
    }
}

impl TryFrom<u8> for Quality {
    type Error = CoreError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw as i64)
    }
}

impl FromStr for Quality {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i64 = s
            .trim()
            .parse()
            .map_err(|_| CoreError::Invalid("quality must be a whole number"))?;
        Self::new(raw)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub front: String,
    pub back: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub example: Option<String>,
    pub created_at: DateTime<Utc>,

    pub ease_factor: f64,
    pub interval: u32,
    pub repetitions: u32,
    pub next_review: DateTime<Utc>,
    pub last_reviewed: Option<DateTime<Utc>>,
}

impl Card {
    pub fn new(
        id: impl Into<CardId>,
        front: impl Into<String>,
        back: impl Into<String>,
    ) -> Result<Self, CoreError> {
        Self::new_at(id, front, back, Utc::now())
    }

    /// Builds a card created at `now`. It is due immediately.
    pub fn new_at(
        id: impl Into<CardId>,
        front: impl Into<String>,
        back: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            id: id.into(),
            front: required(front.into(), "front must not be empty")?,
            back: required(back.into(), "back must not be empty")?,
            category: default_category(),
            example: None,
            created_at: now,
            ease_factor: EF_DEFAULT,
            interval: 1,
            repetitions: 0,
            next_review: now,
            last_reviewed: None,
        })
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        let category = category.trim();
        self.category = if category.is_empty() {
            default_category()
        } else {
            category.to_string()
        };
        self
    }

    pub fn with_example(mut self, example: Option<String>) -> Self {
        self.example = optional(example);
        self
    }

    pub fn is_new(&self) -> bool {
        self.repetitions == 0
    }

    pub fn is_mastered(&self) -> bool {
        self.repetitions >= 5 && self.interval >= 30
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now
    }
}

/// User-facing fields of a card that may be changed after creation.
///
/// Scheduling state, `id` and `created_at` are never touched by an edit.
#[derive(Clone, Debug, Default)]
pub struct CardEdit {
    pub front: Option<String>,
    pub back: Option<String>,
    pub category: Option<String>,
    /// `Some(None)` clears the example.
    pub example: Option<Option<String>>,
}

impl CardEdit {
    pub fn is_empty(&self) -> bool {
        self.front.is_none()
            && self.back.is_none()
            && self.category.is_none()
            && self.example.is_none()
    }

    /// Validates everything up front so a rejected edit leaves `card` as it was.
    pub fn apply(self, card: &mut Card) -> Result<(), CoreError> {
        let front = self
            .front
            .map(|f| required(f, "front must not be empty"))
            .transpose()?;
        let back = self
            .back
            .map(|b| required(b, "back must not be empty"))
            .transpose()?;

        if let Some(f) = front {
            card.front = f;
        }
        if let Some(b) = back {
            card.back = b;
        }
        if let Some(c) = self.category {
            let c = c.trim();
            card.category = if c.is_empty() { default_category() } else { c.to_string() };
        }
        if let Some(e) = self.example {
            card.example = optional(e);
        }
        Ok(())
    }
}

fn required(s: String, what: &'static str) -> Result<String, CoreError> {
    let t = s.trim();
    if t.is_empty() {
        Err(CoreError::Invalid(what))
    } else {
        Ok(t.to_string())
    }
}

fn optional(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
