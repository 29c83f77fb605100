//! Core data model types for cyber-quiz.
//!
//! These mirror the three persisted documents: the user list, the question
//! bank and the admin configuration.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Number of options every question offers.
pub const OPTION_COUNT: usize = 4;

/// Scores keyed by category, then module.
pub type ScoreBook = BTreeMap<String, BTreeMap<String, Score>>;

/// A quiz taker and their latest result per module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier derived from the display name (e.g. "alice1").
    pub id: String,
    /// Display name as typed at registration.
    pub name: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
    /// category -> module -> score.
    #[serde(default, deserialize_with = "null_as_default")]
    pub scores: ScoreBook,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            created_at,
            scores: ScoreBook::new(),
        }
    }

    /// Latest score for a module, if the user has taken it.
    pub fn score_for(&self, category: &str, module: &str) -> Option<&Score> {
        self.scores.get(category).and_then(|m| m.get(module))
    }

    /// Overwrite the score for a module.
    pub fn set_score(&mut self, category: &str, module: &str, score: Score) {
        self.scores
            .entry(category.to_string())
            .or_default()
            .insert(module.to_string(), score);
    }
}

/// Outcome of one attempt at a module.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
    pub last_taken: DateTime<Utc>,
}

impl Score {
    /// Percentage of correct answers, `0.0` for an empty attempt.
    pub fn percentage(&self) -> f64 {
        percentage(self.correct, self.total)
    }
}

/// `correct / total * 100`, guarded against a zero total.
pub fn percentage(correct: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(correct) / f64::from(total) * 100.0
}

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub question: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub answer: usize,
    pub category: String,
    pub module: String,
}

impl Question {
    /// Whether this question belongs to the given category/module pair.
    pub fn belongs_to(&self, category: &str, module: &str) -> bool {
        self.category == category && self.module == module
    }

    /// Text of the correct option, if the stored index is valid.
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.answer).map(String::as_str)
    }

    pub fn module_key(&self) -> ModuleKey {
        ModuleKey::new(&self.category, &self.module)
    }
}

/// The question bank document (`questions.json`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub questions: Vec<Question>,
}

/// The admin configuration document (`admin.json`).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
    pub password: String,
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("password", &"***")
            .finish()
    }
}

/// A (category, module) pair. Exists only while some question references it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleKey {
    pub category: String,
    pub module: String,
}

impl ModuleKey {
    pub fn new(category: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            module: module.into(),
        }
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.category, self.module)
    }
}

/// Accept an explicit JSON `null` where a collection is expected.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn user_scores_accept_null_and_missing() {
        let with_null = r#"{"id":"bob1","name":"Bob","created_at":"2024-05-01T10:00:00+02:00","scores":null}"#;
        let user: User = serde_json::from_str(with_null).unwrap();
        assert!(user.scores.is_empty());
        assert_eq!(user.created_at, Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap());

        let missing = r#"{"id":"bob1","name":"Bob","created_at":"2024-05-01T10:00:00Z"}"#;
        let user: User = serde_json::from_str(missing).unwrap();
        assert!(user.scores.is_empty());
    }

    #[test]
    fn set_score_overwrites() {
        let mut user = User::new("amy1", "Amy", at(0));
        user.set_score("Cisco", "CCNA", Score { correct: 1, total: 5, last_taken: at(10) });
        user.set_score("Cisco", "CCNA", Score { correct: 4, total: 5, last_taken: at(20) });
        assert_eq!(user.scores.len(), 1);
        assert_eq!(user.scores["Cisco"].len(), 1);
        let score = user.score_for("Cisco", "CCNA").unwrap();
        assert_eq!((score.correct, score.total), (4, 5));
    }

    #[test]
    fn percentage_guards_zero_total() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(3, 4), 75.0);
        assert_eq!(percentage(5, 5), 100.0);
    }

    #[test]
    fn correct_option_tolerates_bad_index() {
        let q = Question {
            id: "x".into(),
            question: "?".into(),
            options: vec!["a".into(), "b".into()],
            answer: 7,
            category: "C".into(),
            module: "M".into(),
        };
        assert!(q.correct_option().is_none());
    }

    #[test]
    fn admin_debug_masks_password() {
        let cfg = AdminConfig { password: "hunter2".into() };
        assert!(!format!("{cfg:?}").contains("hunter2"));
    }
}
