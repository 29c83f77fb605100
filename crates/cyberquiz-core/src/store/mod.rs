//! Document store for the three persisted collections.
//!
//! Every operation is a whole-document read or replace. Loads never fail:
//! an absent or malformed document is replaced by a fixed fallback value
//! (see [`fallback`]). Loads are best-effort and this is a known weak
//! point: a corrupted `users.json` reads as "no users" and the next save
//! overwrites it.

mod json;
mod memory;

pub use json::JsonStore;
pub use memory::MemoryStore;

use anyhow::Result;
use serde::de::DeserializeOwned;

use crate::model::{AdminConfig, QuizData, User};

pub const USERS_FILE: &str = "users.json";
pub const QUESTIONS_FILE: &str = "questions.json";
pub const ADMIN_FILE: &str = "admin.json";

/// Persistence for users, questions and the admin configuration.
pub trait Store {
    /// All users in storage order; empty if absent or unreadable.
    fn load_users(&self) -> Vec<User>;

    /// Replace the stored user list.
    fn save_users(&self, users: &[User]) -> Result<()>;

    /// The question bank; the seeded default set if absent.
    fn load_questions(&self) -> QuizData;

    /// Replace the stored question bank.
    fn save_questions(&self, data: &QuizData) -> Result<()>;

    /// The admin configuration; the default password if absent or malformed.
    fn load_admin_config(&self) -> AdminConfig;

    /// Replace the stored admin configuration.
    fn save_admin_config(&self, config: &AdminConfig) -> Result<()>;
}

/// Values substituted when a document cannot be used.
pub mod fallback {
    use crate::model::{AdminConfig, QuizData, User};
    use crate::seed;

    pub fn users() -> Vec<User> {
        Vec::new()
    }

    /// First run: no `questions.json` yet.
    pub fn questions_absent() -> QuizData {
        seed::default_quiz_data()
    }

    /// `questions.json` exists but does not parse. Not reseeded.
    pub fn questions_malformed() -> QuizData {
        QuizData::default()
    }

    /// Absent or malformed `admin.json`: the default password, never empty.
    pub fn admin() -> AdminConfig {
        seed::default_admin_config()
    }
}

/// Raw state of a document before decoding.
#[derive(Debug)]
pub(crate) enum RawDocument {
    Absent,
    Unreadable(String),
    Present(String),
}

/// Decode a document, taking the matching fallback branch on failure.
pub(crate) fn decode_or<T: DeserializeOwned>(
    name: &str,
    raw: RawDocument,
    absent: impl FnOnce() -> T,
    malformed: impl FnOnce() -> T,
) -> T {
    match raw {
        RawDocument::Absent => {
            tracing::debug!(document = name, "document absent, using defaults");
            absent()
        }
        RawDocument::Unreadable(reason) => {
            tracing::debug!(document = name, %reason, "document unreadable, using defaults");
            malformed()
        }
        RawDocument::Present(content) => match serde_json::from_str::<T>(&content) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!(document = name, error = %e, "document malformed, using defaults");
                malformed()
            }
        },
    }
}

/// Decode the user list. A literal `null` counts as an empty list.
pub(crate) fn decode_users(raw: RawDocument) -> Vec<User> {
    let users: Option<Vec<User>> = decode_or(USERS_FILE, raw, || None, || None);
    users.unwrap_or_else(fallback::users)
}

pub(crate) fn decode_questions(raw: RawDocument) -> QuizData {
    decode_or(
        QUESTIONS_FILE,
        raw,
        fallback::questions_absent,
        fallback::questions_malformed,
    )
}

pub(crate) fn decode_admin(raw: RawDocument) -> AdminConfig {
    decode_or(ADMIN_FILE, raw, fallback::admin, fallback::admin)
}
