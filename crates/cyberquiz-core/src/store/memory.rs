//! In-memory store for testing the session without touching disk.

use std::cell::{Cell, RefCell};

use anyhow::Result;

use super::{fallback, Store};
use crate::model::{AdminConfig, QuizData, User};

/// Process-local store. Documents start absent, so loads return the same
/// first-run defaults as [`super::JsonStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RefCell<Option<Vec<User>>>,
    questions: RefCell<Option<QuizData>>,
    admin: RefCell<Option<AdminConfig>>,
    writes: Cell<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given question bank already stored.
    pub fn with_questions(data: QuizData) -> Self {
        let store = Self::default();
        *store.questions.borrow_mut() = Some(data);
        store
    }

    /// Number of save operations performed.
    pub fn writes(&self) -> u32 {
        self.writes.get()
    }

    fn bump(&self) {
        self.writes.set(self.writes.get() + 1);
    }
}

impl Store for MemoryStore {
    fn load_users(&self) -> Vec<User> {
        self.users.borrow().clone().unwrap_or_else(fallback::users)
    }

    fn save_users(&self, users: &[User]) -> Result<()> {
        *self.users.borrow_mut() = Some(users.to_vec());
        self.bump();
        Ok(())
    }

    fn load_questions(&self) -> QuizData {
        self.questions
            .borrow()
            .clone()
            .unwrap_or_else(fallback::questions_absent)
    }

    fn save_questions(&self, data: &QuizData) -> Result<()> {
        *self.questions.borrow_mut() = Some(data.clone());
        self.bump();
        Ok(())
    }

    fn load_admin_config(&self) -> AdminConfig {
        self.admin.borrow().clone().unwrap_or_else(fallback::admin)
    }

    fn save_admin_config(&self, config: &AdminConfig) -> Result<()> {
        *self.admin.borrow_mut() = Some(config.clone());
        self.bump();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_first_run_defaults() {
        let store = MemoryStore::new();
        assert!(store.load_users().is_empty());
        assert_eq!(store.load_questions().questions.len(), 10);
        assert_eq!(store.load_admin_config().password, "admin123");
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn saves_replace_documents() {
        let store = MemoryStore::with_questions(QuizData::default());
        assert!(store.load_questions().questions.is_empty());

        store
            .save_admin_config(&AdminConfig { password: "new".into() })
            .unwrap();
        assert_eq!(store.load_admin_config().password, "new");
        assert_eq!(store.writes(), 1);
    }
}
