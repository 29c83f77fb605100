//! JSON file store: one pretty-printed document per collection.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use super::{
    decode_admin, decode_questions, decode_users, fallback, RawDocument, Store, ADMIN_FILE,
    QUESTIONS_FILE, USERS_FILE,
};
use crate::model::{AdminConfig, QuizData, User};

/// Store backed by `users.json`, `questions.json` and `admin.json` in a
/// single directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Open a store rooted at `dir`, creating the directory and writing the
    /// default admin config and question bank if they are missing.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create data directory: {}", dir.display()))?;

        let store = Self { dir };

        if !store.admin_path().exists() {
            store.save_admin_config(&fallback::admin())?;
        }
        if !store.questions_path().exists() {
            store.save_questions(&fallback::questions_absent())?;
        }

        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn users_path(&self) -> PathBuf {
        self.dir.join(USERS_FILE)
    }

    pub fn questions_path(&self) -> PathBuf {
        self.dir.join(QUESTIONS_FILE)
    }

    pub fn admin_path(&self) -> PathBuf {
        self.dir.join(ADMIN_FILE)
    }

    fn read(path: &Path) -> RawDocument {
        match std::fs::read_to_string(path) {
            Ok(content) => RawDocument::Present(content),
            Err(e) if e.kind() == ErrorKind::NotFound => RawDocument::Absent,
            Err(e) => RawDocument::Unreadable(e.to_string()),
        }
    }

    fn write<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)
            .with_context(|| format!("failed to serialize {}", path.display()))?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

impl Store for JsonStore {
    fn load_users(&self) -> Vec<User> {
        decode_users(Self::read(&self.users_path()))
    }

    fn save_users(&self, users: &[User]) -> Result<()> {
        Self::write(&self.users_path(), users)
    }

    fn load_questions(&self) -> QuizData {
        decode_questions(Self::read(&self.questions_path()))
    }

    fn save_questions(&self, data: &QuizData) -> Result<()> {
        Self::write(&self.questions_path(), data)
    }

    fn load_admin_config(&self) -> AdminConfig {
        decode_admin(Self::read(&self.admin_path()))
    }

    fn save_admin_config(&self, config: &AdminConfig) -> Result<()> {
        Self::write(&self.admin_path(), config)
    }
}
