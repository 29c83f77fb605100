//! Admin operations: password gate and question bank curation.
//!
//! Each mutation builds the new document first, persists it, and only then
//! replaces the in-memory copy, so a failed validation or write leaves
//! everything as it was.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::error::QuizError;
use crate::model::{AdminConfig, ModuleKey, Question, QuizData, OPTION_COUNT};
use crate::quiz::parse_answer;
use crate::store::Store;

/// Token the operator must type to delete a user.
pub const DELETE_USER_TOKEN: &str = "DELETE";

/// Check an admin password attempt.
///
/// Plaintext, exact comparison against the single shared secret. No
/// trimming or case folding. Hashing would replace only this function.
pub fn verify_password(config: &AdminConfig, attempt: &str) -> bool {
    config.password == attempt
}

pub fn authenticate(config: &AdminConfig, attempt: &str) -> Result<(), QuizError> {
    if verify_password(config, attempt) {
        Ok(())
    } else {
        tracing::warn!("admin authentication denied");
        Err(QuizError::AccessDenied)
    }
}

/// `yes`, in any letter case.
pub fn confirms_module_removal(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("yes")
}

pub fn confirms_user_deletion(input: &str) -> bool {
    input == DELETE_USER_TOKEN
}

/// Operator input for a new question, not yet validated.
#[derive(Debug, Clone, Default)]
pub struct QuestionDraft {
    pub category: String,
    pub module: String,
    pub question: String,
    pub options: Vec<String>,
    /// Correct option as typed, 1-based.
    pub answer: String,
}

impl QuestionDraft {
    /// Validate into a question with the given id.
    pub fn into_question(self, id: String) -> Result<Question, QuizError> {
        if self.options.len() != OPTION_COUNT {
            return Err(QuizError::OptionCount {
                expected: OPTION_COUNT,
                actual: self.options.len(),
            });
        }
        let answer = parse_answer(&self.answer, self.options.len())
            .ok_or_else(|| QuizError::InvalidAnswer(self.answer.clone()))?;
        Ok(Question {
            id,
            question: self.question,
            options: self.options,
            answer,
            category: self.category,
            module: self.module,
        })
    }
}

/// `q<unix seconds>`, bumped forward until no existing question uses it.
pub fn next_question_id(existing: &[Question], now: DateTime<Utc>) -> String {
    let mut stamp = now.timestamp();
    loop {
        let id = format!("q{stamp}");
        if !existing.iter().any(|q| q.id == id) {
            return id;
        }
        stamp += 1;
    }
}

/// Validate a draft, append it to the bank and persist.
pub fn add_question(
    store: &dyn Store,
    data: &mut QuizData,
    draft: QuestionDraft,
    now: DateTime<Utc>,
) -> Result<Question> {
    let id = next_question_id(&data.questions, now);
    let question = draft.into_question(id)?;

    let mut updated = data.clone();
    updated.questions.push(question.clone());
    store.save_questions(&updated)?;
    *data = updated;

    tracing::info!(question_id = %question.id, module = %question.module_key(), "added question");
    Ok(question)
}

/// Remove the question at a 1-based position of the bank.
pub fn remove_question(store: &dyn Store, data: &mut QuizData, number: usize) -> Result<Question> {
    let len = data.questions.len();
    if number == 0 || number > len {
        return Err(QuizError::OutOfRange { index: number, len }.into());
    }

    let mut updated = data.clone();
    let removed = updated.questions.remove(number - 1);
    store.save_questions(&updated)?;
    *data = updated;

    tracing::info!(question_id = %removed.id, "removed question");
    Ok(removed)
}

/// Delete every question of a module. Returns how many were removed.
pub fn remove_module(store: &dyn Store, data: &mut QuizData, key: &ModuleKey) -> Result<usize> {
    let mut updated = data.clone();
    updated
        .questions
        .retain(|q| !q.belongs_to(&key.category, &key.module));
    let removed = data.questions.len() - updated.questions.len();

    store.save_questions(&updated)?;
    *data = updated;

    tracing::info!(module = %key, removed, "removed module");
    Ok(removed)
}

/// Rotate the admin password after checking the current one and the
/// confirmation.
pub fn change_password(
    store: &dyn Store,
    config: &mut AdminConfig,
    current: &str,
    new_password: &str,
    confirmation: &str,
) -> Result<()> {
    authenticate(config, current)?;
    if new_password != confirmation {
        return Err(QuizError::PasswordMismatch.into());
    }

    let updated = AdminConfig {
        password: new_password.to_string(),
    };
    store.save_admin_config(&updated)?;
    *config = updated;

    tracing::info!("admin password changed");
    Ok(())
}
