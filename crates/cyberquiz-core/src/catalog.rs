//! Derived views over the question bank.
//!
//! Categories and modules are not stored anywhere; they exist while at least
//! one question names them. Every view here rescans the full question list.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{ModuleKey, Question};

/// category -> modules with at least one question.
pub fn available_modules(questions: &[Question]) -> BTreeMap<String, BTreeSet<String>> {
    let mut modules: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for q in questions {
        modules
            .entry(q.category.clone())
            .or_default()
            .insert(q.module.clone());
    }
    modules
}

/// Questions of one module, in bank order.
pub fn questions_in(questions: &[Question], category: &str, module: &str) -> Vec<Question> {
    questions
        .iter()
        .filter(|q| q.belongs_to(category, module))
        .cloned()
        .collect()
}

pub fn count_in(questions: &[Question], category: &str, module: &str) -> usize {
    questions
        .iter()
        .filter(|q| q.belongs_to(category, module))
        .count()
}

/// A module offered in a numbered menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleChoice {
    /// 1-based menu number.
    pub number: usize,
    pub key: ModuleKey,
    pub question_count: usize,
}

/// Flatten [`available_modules`] into a numbered list, category by category.
pub fn module_choices(questions: &[Question]) -> Vec<ModuleChoice> {
    available_modules(questions)
        .into_iter()
        .flat_map(|(category, modules)| {
            modules
                .into_iter()
                .map(move |module| ModuleKey::new(category.clone(), module))
        })
        .enumerate()
        .map(|(i, key)| ModuleChoice {
            number: i + 1,
            question_count: count_in(questions, &key.category, &key.module),
            key,
        })
        .collect()
}
