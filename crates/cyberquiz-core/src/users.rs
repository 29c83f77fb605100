//! User registry: id generation, registration, score recording, deletion.
//!
//! Writes follow "reload then replace": the user list is read fresh from the
//! store, changed in memory and written back whole.

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::error::QuizError;
use crate::model::{Score, User};
use crate::store::Store;

/// Lower-cased name with spaces removed.
pub fn id_base(name: &str) -> String {
    name.replace(' ', "").to_lowercase()
}

/// Derive a fresh id for `name`: the base followed by one more than the
/// highest numeric suffix any existing id already carries for that base.
///
/// Suffixes freed by deleting a user are only reused once every higher
/// suffix is gone too.
pub fn generate_user_id(name: &str, existing: &[User]) -> String {
    let base = id_base(name);
    let highest = existing
        .iter()
        .filter_map(|u| u.id.strip_prefix(base.as_str()))
        .filter(|suffix| !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()))
        .map(|suffix| suffix.trim_start_matches('0'))
        .max_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
        .unwrap_or("");
    format!("{base}{}", increment_decimal(highest))
}

/// Add one to a decimal digit string of any length.
fn increment_decimal(digits: &str) -> String {
    let mut out: Vec<char> = digits.chars().collect();
    for d in out.iter_mut().rev() {
        if *d == '9' {
            *d = '0';
        } else {
            *d = char::from(*d as u8 + 1);
            return out.into_iter().collect();
        }
    }
    out.insert(0, '1');
    out.into_iter().collect()
}

/// Create and persist a new user.
pub fn register_user(store: &dyn Store, name: &str, now: DateTime<Utc>) -> Result<User> {
    let mut users = store.load_users();
    let user = User::new(generate_user_id(name, &users), name, now);
    users.push(user.clone());
    store.save_users(&users)?;
    tracing::info!(user_id = %user.id, "registered user");
    Ok(user)
}

/// Write `user` into the stored list, replacing the record with the same id
/// or appending it if none exists.
pub fn save_user(store: &dyn Store, user: &User) -> Result<()> {
    let mut users = store.load_users();
    match users.iter_mut().find(|u| u.id == user.id) {
        Some(slot) => *slot = user.clone(),
        None => users.push(user.clone()),
    }
    store.save_users(&users)
}

/// Overwrite the user's score for a module and persist the user list.
pub fn record_score(
    store: &dyn Store,
    user: &mut User,
    category: &str,
    module: &str,
    correct: u32,
    total: u32,
    now: DateTime<Utc>,
) -> Result<()> {
    user.set_score(
        category,
        module,
        Score {
            correct,
            total,
            last_taken: now,
        },
    );
    save_user(store, user)?;
    tracing::info!(user_id = %user.id, category, module, correct, total, "recorded score");
    Ok(())
}

/// Remove the user at a 0-based position of the stored list.
pub fn delete_user(store: &dyn Store, index: usize) -> Result<User> {
    let mut users = store.load_users();
    if index >= users.len() {
        return Err(QuizError::OutOfRange {
            index: index + 1,
            len: users.len(),
        }
        .into());
    }
    let removed = users.remove(index);
    store.save_users(&users)?;
    tracing::info!(user_id = %removed.id, "deleted user");
    Ok(removed)
}
