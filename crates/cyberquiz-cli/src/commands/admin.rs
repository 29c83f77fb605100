//! Admin console: password gate and content/user management screens.

use std::io::{BufRead, Write};

use anyhow::Result;
use comfy_table::{Cell, Table};

use cyberquiz_core::admin::{self, QuestionDraft};
use cyberquiz_core::catalog::{available_modules, module_choices, questions_in};
use cyberquiz_core::model::{ModuleKey, OPTION_COUNT};
use cyberquiz_core::users::delete_user;
use cyberquiz_core::QuizError;

use super::print_module_choices;
use crate::session::Controller;

/// Split a failed operation into a domain error to report, or a real
/// failure to propagate.
fn recoverable(err: anyhow::Error) -> Result<QuizError> {
    match err.downcast::<QuizError>() {
        Ok(e) if !e.is_fatal() => Ok(e),
        Ok(e) => Err(e.into()),
        Err(other) => Err(other),
    }
}

pub fn panel<R: BufRead, W: Write>(ctl: &mut Controller<'_, R, W>) -> Result<()> {
    ctl.console.header("Admin Authentication")?;
    let password = ctl.console.prompt("Enter admin password: ")?;
    if admin::authenticate(&ctl.admin, &password).is_err() {
        return ctl.console.fail("\nAccess Denied! Incorrect password.");
    }
    ctl.console.say("\nAccess Granted!")?;

    loop {
        ctl.console.header("Admin Panel")?;
        ctl.console.say("Administrator Mode Active")?;
        ctl.console.blank()?;
        ctl.console.say("1. Add New Question")?;
        ctl.console.say("2. Remove Question")?;
        ctl.console.say("3. Add New Module")?;
        ctl.console.say("4. Remove Module")?;
        ctl.console.say("5. Manage Users")?;
        ctl.console.say("6. List All Questions")?;
        ctl.console.say("7. Change Admin Password")?;
        ctl.console.say("8. Back to Main Menu")?;

        match ctl.console.prompt("\nEnter choice (1-8): ")?.as_str() {
            "1" => add_question(ctl, None)?,
            "2" => remove_question(ctl)?,
            "3" => add_module(ctl)?,
            "4" => remove_module(ctl)?,
            "5" => manage_users(ctl)?,
            "6" => list_questions(ctl)?,
            "7" => change_password(ctl)?,
            "8" => return Ok(()),
            _ => ctl.console.fail("Invalid choice.")?,
        }
    }
}

fn add_question<R: BufRead, W: Write>(
    ctl: &mut Controller<'_, R, W>,
    module: Option<ModuleKey>,
) -> Result<()> {
    ctl.console.header("Add New Question")?;

    let key = match module {
        Some(key) => {
            ctl.console.say(&format!("Module: {key}"))?;
            key
        }
        None => {
            let category = ctl.console.prompt("Enter Category (e.g., CompTIA, Cisco): ")?;
            let module = ctl.console.prompt("Enter Module (e.g., PenTest+, CCNA): ")?;
            ModuleKey::new(category, module)
        }
    };
    let question = ctl.console.prompt("\nEnter Question: ")?;
    let mut options = Vec::with_capacity(OPTION_COUNT);
    for i in 1..=OPTION_COUNT {
        options.push(ctl.console.prompt(&format!("Enter Option {i}: "))?);
    }
    let answer = ctl
        .console
        .prompt(&format!("\nEnter correct answer number (1-{OPTION_COUNT}): "))?;

    let draft = QuestionDraft {
        category: key.category,
        module: key.module,
        question,
        options,
        answer,
    };
    let now = ctl.now();
    match admin::add_question(ctl.store, &mut ctl.bank, draft, now) {
        Ok(_) => ctl.console.fail("\nQuestion added successfully!"),
        Err(e) => {
            recoverable(e)?;
            ctl.console.fail("Invalid answer number.")
        }
    }
}

fn remove_question<R: BufRead, W: Write>(ctl: &mut Controller<'_, R, W>) -> Result<()> {
    ctl.console.header("Remove Question")?;

    if ctl.bank.questions.is_empty() {
        return ctl.console.fail("No questions available to remove.");
    }

    let lines: Vec<String> = ctl
        .bank
        .questions
        .iter()
        .enumerate()
        .map(|(i, q)| format!("{}. [{}] {}", i + 1, q.module_key(), q.question))
        .collect();
    for line in &lines {
        ctl.console.say(line)?;
    }

    let prompt = format!(
        "\nEnter question number to remove (1-{}) or 0 to cancel: ",
        lines.len()
    );
    // Unparseable input counts as 0.
    let number = match ctl.console.prompt_number(&prompt)? {
        None | Some(0) => return Ok(()),
        Some(n) => n,
    };

    match admin::remove_question(ctl.store, &mut ctl.bank, number) {
        Ok(_) => ctl.console.fail("\nQuestion removed successfully!"),
        Err(e) => {
            recoverable(e)?;
            ctl.console.fail("Invalid choice.")
        }
    }
}

/// Modules have no record of their own; this only explains that and
/// optionally hands over to Add Question with the names filled in.
fn add_module<R: BufRead, W: Write>(ctl: &mut Controller<'_, R, W>) -> Result<()> {
    ctl.console.header("Add New Module")?;
    ctl.console.say(
        "To add a new module, simply add questions with the new category/module name.",
    )?;
    ctl.console
        .say("Modules are created automatically when you add questions.\n")?;

    let category = ctl.console.prompt("Enter new Category name: ")?;
    let module = ctl.console.prompt("Enter new Module name: ")?;
    let key = ModuleKey::new(category, module);

    ctl.console.say(&format!(
        "\nNew module '{key}' will be created when you add questions to it."
    ))?;
    let reply = ctl
        .console
        .prompt("Would you like to add a question now? (y/n): ")?;
    if reply.eq_ignore_ascii_case("y") {
        add_question(ctl, Some(key))
    } else {
        ctl.console.pause()
    }
}

fn remove_module<R: BufRead, W: Write>(ctl: &mut Controller<'_, R, W>) -> Result<()> {
    ctl.console.header("Remove Module")?;

    let choices = module_choices(&ctl.bank.questions);
    if choices.is_empty() {
        return ctl.console.fail("No modules available to remove.");
    }

    print_module_choices(&mut ctl.console, &choices)?;

    let prompt = format!(
        "\nEnter module number to remove (1-{}) or 0 to cancel: ",
        choices.len()
    );
    let picked = ctl.console.prompt_number(&prompt)?;
    if matches!(picked, None | Some(0)) {
        return Ok(());
    }

    let Some(choice) = choices.into_iter().find(|c| Some(c.number) == picked) else {
        return ctl.console.fail("Invalid choice.");
    };

    ctl.console.say(&format!(
        "\nWARNING: This will delete all questions in {}!",
        choice.key
    ))?;
    let reply = ctl.console.prompt("Are you sure? (yes/no): ")?;
    if admin::confirms_module_removal(&reply) {
        let removed = admin::remove_module(ctl.store, &mut ctl.bank, &choice.key)?;
        ctl.console.say(&format!(
            "\nModule removed successfully! ({removed} questions deleted)"
        ))?;
    } else {
        ctl.console.say("\nCancelled.")?;
    }
    ctl.console.pause()
}

fn manage_users<R: BufRead, W: Write>(ctl: &mut Controller<'_, R, W>) -> Result<()> {
    ctl.console.header("User Management")?;

    let users = ctl.store.load_users();
    if users.is_empty() {
        return ctl.console.fail("No users found.");
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Name", "ID", "Created"]);
    for (i, user) in users.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&user.name),
            Cell::new(&user.id),
            Cell::new(user.created_at.format("%Y-%m-%d")),
        ]);
    }
    ctl.console.say(&table.to_string())?;

    ctl.console.say("\n1. Delete User")?;
    ctl.console.say("2. Back")?;
    if ctl.console.prompt("\nEnter choice: ")? != "1" {
        return Ok(());
    }

    let selected = ctl
        .console
        .prompt_number("Enter user number to delete: ")?
        .filter(|n| (1..=users.len()).contains(n));
    let Some(number) = selected else {
        return ctl.console.fail("Invalid choice.");
    };

    ctl.console.say(&format!(
        "\nWARNING: Delete user {} ({})?",
        users[number - 1].name,
        users[number - 1].id
    ))?;
    let reply = ctl
        .console
        .prompt(&format!("Type '{}' to confirm: ", admin::DELETE_USER_TOKEN))?;
    if admin::confirms_user_deletion(&reply) {
        delete_user(ctl.store, number - 1)?;
        ctl.console.say("\nUser deleted successfully!")?;
    } else {
        ctl.console.say("\nCancelled.")?;
    }
    ctl.console.pause()
}

fn list_questions<R: BufRead, W: Write>(ctl: &mut Controller<'_, R, W>) -> Result<()> {
    ctl.console.header("All Questions")?;

    let mut lines = Vec::new();
    for (category, modules) in available_modules(&ctl.bank.questions) {
        lines.push(format!("\n{category}:"));
        for module in modules {
            let questions = questions_in(&ctl.bank.questions, &category, &module);
            lines.push(format!("\n  {module} ({} questions):", questions.len()));
            for (i, q) in questions.iter().enumerate() {
                lines.push(format!("    {}. {}", i + 1, q.question));
            }
        }
    }
    if lines.is_empty() {
        lines.push("No questions in the bank.".to_string());
    }
    for line in &lines {
        ctl.console.say(line)?;
    }

    ctl.console.pause()
}

fn change_password<R: BufRead, W: Write>(ctl: &mut Controller<'_, R, W>) -> Result<()> {
    ctl.console.header("Change Admin Password")?;

    let current = ctl.console.prompt("Enter current password: ")?;
    if !admin::verify_password(&ctl.admin, &current) {
        return ctl.console.fail("\nIncorrect password!");
    }
    let new_password = ctl.console.prompt("Enter new password: ")?;
    let confirmation = ctl.console.prompt("Confirm new password: ")?;

    match admin::change_password(
        ctl.store,
        &mut ctl.admin,
        &current,
        &new_password,
        &confirmation,
    ) {
        Ok(()) => ctl.console.fail("\nAdmin password changed successfully!"),
        Err(e) => {
            let reason = recoverable(e)?;
            ctl.console.fail(&format!("\n{}!", capitalize(&reason.to_string())))
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::drive;
    use cyberquiz_core::model::QuizData;
    use cyberquiz_core::store::{MemoryStore, Store};

    /// Register "Amy", open the admin panel with the default password, run
    /// `steps`, leave the panel and exit.
    fn admin_script<'a>(steps: &[&'a str]) -> Vec<&'a str> {
        let mut script = vec!["1", "Amy", "", "4", "admin123"];
        script.extend_from_slice(steps);
        script.extend_from_slice(&["8", "5"]);
        script
    }

    #[test]
    fn wrong_password_is_denied() {
        let store = MemoryStore::new();
        let script = ["1", "Amy", "", "4", "Admin123", "", "5"];
        let (result, out) = drive(&store, &script);
        result.unwrap();
        assert!(out.contains("Access Denied! Incorrect password."));
        assert!(!out.contains("Administrator Mode Active"));
    }

    #[test]
    fn add_question_persists() {
        let store = MemoryStore::with_questions(QuizData::default());
        let steps = [
            "1", "Linux", "LPIC-1", "Which command lists files?", "cd", "ls", "rm", "cp", "2",
            "",
        ];
        let (result, out) = drive(&store, &admin_script(&steps));
        result.unwrap();
        assert!(out.contains("Question added successfully!"));

        let questions = store.load_questions().questions;
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].answer, 1);
        assert_eq!(questions[0].module_key(), ModuleKey::new("Linux", "LPIC-1"));
        assert!(questions[0].id.starts_with('q'));
    }

    #[test]
    fn add_question_with_bad_answer_stores_nothing() {
        let store = MemoryStore::with_questions(QuizData::default());
        let steps = ["1", "Linux", "LPIC-1", "Q?", "a", "b", "c", "d", "5", ""];
        let (result, out) = drive(&store, &admin_script(&steps));
        result.unwrap();
        assert!(out.contains("Invalid answer number."));
        assert!(store.load_questions().questions.is_empty());
    }

    #[test]
    fn remove_question_by_number() {
        let store = MemoryStore::new();
        let (result, out) = drive(&store, &admin_script(&["2", "1", ""]));
        result.unwrap();
        assert!(out.contains("1. [CompTIA - PenTest+] What is the primary purpose"));
        assert!(out.contains("Question removed successfully!"));
        let questions = store.load_questions().questions;
        assert_eq!(questions.len(), 9);
        assert_eq!(questions[0].id, "pt2");
    }

    #[test]
    fn remove_question_zero_cancels() {
        let store = MemoryStore::new();
        let (result, _) = drive(&store, &admin_script(&["2", "0"]));
        result.unwrap();
        assert_eq!(store.load_questions().questions.len(), 10);
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn non_numeric_removal_input_cancels_quietly() {
        let store = MemoryStore::new();
        let (result, out) = drive(&store, &admin_script(&["2", "abc", "4", "xyz"]));
        result.unwrap();
        assert!(!out.contains("Invalid choice."));
        assert_eq!(store.load_questions().questions.len(), 10);
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn remove_module_requires_yes() {
        let store = MemoryStore::new();
        let (result, out) = drive(&store, &admin_script(&["4", "1", "no", ""]));
        result.unwrap();
        assert!(out.contains("Cancelled."));
        assert_eq!(store.load_questions().questions.len(), 10);

        let (result, out) = drive(&store, &admin_script(&["4", "1", "yes", ""]));
        result.unwrap();
        assert!(out.contains("Module removed successfully! (5 questions deleted)"));
        let questions = store.load_questions().questions;
        assert_eq!(questions.len(), 5);
        assert!(questions.iter().all(|q| q.category == "CompTIA"));
    }

    #[test]
    fn add_module_redirects_with_prefilled_names() {
        let store = MemoryStore::with_questions(QuizData::default());
        let steps = [
            "3", "AWS", "SAA", "y", "What is S3?", "Storage", "Compute", "DNS", "Queue", "1",
            "",
        ];
        let (result, out) = drive(&store, &admin_script(&steps));
        result.unwrap();
        assert!(out.contains("New module 'AWS - SAA' will be created"));
        let questions = store.load_questions().questions;
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].module_key(), ModuleKey::new("AWS", "SAA"));
    }

    #[test]
    fn add_module_without_question_changes_nothing() {
        let store = MemoryStore::new();
        let (result, _) = drive(&store, &admin_script(&["3", "AWS", "SAA", "n", ""]));
        result.unwrap();
        assert_eq!(store.load_questions().questions.len(), 10);
    }

    #[test]
    fn delete_user_needs_token() {
        let store = MemoryStore::new();
        drive(&store, &["1", "Bob", "", "5"]).0.unwrap();

        // Users: bob1, amy1. Wrong token first.
        let (result, out) = drive(&store, &admin_script(&["5", "1", "1", "delete", ""]));
        result.unwrap();
        assert!(out.contains("Cancelled."));
        assert_eq!(store.load_users().len(), 2);

        let (result, out) = drive(&store, &admin_script(&["5", "1", "1", "DELETE", ""]));
        result.unwrap();
        assert!(out.contains("User deleted successfully!"));
        let ids: Vec<_> = store.load_users().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec!["amy1", "amy2"]);
    }

    #[test]
    fn list_all_questions_groups_by_module() {
        let store = MemoryStore::new();
        let (result, out) = drive(&store, &admin_script(&["6", ""]));
        result.unwrap();
        assert!(out.contains("Cisco:\n\n  CCNA (5 questions):\n    1. What is the default"));
        assert!(out.contains("CompTIA:\n\n  PenTest+ (5 questions):"));
    }

    #[test]
    fn change_password_flow() {
        let store = MemoryStore::new();
        let steps = ["7", "admin123", "new-secret", "typo", ""];
        let (result, out) = drive(&store, &admin_script(&steps));
        result.unwrap();
        assert!(out.contains("Passwords don't match!"));
        assert_eq!(store.load_admin_config().password, "admin123");

        let steps = ["7", "admin123", "new-secret", "new-secret", ""];
        let (result, out) = drive(&store, &admin_script(&steps));
        result.unwrap();
        assert!(out.contains("Admin password changed successfully!"));
        assert_eq!(store.load_admin_config().password, "new-secret");
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("passwords don't match"), "Passwords don't match");
        assert_eq!(capitalize(""), "");
    }
}
