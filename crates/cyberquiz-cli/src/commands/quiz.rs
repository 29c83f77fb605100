//! Module selection and the quiz loop.

use std::io::{BufRead, Write};

use anyhow::Result;

use cyberquiz_core::catalog::module_choices;
use cyberquiz_core::model::ModuleKey;
use cyberquiz_core::quiz::{QuizOutcome, QuizRun};
use cyberquiz_core::users::record_score;

use super::print_module_choices;
use crate::session::{Controller, Session};

pub fn select_module<R: BufRead, W: Write>(
    ctl: &mut Controller<'_, R, W>,
    session: &mut Session,
) -> Result<()> {
    ctl.console.header("Select Quiz Module")?;

    let choices = module_choices(&ctl.bank.questions);
    if choices.is_empty() {
        return ctl.console.fail("No quiz modules available.");
    }

    print_module_choices(&mut ctl.console, &choices)?;
    let back = choices.len() + 1;
    ctl.console.say(&format!("\n{back}. Back to Main Menu"))?;

    let picked = ctl.console.prompt_number("\nEnter choice: ")?;
    if picked == Some(back) {
        return Ok(());
    }

    match choices.into_iter().find(|c| Some(c.number) == picked) {
        Some(choice) => {
            run_quiz(ctl, session, choice.key)?;
            Ok(())
        }
        None => ctl.console.fail("Invalid choice."),
    }
}

/// Ask every question of the module once, then record and show the score.
pub fn run_quiz<R: BufRead, W: Write>(
    ctl: &mut Controller<'_, R, W>,
    session: &mut Session,
    key: ModuleKey,
) -> Result<QuizOutcome> {
    let mut run = QuizRun::start(&ctl.bank.questions, key);
    if run.is_empty() {
        ctl.console.fail("No questions available for this module.")?;
        return Ok(run.outcome());
    }

    let total = run.total();
    while let Some(question) = run.current().cloned() {
        ctl.console.header(&run.key().to_string())?;
        ctl.console
            .say(&format!("Question {} of {}", run.position() + 1, total))?;
        ctl.console.blank()?;
        ctl.console.say(&question.question)?;
        ctl.console.blank()?;
        for (i, option) in question.options.iter().enumerate() {
            ctl.console.say(&format!("{}. {}", i + 1, option))?;
        }

        let answer = ctl
            .console
            .prompt(&format!("\nYour answer (1-{}): ", question.options.len()))?;
        if let Some(feedback) = run.submit(&answer) {
            if feedback.correct {
                ctl.console.say("\nCorrect!")?;
            } else {
                let right = feedback.correct_option.unwrap_or_default();
                ctl.console
                    .say(&format!("\nIncorrect. The correct answer was: {right}"))?;
            }
        }
        ctl.console.pause()?;
    }

    let outcome = run.outcome();
    let key = run.key();
    record_score(
        ctl.store,
        &mut session.user,
        &key.category,
        &key.module,
        outcome.correct,
        outcome.total,
        ctl.now(),
    )?;

    ctl.console.header("Quiz Completed")?;
    ctl.console.say(&format!("Module: {key}"))?;
    ctl.console.say(&format!(
        "Score: {}/{} ({:.1}%) {}",
        outcome.correct,
        outcome.total,
        outcome.percentage(),
        outcome.band().message()
    ))?;
    ctl.console.pause()?;

    Ok(outcome)
}
