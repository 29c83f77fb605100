//! Menu screens driven by the session controller.

pub mod admin;
pub mod login;
pub mod quiz;
pub mod scores;

use std::io::{BufRead, Write};

use anyhow::Result;

use cyberquiz_core::catalog::ModuleChoice;

use crate::console::Console;

/// Numbered module list, one heading per category.
fn print_module_choices<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    choices: &[ModuleChoice],
) -> Result<()> {
    let mut category = None;
    for choice in choices {
        if category != Some(&choice.key.category) {
            category = Some(&choice.key.category);
            console.say(&format!("\n{}:", choice.key.category))?;
        }
        console.say(&format!(
            "  {}. {} ({} questions)",
            choice.number, choice.key.module, choice.question_count
        ))?;
    }
    Ok(())
}
