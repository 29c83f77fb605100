//! The current user's score table.

use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::Local;
use comfy_table::{Cell, Table};

use cyberquiz_core::model::User;
use cyberquiz_core::quiz::ScoreBand;

use crate::session::{Controller, Session};

pub fn show<R: BufRead, W: Write>(ctl: &mut Controller<'_, R, W>, session: &Session) -> Result<()> {
    ctl.console.header("Your Scores")?;

    if session.user.scores.is_empty() {
        ctl.console
            .say("No scores recorded yet. Take a quiz to get started!")?;
    } else {
        ctl.console.say(&score_table(&session.user).to_string())?;
    }

    ctl.console.pause()
}

fn score_table(user: &User) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Category", "Module", "Score", "Percent", "Rating", "Last taken"]);

    for (category, modules) in &user.scores {
        for (module, score) in modules {
            let pct = score.percentage();
            table.add_row(vec![
                Cell::new(category),
                Cell::new(module),
                Cell::new(format!("{}/{}", score.correct, score.total)),
                Cell::new(format!("{pct:.1}%")),
                Cell::new(ScoreBand::from_percentage(pct)),
                Cell::new(
                    score
                        .last_taken
                        .with_timezone(&Local)
                        .format("%Y-%m-%d %H:%M"),
                ),
            ]);
        }
    }

    table
}
