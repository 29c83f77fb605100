//! Login screen: new-user registration or returning-user selection.

use std::io::{BufRead, Write};

use anyhow::Result;

use cyberquiz_core::users::register_user;

use crate::session::{Controller, Session};

pub fn login<R: BufRead, W: Write>(ctl: &mut Controller<'_, R, W>) -> Result<Session> {
    ctl.console.header("Cyber Learning Quiz Application")?;
    ctl.console.say("Are you a:")?;
    ctl.console.say("1. New User")?;
    ctl.console.say("2. Returning User")?;

    match ctl.console.prompt("\nEnter choice (1-2): ")?.as_str() {
        "1" => register(ctl),
        "2" => returning(ctl),
        _ => {
            ctl.console.say("Invalid choice. Creating new user...")?;
            register(ctl)
        }
    }
}

fn register<R: BufRead, W: Write>(ctl: &mut Controller<'_, R, W>) -> Result<Session> {
    ctl.console.header("New User Registration")?;
    let name = ctl.console.prompt("Enter your name: ")?;

    let user = register_user(ctl.store, &name, ctl.now())?;

    ctl.console
        .say(&format!("\nWelcome, {}! Your User ID is: {}", user.name, user.id))?;
    ctl.console.pause()?;
    Ok(Session { user })
}

fn returning<R: BufRead, W: Write>(ctl: &mut Controller<'_, R, W>) -> Result<Session> {
    let mut users = ctl.store.load_users();
    if users.is_empty() {
        ctl.console
            .say("\nNo existing users found. Creating new user...")?;
        return register(ctl);
    }

    ctl.console.header("Returning Users")?;
    for (i, user) in users.iter().enumerate() {
        ctl.console
            .say(&format!("{}. {} (ID: {})", i + 1, user.name, user.id))?;
    }

    let selected = ctl
        .console
        .prompt_number("\nEnter user number: ")?
        .filter(|n| (1..=users.len()).contains(n));

    match selected {
        Some(n) => {
            let user = users.swap_remove(n - 1);
            ctl.console
                .say(&format!("\nWelcome back, {}!", user.name))?;
            ctl.console.pause()?;
            Ok(Session { user })
        }
        None => {
            ctl.console.say("Invalid selection. Creating new user...")?;
            register(ctl)
        }
    }
}
