//! Session controller: the top-level menu state machine.
//!
//! ```text
//! LoggedOut -> MainMenu -> { quiz | scores | admin } -> MainMenu
//!                       -> switch user               -> LoggedOut
//!                       -> exit                      -> Terminated
//! ```
//!
//! The logged-in user travels as a [`Session`] value between states. It is
//! created at login, replaced on switch-user and dropped at exit.

use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::{DateTime, Utc};

use cyberquiz_core::model::{AdminConfig, QuizData, User};
use cyberquiz_core::store::Store;

use crate::commands;
use crate::console::Console;

/// The logged-in user.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
}

/// Controller state between two screens.
#[derive(Debug)]
pub enum State {
    LoggedOut,
    MainMenu(Session),
    Terminated,
}

/// Owns the console and the in-memory working copies of the question bank
/// and admin configuration.
pub struct Controller<'a, R, W> {
    pub(crate) console: Console<R, W>,
    pub(crate) store: &'a dyn Store,
    pub(crate) bank: QuizData,
    pub(crate) admin: AdminConfig,
    clock: fn() -> DateTime<Utc>,
}

impl<'a, R: BufRead, W: Write> Controller<'a, R, W> {
    pub fn new(console: Console<R, W>, store: &'a dyn Store) -> Self {
        Self {
            console,
            bank: store.load_questions(),
            admin: store.load_admin_config(),
            store,
            clock: Utc::now,
        }
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Run until the user picks Exit.
    pub fn run(&mut self) -> Result<()> {
        let mut state = State::LoggedOut;
        loop {
            state = match state {
                State::LoggedOut => State::MainMenu(commands::login::login(self)?),
                State::MainMenu(session) => self.main_menu(session)?,
                State::Terminated => return Ok(()),
            };
        }
    }

    fn main_menu(&mut self, mut session: Session) -> Result<State> {
        let title = format!("User: {} ({})", session.user.name, session.user.id);
        self.console.header(&title)?;
        self.console.say("MAIN MENU")?;
        self.console.blank()?;
        self.console.say("1. Take Quiz")?;
        self.console.say("2. View Scores")?;
        self.console.say("3. Switch User")?;
        self.console.say("4. Admin Panel")?;
        self.console.say("5. Exit")?;

        let choice = self.console.prompt("\nEnter choice (1-5): ")?;
        match choice.as_str() {
            "1" => commands::quiz::select_module(self, &mut session)?,
            "2" => commands::scores::show(self, &session)?,
            "3" => return Ok(State::LoggedOut),
            "4" => commands::admin::panel(self)?,
            "5" => {
                self.console.say("\nThank you for using Cyber Learning Quiz!")?;
                self.console.say("Your progress has been saved.")?;
                return Ok(State::Terminated);
            }
            _ => self.console.fail("Invalid choice.")?,
        }
        Ok(State::MainMenu(session))
    }

    #[cfg(test)]
    pub(crate) fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.console.into_output()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;
    use cyberquiz_core::store::MemoryStore;
    use cyberquiz_core::QuizError;
    use std::io::Cursor;

    pub(crate) fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap()
    }

    /// Drive a full session from scripted input; returns the run result and
    /// everything written to the screen.
    pub(crate) fn drive(store: &MemoryStore, script: &[&str]) -> (Result<()>, String) {
        let mut input = script.join("\n");
        input.push('\n');
        let console = Console::new(Cursor::new(input.into_bytes()), Vec::new(), false);
        let mut controller = Controller::new(console, store).with_clock(fixed_now);
        let result = controller.run();
        let output = String::from_utf8(controller.into_output()).unwrap();
        (result, output)
    }

    #[test]
    fn register_then_exit() {
        let store = MemoryStore::new();
        let (result, out) = drive(&store, &["1", "Alice Smith", "", "5"]);
        result.unwrap();
        assert!(out.contains("Your User ID is: alicesmith1"));
        assert!(out.contains("Thank you for using Cyber Learning Quiz!"));
        assert_eq!(store.load_users()[0].id, "alicesmith1");
        assert_eq!(store.load_users()[0].created_at, fixed_now());
    }

    #[test]
    fn invalid_login_choice_registers() {
        let store = MemoryStore::new();
        let (result, out) = drive(&store, &["x", "Bob", "", "5"]);
        result.unwrap();
        assert!(out.contains("Invalid choice. Creating new user..."));
        assert_eq!(store.load_users().len(), 1);
    }

    #[test]
    fn returning_user_selection() {
        let store = MemoryStore::new();
        drive(&store, &["1", "Alice", "", "5"]).0.unwrap();
        drive(&store, &["1", "Bob", "", "5"]).0.unwrap();

        let (result, out) = drive(&store, &["2", "2", "", "5"]);
        result.unwrap();
        assert!(out.contains("1. Alice (ID: alice1)"));
        assert!(out.contains("Welcome back, Bob!"));
        assert!(out.contains("User: Bob (bob1)"));
        assert_eq!(store.load_users().len(), 2);
    }

    #[test]
    fn returning_user_out_of_range_registers() {
        let store = MemoryStore::new();
        drive(&store, &["1", "Alice", "", "5"]).0.unwrap();

        let (result, out) = drive(&store, &["2", "9", "Alice", "", "5"]);
        result.unwrap();
        assert!(out.contains("Invalid selection. Creating new user..."));
        let ids: Vec<_> = store.load_users().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec!["alice1", "alice2"]);
    }

    #[test]
    fn returning_with_no_users_registers() {
        let store = MemoryStore::new();
        let (result, out) = drive(&store, &["2", "Zed", "", "5"]);
        result.unwrap();
        assert!(out.contains("No existing users found."));
        assert_eq!(store.load_users()[0].id, "zed1");
    }

    #[test]
    fn invalid_main_menu_choice_stays_put() {
        let store = MemoryStore::new();
        let (result, out) = drive(&store, &["1", "Amy", "", "42", "", "5"]);
        result.unwrap();
        assert!(out.contains("Invalid choice."));
        assert_eq!(out.matches("MAIN MENU").count(), 2);
    }

    #[test]
    fn switch_user_returns_to_login() {
        let store = MemoryStore::new();
        let script = ["1", "Amy", "", "3", "1", "Ben", "", "5"];
        let (result, out) = drive(&store, &script);
        result.unwrap();
        assert!(out.contains("User: Amy (amy1)"));
        assert!(out.contains("User: Ben (ben1)"));
        assert_eq!(store.load_users().len(), 2);
    }

    #[test]
    fn closed_input_is_fatal() {
        let store = MemoryStore::new();
        let (result, _) = drive(&store, &["1", "Amy", ""]);
        let err = result.unwrap_err();
        assert_eq!(err.downcast_ref::<QuizError>(), Some(&QuizError::InputClosed));
    }
}
