//! cyberquiz-core: data model, persistence and quiz logic.
//!
//! This crate defines the user/question/score model, the document store the
//! whole application persists through, and the pure operations the
//! interactive session drives: catalog views, user registration, quiz
//! grading and admin content management.

pub mod admin;
pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod quiz;
pub mod seed;
pub mod store;
pub mod users;

pub use error::QuizError;
