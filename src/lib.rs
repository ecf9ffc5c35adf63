//! Vocabulary drill sessions.
//!
//! [`generator::ExerciseGenerator`] turns a word list into exercises and
//! [`session::SessionEngine`] walks a learner through them, scoring answers
//! and handing the finished summary to a [`session::ProgressReporter`].

pub mod config;
pub mod engine;
pub mod event;
pub mod generator;
pub mod session;
pub mod store;
