//! Candidate screening toolkit.
//!
//! The programmatic core is [`validator::GithubValidator`], which normalizes a
//! free-form GitHub identifier, checks its lexical form, performs one bounded
//! REST lookup, and classifies the result into a tri-state
//! [`outcome::ValidationOutcome`]. The language-model half of the workflow
//! ships as prompt documents managed by [`registry::PromptRegistry`].

pub mod cli;
pub mod config;
pub mod github;
pub mod outcome;
pub mod prompt;
pub mod registry;
pub mod validator;
