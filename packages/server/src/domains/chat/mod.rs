//! Session-memory chat assistant.
//!
//! A small conversational front door: persona-prompted completions over a
//! bounded per-session history, with model "thinking" output scrubbed before
//! it reaches the user.

pub mod actions;
pub mod prompts;

pub use actions::{clean_model_output, respond, EMPTY_MESSAGE_REPLY};
