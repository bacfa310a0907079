//! Peer-to-peer prior-authorization flow.
//!
//! Three sequential stages: collect the requesting doctor's argument over a
//! phone call, distill it into a persuasive summary with the LLM, then relay
//! that summary on a second call to the authorizing party.

pub mod actions;
pub mod prompts;

pub use actions::{
    collect_argument, relay_argument, run_complete_flow, summarize_argument, FlowError,
    FlowOutcome, FlowStage, StageError,
};
