//! Chat actions: session-memory completion and model-output cleanup.

use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::kernel::{Role, ServerDeps, SessionStore};

use super::prompts::PERSONA_PROMPT;

lazy_static! {
    /// Reasoning models emit <think>...</think> deliberation blocks that
    /// must never reach the user.
    static ref THINK_BLOCK: Regex =
        Regex::new(r"(?s)<think>.*?</think>").expect("think-block pattern is valid");
}

/// Reply for an empty or whitespace-only message; no LLM call is made.
pub const EMPTY_MESSAGE_REPLY: &str = "I didn't catch that. Could you repeat?";

/// Fallback when cleanup leaves nothing usable of the model output.
const EMPTY_OUTPUT_REPLY: &str = "I didn't catch that, could you repeat?";

/// Strip deliberation blocks and any leading "thinking" section from raw
/// model output, keeping only the reply meant for the user.
pub fn clean_model_output(raw: &str) -> String {
    let stripped = THINK_BLOCK.replace_all(raw, "");
    let stripped = stripped.trim();

    // Some models separate deliberation from the final reply with a blank
    // double break; keep only what follows the first one.
    let reply = match stripped.split_once("\n\n\n") {
        Some((_, rest)) => rest.trim(),
        None => stripped,
    };

    if reply.is_empty() {
        EMPTY_OUTPUT_REPLY.to_string()
    } else {
        reply.to_string()
    }
}

/// Handle one chat message for a session.
///
/// Holds the session's memory lock across the whole prompt-build/complete/
/// record cycle, so concurrent requests for the same session serialize.
pub async fn respond(
    deps: &ServerDeps,
    store: &SessionStore,
    session_id: &str,
    message: &str,
) -> Result<String> {
    let message = message.trim();
    if message.is_empty() {
        return Ok(EMPTY_MESSAGE_REPLY.to_string());
    }

    let session = store.session(session_id).await;
    let mut memory = session.lock().await;

    memory.push(Role::User, message);

    let prompt = format!(
        "{}\n\nConversation so far:\n{}\n\nAI:",
        PERSONA_PROMPT,
        memory.render()
    );

    let raw = deps.ai.complete(&prompt).await?;
    let reply = clean_model_output(&raw);

    debug!(session_id = %session_id, turns = memory.len(), "Chat reply generated");

    memory.push(Role::Assistant, &reply);

    Ok(reply)
}
