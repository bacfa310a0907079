//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod poller;
pub mod session_store;
pub mod test_dependencies;
pub mod traits;

pub use deps::{BlandAdapter, ElevenLabsAdapter, OllamaAdapter, ServerDeps};
pub use poller::{CallPoller, CallResult, PollConfig, PollError, NO_TRANSCRIPT};
pub use session_store::{ConversationMemory, Role, SessionStore, MAX_MEMORY_TURNS};
pub use traits::{BaseAI, BaseCallService, BaseSpeechService, CallServiceError, CallStatus};
