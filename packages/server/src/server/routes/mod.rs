// HTTP routes
pub mod calls;
pub mod chat;
pub mod health;
pub mod tts;

pub use calls::*;
pub use chat::*;
pub use health::*;
pub use tts::*;
