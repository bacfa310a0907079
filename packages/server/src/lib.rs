// Peer-to-Peer Prior-Authorization Call Orchestrator - API Core
//
// This crate provides the backend API that automates peer-to-peer prior
// authorization: call the requesting doctor to extract an argument, refine
// it with a language model, then place a second call presenting the refined
// argument to the authorizing party.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
