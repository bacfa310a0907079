// Domain modules - business logic built on kernel infrastructure

pub mod chat;
pub mod p2p;
