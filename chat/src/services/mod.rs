//! Service layer

pub mod chat;
