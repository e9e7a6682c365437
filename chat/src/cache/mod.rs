//! In-memory caches

pub mod history;
