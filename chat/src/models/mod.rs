//! Data models

pub mod graph;
pub mod operation;
pub mod result;
