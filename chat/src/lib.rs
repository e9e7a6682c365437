//! OneFlow Chat Library
//!
//! Turns natural-language requests into atomic edit operations on a OneFlow
//! node graph, and validates or summarizes graphs against the node catalog.

pub mod app;
pub mod cache;
pub mod catalog;
pub mod completion;
pub mod errors;
pub mod logs;
pub mod models;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;
pub mod workflow;
