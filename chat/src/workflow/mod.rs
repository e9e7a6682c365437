//! Workflow generation, validation and analysis

pub mod analyzer;
pub mod generator;
pub mod prompt;
pub mod validator;
