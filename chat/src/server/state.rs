//! Server state

use std::sync::Arc;

use crate::services::chat::ChatService;

/// Server state shared across handlers
pub struct ServerState {
    pub chat: Arc<ChatService>,
}

impl ServerState {
    pub fn new(chat: Arc<ChatService>) -> Self {
        Self { chat }
    }
}
