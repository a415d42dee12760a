//! Message bus between capture and storage.
//!
//! Capture never writes the store directly: it sends a `saveChat` request
//! and waits for a single response. The request and response travel as JSON
//! values, the same shape a browser runtime message would have:
//!
//! ```text
//! { "action": "saveChat", "data": { "website", "url", "title"?, "messages" } }
//! { "success": true, "id": "1718000000000" }
//! ```
//!
//! A missing response is the only failure signal; there is no structured
//! error payload and no retry.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::session::SessionDraft;
use crate::store::ChatStore;

/// Requests understood by the storage side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "camelCase")]
pub enum Request {
    SaveChat(SessionDraft),
}

/// Response to a successful `saveChat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResponse {
    pub success: bool,
    pub id: String,
}

/// Errors that can occur while delivering a request.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("No response from the storage side")]
    NoResponse,

    #[error("Storage side rejected the request")]
    Rejected,

    #[error("Malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Single-shot request/response channel.
pub trait MessageBus {
    fn send(&self, request: &Request) -> Result<SaveResponse, TransportError>;
}

/// Storage-side handler backed by a [`ChatStore`].
#[derive(Debug, Clone)]
pub struct StoreBus {
    store: ChatStore,
}

impl StoreBus {
    pub fn new(store: ChatStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ChatStore {
        &self.store
    }

    /// Handle a raw message. `None` means no response is sent.
    pub fn handle(&self, message: &Value) -> Option<Value> {
        let request: Request = match serde_json::from_value(message.clone()) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring unrecognized message");
                return None;
            }
        };

        match request {
            Request::SaveChat(draft) => match self.store.insert(draft) {
                Ok(session) => serde_json::to_value(SaveResponse {
                    success: true,
                    id: session.id,
                })
                .ok(),
                Err(e) => {
                    tracing::error!(error = %e, "failed to save chat");
                    None
                }
            },
        }
    }
}

impl MessageBus for StoreBus {
    fn send(&self, request: &Request) -> Result<SaveResponse, TransportError> {
        let message = serde_json::to_value(request)?;
        let reply = self.handle(&message).ok_or(TransportError::NoResponse)?;
        let response: SaveResponse = serde_json::from_value(reply)?;

        if !response.success {
            return Err(TransportError::Rejected);
        }
        Ok(response)
    }
}
