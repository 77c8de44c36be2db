//! Live-reload session registry.
//!
//! Sessions are the browser WebSocket connections opened on `/live-reload`.
//! Each one is represented by the sending half of a channel drained by its
//! socket task.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Message pushed to every open session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum DevCommand {
    /// `{"command":"reload"}`
    Reload,
}

/// Messages a session may hold before broadcasts skip it.
const SESSION_QUEUE: usize = 16;

/// Open sessions by id.
pub type SessionRegistry = Arc<RwLock<HashMap<usize, mpsc::Sender<String>>>>;

/// State shared by the dev server and the orchestrator for one `arbor dev` run.
#[derive(Debug, Default)]
pub struct DevContext {
    sessions: SessionRegistry,
    next_session_id: RwLock<usize>,
}

impl DevContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new session and return its id and message receiver.
    pub fn register_session(&self) -> (usize, mpsc::Receiver<String>) {
        let id = {
            let mut next_id = self.next_session_id.write();
            let id = *next_id;
            *next_id += 1;
            id
        };

        let (tx, rx) = mpsc::channel(SESSION_QUEUE);
        self.sessions.write().insert(id, tx);
        tracing::debug!(id, "live-reload session opened");

        (id, rx)
    }

    pub fn unregister_session(&self, id: usize) {
        if self.sessions.write().remove(&id).is_some() {
            tracing::debug!(id, "live-reload session closed");
        }
    }

    /// Queue `command` on every open session without waiting on any socket.
    ///
    /// A session whose queue is full already holds an undelivered reload and
    /// is skipped; a session whose socket task is gone is dropped. Returns the
    /// number of sessions the command was queued on.
    pub fn broadcast(&self, command: &DevCommand) -> usize {
        let json = match serde_json::to_string(command) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!(error = %err, "failed to encode live-reload command");
                return 0;
            }
        };

        let mut closed = Vec::new();
        let mut sent = 0;
        for (&id, tx) in self.sessions.read().iter() {
            match tx.try_send(json.clone()) {
                Ok(()) => sent += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::debug!(id, "live-reload session is not draining, skipping");
                }
                Err(TrySendError::Closed(_)) => closed.push(id),
            }
        }

        for id in closed {
            self.unregister_session(id);
        }
        sent
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }
}
