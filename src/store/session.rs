//! Current-session marker, stored as `{"email": ...}` under key `user`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::store::{event_channel, publish, KeyValueStorage, Result, StoreEvent, SESSION_KEY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
}

#[derive(Debug)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    events: broadcast::Sender<StoreEvent>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            events: event_channel(),
        }
    }

    /// The logged-in user, if a marker is stored.
    pub fn current(&self) -> Result<Option<SessionUser>> {
        match self.storage.get(SESSION_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn login(&self, email: &str) -> Result<SessionUser> {
        let user = SessionUser { email: email.to_string() };
        self.storage.set(SESSION_KEY, &serde_json::to_string(&user)?)?;
        publish(&self.events, StoreEvent::SessionChanged { email: Some(user.email.clone()) });
        Ok(user)
    }

    pub fn logout(&self) -> Result<()> {
        self.storage.remove(SESSION_KEY)?;
        publish(&self.events, StoreEvent::SessionChanged { email: None });
        Ok(())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}
