//! Demo record stores.
//!
//! # Data Flow
//! ```text
//! /demo handler
//!     → AccountStore / AppointmentStore / SessionStore
//!         lock → reload from storage → apply → save → publish StoreEvent
//!     → KeyValueStorage (memory or JSON file)
//! ```
//!
//! # Design Decisions
//! - Stores are built once at startup and shared through `AppState`
//! - Storage is re-read under the store lock before every operation, so
//!   several store instances over one storage never hand out stale ids
//! - Logic failures are outcome values; only storage faults are errors
//! - Consumers that need live updates subscribe to a broadcast channel
//!   instead of polling

pub mod accounts;
pub mod appointments;
pub mod error;
pub mod session;
pub mod storage;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::broadcast;

pub use accounts::{AccountStore, LoginOutcome, SignupOutcome};
pub use appointments::{Appointment, AppointmentStore, NewAppointment};
pub use error::{Result, StoreError};
pub use session::{SessionStore, SessionUser};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};

/// Storage key of the account list.
pub const USERS_KEY: &str = "coffeechat_users";
/// Storage key of the appointment list.
pub const APPOINTMENTS_KEY: &str = "coffeechat_appointments";
/// Storage key of the next appointment id, as a decimal string.
pub const ID_COUNTER_KEY: &str = "coffeechat_idCounter";
/// Storage key of the current-session marker.
pub const SESSION_KEY: &str = "user";

const EVENT_CAPACITY: usize = 64;

/// Change notification published after every successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    AccountCreated { email: String },
    AppointmentCreated { id: String },
    ParticipantJoined { id: String, email: String },
    SessionChanged { email: Option<String> },
}

pub(crate) fn event_channel() -> broadcast::Sender<StoreEvent> {
    broadcast::channel(EVENT_CAPACITY).0
}

pub(crate) fn publish(events: &broadcast::Sender<StoreEvent>, event: StoreEvent) {
    // No subscribers is the normal case.
    let _ = events.send(event);
}

/// Read a JSON list stored under `key`. Absent key → empty list.
pub(crate) fn load_list<T: DeserializeOwned>(
    storage: &dyn KeyValueStorage,
    key: &str,
) -> Result<Vec<T>> {
    match storage.get(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

pub(crate) fn save_list<T: Serialize>(
    storage: &dyn KeyValueStorage,
    key: &str,
    items: &[T],
) -> Result<()> {
    let raw = serde_json::to_string(items)?;
    storage.set(key, &raw)
}
