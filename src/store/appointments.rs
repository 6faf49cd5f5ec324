//! Demo appointment store.
//!
//! Records are append-only: the only mutation after creation is adding a
//! participant. Ids come from a counter persisted under
//! `coffeechat_idCounter`, so they keep increasing across restarts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

use crate::observability::metrics;
use crate::store::{
    event_channel, load_list, publish, save_list, KeyValueStorage, Result, StoreError, StoreEvent,
    APPOINTMENTS_KEY, ID_COUNTER_KEY,
};

/// A stored appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub title: String,
    pub description: String,
    pub building: String,
    pub floor: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub host_email: String,
    pub host_nickname: String,
    /// Insertion-ordered, no duplicates.
    pub participants: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields of a new appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub building: String,
    pub floor: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub host_email: String,
    #[serde(default)]
    pub host_nickname: String,
}

#[derive(Debug, Default)]
struct Snapshot {
    appointments: Vec<Appointment>,
    next_id: u64,
}

/// Appointment list persisted under `coffeechat_appointments`.
#[derive(Debug)]
pub struct AppointmentStore {
    storage: Arc<dyn KeyValueStorage>,
    snapshot: Mutex<Snapshot>,
    events: broadcast::Sender<StoreEvent>,
}

impl AppointmentStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            snapshot: Mutex::new(Snapshot::default()),
            events: event_channel(),
        }
    }

    /// Replace the in-memory state with the stored one.
    pub fn reload(&self) -> Result<()> {
        self.with_snapshot(|_| Ok(()))
    }

    /// Store a new appointment and return it with its assigned id.
    pub fn create(&self, new: NewAppointment) -> Result<Appointment> {
        let appointment = self.with_snapshot(|snapshot| {
            let appointment = Appointment {
                id: snapshot.next_id.to_string(),
                title: new.title,
                description: new.description,
                building: new.building,
                floor: new.floor,
                date: new.date,
                start_time: new.start_time,
                end_time: new.end_time,
                host_email: new.host_email,
                host_nickname: new.host_nickname,
                participants: Vec::new(),
                created_at: Utc::now(),
            };
            snapshot.appointments.push(appointment.clone());
            snapshot.next_id += 1;
            self.save(snapshot)?;
            Ok(appointment)
        })?;

        tracing::info!(id = %appointment.id, host = %appointment.host_email, "Appointment created");
        metrics::record_store_mutation("appointment_create");
        publish(&self.events, StoreEvent::AppointmentCreated { id: appointment.id.clone() });
        Ok(appointment)
    }

    /// Add `email` to the participants of appointment `id`.
    ///
    /// Returns `false` when the appointment does not exist or the email has
    /// already joined; nothing is written in either case.
    pub fn join(&self, id: &str, email: &str) -> Result<bool> {
        let joined = self.with_snapshot(|snapshot| {
            let Some(appointment) = snapshot.appointments.iter_mut().find(|a| a.id == id) else {
                return Ok(false);
            };
            if appointment.participants.iter().any(|p| p == email) {
                return Ok(false);
            }
            appointment.participants.push(email.to_string());
            self.save(snapshot)?;
            Ok(true)
        })?;

        if joined {
            tracing::info!(id = %id, email = %email, "Participant joined appointment");
            metrics::record_store_mutation("appointment_join");
            publish(
                &self.events,
                StoreEvent::ParticipantJoined { id: id.to_string(), email: email.to_string() },
            );
        } else {
            tracing::debug!(id = %id, email = %email, "Join rejected");
        }
        Ok(joined)
    }

    pub fn get(&self, id: &str) -> Result<Option<Appointment>> {
        self.find(|a| a.id == id).map(|mut found| found.pop())
    }

    pub fn all(&self) -> Result<Vec<Appointment>> {
        self.find(|_| true)
    }

    pub fn by_host(&self, host_email: &str) -> Result<Vec<Appointment>> {
        self.find(|a| a.host_email == host_email)
    }

    pub fn by_participant(&self, email: &str) -> Result<Vec<Appointment>> {
        self.find(|a| a.participants.iter().any(|p| p == email))
    }

    /// Exact, case-sensitive match on both building and floor.
    pub fn by_location(&self, building: &str, floor: &str) -> Result<Vec<Appointment>> {
        self.find(|a| a.building == building && a.floor == floor)
    }

    /// Linear scan returning every record matching `predicate`.
    pub fn find<P>(&self, predicate: P) -> Result<Vec<Appointment>>
    where
        P: Fn(&Appointment) -> bool,
    {
        self.with_snapshot(|snapshot| {
            Ok(snapshot
                .appointments
                .iter()
                .filter(|a| predicate(*a))
                .cloned()
                .collect())
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    fn with_snapshot<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Snapshot) -> Result<T>,
    {
        let mut snapshot = self.snapshot.lock().map_err(|_| StoreError::Poisoned)?;
        *snapshot = self.load()?;
        f(&mut *snapshot)
    }

    fn load(&self) -> Result<Snapshot> {
        let appointments: Vec<Appointment> = load_list(self.storage.as_ref(), APPOINTMENTS_KEY)?;

        let stored = self
            .storage
            .get(ID_COUNTER_KEY)?
            .and_then(|raw| raw.trim().parse::<u64>().ok());
        // Never hand out an id at or below one already in use, even if the
        // counter key was lost or rolled back.
        let floor = appointments
            .iter()
            .filter_map(|a| a.id.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);
        let next_id = stored.unwrap_or(1).max(floor);

        Ok(Snapshot { appointments, next_id })
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        save_list(self.storage.as_ref(), APPOINTMENTS_KEY, snapshot.appointments.as_slice())?;
        self.storage.set(ID_COUNTER_KEY, &snapshot.next_id.to_string())
    }
}
