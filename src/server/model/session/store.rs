//! In-process session store with expired record deletion.
//!
//! Every rendered page stores a CSRF token, so anonymous visitors create sessions too.
//! Records past their expiry are invisible to [`SessionStore::load`] and are dropped by
//! [`ExpiredDeletion::delete_expired`], which [`spawn_deletion_task`] runs periodically.

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::{sync::Mutex, task::JoinHandle};
use tower_sessions_core::{
    session::{Id, Record},
    session_store::{self, ExpiredDeletion},
    SessionStore,
};

/// Interval between expired session sweeps
pub const DELETION_PERIOD: Duration = Duration::from_secs(60);

#[derive(Clone, Debug, Default)]
pub struct SessionMemoryStore(Arc<Mutex<HashMap<Id, Record>>>);

impl SessionMemoryStore {
    /// Number of stored records, including expired ones not yet swept
    pub async fn len(&self) -> usize {
        self.0.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn is_active(record: &Record, now: OffsetDateTime) -> bool {
    record.expiry_date > now
}

#[async_trait]
impl SessionStore for SessionMemoryStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let mut records = self.0.lock().await;
        while records.contains_key(&record.id) {
            record.id = Id::default();
        }
        records.insert(record.id, record.clone());

        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.0.lock().await.insert(record.id, record.clone());

        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let now = OffsetDateTime::now_utc();

        Ok(self
            .0
            .lock()
            .await
            .get(session_id)
            .filter(|record| is_active(record, now))
            .cloned())
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.0.lock().await.remove(session_id);

        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for SessionMemoryStore {
    async fn delete_expired(&self) -> session_store::Result<()> {
        let now = OffsetDateTime::now_utc();
        let mut records = self.0.lock().await;

        let before = records.len();
        records.retain(|_, record| is_active(record, now));

        let removed = before - records.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = records.len(), "deleted expired sessions");
        }

        Ok(())
    }
}

/// Sweeps expired sessions from `store` every [`DELETION_PERIOD`] for the life of the runtime
pub fn spawn_deletion_task(store: SessionMemoryStore) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(err) = store.continuously_delete_expired(DELETION_PERIOD).await {
            tracing::error!("session deletion task stopped: {}", err);
        }
    })
}
