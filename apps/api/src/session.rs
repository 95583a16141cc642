//! In-memory editing sessions.
//!
//! Each session owns one `ResumeStore`, the wizard walking over it, and the
//! export indicator. Nothing is persisted; a session lives until it is deleted,
//! sits idle past the configured TTL, or the process exits.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::ExportStatus;
use crate::models::ResumeDocument;
use crate::store::ResumeStore;
use crate::wizard::{Stage, Wizard};

#[derive(Debug, Clone)]
pub struct Session {
    pub store: ResumeStore,
    pub wizard: Wizard,
    pub export_status: ExportStatus,
}

impl Session {
    pub fn new() -> Self {
        let store = ResumeStore::new();
        let wizard = Wizard::new(&store);
        Self {
            store,
            wizard,
            export_status: ExportStatus::Idle,
        }
    }

    /// Back to the default document with the wizard on its first stage.
    pub fn reset(&mut self) {
        self.store.reset();
        self.wizard = Wizard::new(&self.store);
        self.export_status = ExportStatus::Idle;
    }

    pub fn summary(&self, id: Uuid) -> SessionSummary {
        SessionSummary {
            id,
            document: self.store.document().clone(),
            stage: self.wizard.stage(),
            export_status: self.export_status.clone(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub document: ResumeDocument,
    pub stage: Stage,
    pub export_status: ExportStatus,
}

struct Slot {
    session: Session,
    last_touched: Instant,
}

/// Shared session table, capped at `capacity` live entries.
///
/// Every access refreshes a session's idle clock. Sessions left alone for
/// longer than `idle_ttl` are evicted, except while an export is running.
#[derive(Clone)]
pub struct Sessions {
    inner: Arc<RwLock<HashMap<Uuid, Slot>>>,
    capacity: usize,
    idle_ttl: Duration,
}

impl Sessions {
    pub fn new(capacity: usize, idle_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            capacity,
            idle_ttl,
        }
    }

    pub async fn create(&self) -> Result<SessionSummary, AppError> {
        let mut sessions = self.inner.write().await;
        self.evict_expired(&mut sessions);
        if sessions.len() >= self.capacity {
            return Err(AppError::Unavailable(format!(
                "Session limit of {} reached",
                self.capacity
            )));
        }
        let id = Uuid::new_v4();
        let session = Session::new();
        let summary = session.summary(id);
        sessions.insert(
            id,
            Slot {
                session,
                last_touched: Instant::now(),
            },
        );
        info!(session_id = %id, live = sessions.len(), "Session created");
        Ok(summary)
    }

    /// Takes the write lock so the read counts as activity.
    pub async fn read<T>(&self, id: Uuid, f: impl FnOnce(&Session) -> T) -> Result<T, AppError> {
        let mut sessions = self.inner.write().await;
        let slot = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        slot.last_touched = Instant::now();
        Ok(f(&slot.session))
    }

    /// Runs `f` under the write lock. `f` must not await.
    pub async fn update<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut sessions = self.inner.write().await;
        let slot = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        slot.last_touched = Instant::now();
        f(&mut slot.session)
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let mut sessions = self.inner.write().await;
        sessions.remove(&id).ok_or_else(|| not_found(id))?;
        info!(session_id = %id, live = sessions.len(), "Session removed");
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Drops idle sessions and returns how many went.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.inner.write().await;
        self.evict_expired(&mut sessions)
    }

    /// Periodic `evict_idle` on the runtime, every `period`.
    pub fn spawn_sweeper(&self, period: Duration) -> JoinHandle<()> {
        let sessions = self.clone();
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(period);
            loop {
                tick.tick().await;
                sessions.evict_idle().await;
            }
        })
    }

    fn evict_expired(&self, sessions: &mut HashMap<Uuid, Slot>) -> usize {
        let before = sessions.len();
        sessions.retain(|id, slot| {
            let keep = slot.last_touched.elapsed() < self.idle_ttl
                || slot.session.export_status == ExportStatus::InProgress;
            if !keep {
                debug!(session_id = %id, "Idle session evicted");
            }
            keep
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, live = sessions.len(), "Idle sessions evicted");
        }
        evicted
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateId;

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_create_read_remove() {
        let sessions = Sessions::new(4, TTL);
        let created = sessions.create().await.unwrap();
        assert_eq!(created.stage, Stage::Personal);
        assert_eq!(created.document, ResumeDocument::default());

        let stage = sessions.read(created.id, |s| s.wizard.stage()).await.unwrap();
        assert_eq!(stage, Stage::Personal);

        sessions.remove(created.id).await.unwrap();
        assert!(matches!(
            sessions.read(created.id, |_| ()).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(sessions.remove(created.id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_capacity_is_enforced() {
        let sessions = Sessions::new(1, TTL);
        let first = sessions.create().await.unwrap();
        assert!(matches!(sessions.create().await, Err(AppError::Unavailable(_))));

        sessions.remove(first.id).await.unwrap();
        assert!(sessions.create().await.is_ok());
        assert_eq!(sessions.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_and_reset() {
        let sessions = Sessions::new(4, TTL);
        let id = sessions.create().await.unwrap().id;

        sessions
            .update(id, |s| {
                s.store.set_selected_template(TemplateId::Creative);
                s.store.set_resume_name("Draft");
                s.export_status = ExportStatus::Failed {
                    reason: "x".into(),
                };
                Ok(())
            })
            .await
            .unwrap();

        let summary = sessions.read(id, |s| s.summary(id)).await.unwrap();
        assert_eq!(summary.document.selected_template_id, TemplateId::Creative);

        sessions
            .update(id, |s| {
                s.reset();
                Ok(())
            })
            .await
            .unwrap();
        let summary = sessions.read(id, |s| s.summary(id)).await.unwrap();
        assert_eq!(summary.document, ResumeDocument::default());
        assert_eq!(summary.export_status, ExportStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_session_frees_its_slot() {
        let sessions = Sessions::new(1, TTL);
        let stale = sessions.create().await.unwrap().id;
        assert!(matches!(sessions.create().await, Err(AppError::Unavailable(_))));

        tokio::time::advance(TTL + Duration::from_secs(1)).await;
        let fresh = sessions.create().await.unwrap().id;
        assert_eq!(sessions.len().await, 1);
        assert!(matches!(sessions.read(stale, |_| ()).await, Err(AppError::NotFound(_))));
        assert!(sessions.read(fresh, |_| ()).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_activity_keeps_session_alive() {
        let sessions = Sessions::new(4, TTL);
        let id = sessions.create().await.unwrap().id;

        tokio::time::advance(Duration::from_secs(40)).await;
        sessions.read(id, |s| s.wizard.stage()).await.unwrap();
        tokio::time::advance(Duration::from_secs(40)).await;
        assert_eq!(sessions.evict_idle().await, 0);

        tokio::time::advance(TTL).await;
        assert_eq!(sessions.evict_idle().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_in_progress_is_not_evicted() {
        let sessions = Sessions::new(4, TTL);
        let id = sessions.create().await.unwrap().id;
        sessions
            .update(id, |s| {
                s.export_status = ExportStatus::InProgress;
                Ok(())
            })
            .await
            .unwrap();

        tokio::time::advance(TTL * 2).await;
        assert_eq!(sessions.evict_idle().await, 0);
        assert!(sessions.read(id, |_| ()).await.is_ok());
    }
}
