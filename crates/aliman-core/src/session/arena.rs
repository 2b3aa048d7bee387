//! In-memory session registry.
//!
//! Each session sits behind its own mutex, so two `end` calls for the same id
//! are serialized while sessions with different ids proceed in parallel. The
//! outer lock is held only long enough to insert or look up a handle.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::{Mutex, RwLock};

use super::state::{
    resolve_planned_minutes, EndOutcome, EndRequest, FocusSession, OwnerId, SessionId,
    DEFAULT_PLANNED_MINUTES,
};
use crate::clock::{Clock, SystemClock};
use crate::day::DayBoundary;
use crate::error::DomainError;

type SessionHandle = Arc<Mutex<FocusSession>>;

pub struct SessionArena<C: Clock = SystemClock> {
    clock: C,
    default_planned_minutes: u32,
    next_id: AtomicI64,
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
}

impl SessionArena<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for SessionArena<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> SessionArena<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            default_planned_minutes: DEFAULT_PLANNED_MINUTES,
            next_id: AtomicI64::new(1),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Planned duration used when `start` is called without one.
    pub fn with_default_planned_minutes(mut self, minutes: u32) -> Self {
        self.default_planned_minutes = minutes;
        self
    }

    /// Start a new active session for `owner`.
    ///
    /// # Errors
    /// Returns `InvalidArgument` for a non-positive planned duration.
    pub fn start(
        &self,
        owner: OwnerId,
        planned_minutes: Option<i64>,
    ) -> Result<FocusSession, DomainError> {
        let planned = resolve_planned_minutes(planned_minutes, self.default_planned_minutes)?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let session = FocusSession::start(id, owner, planned, self.clock.now())?;

        self.sessions
            .write()
            .insert(id, Arc::new(Mutex::new(session.clone())));
        tracing::debug!(session_id = id, owner, planned, "focus session started");
        Ok(session)
    }

    fn handle(&self, id: SessionId, owner: OwnerId) -> Result<SessionHandle, DomainError> {
        let handle = self
            .sessions
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::session_not_found(id))?;
        if handle.lock().owner != owner {
            return Err(DomainError::session_not_found(id));
        }
        Ok(handle)
    }

    /// End a session owned by `owner`.
    ///
    /// # Errors
    /// `NotFound` if the id does not belong to `owner`, `AlreadyEnded` on a
    /// repeated call.
    pub fn end(
        &self,
        id: SessionId,
        owner: OwnerId,
        request: EndRequest,
    ) -> Result<EndOutcome, DomainError> {
        let handle = self.handle(id, owner)?;
        let mut session = handle.lock();
        match session.end(request, self.clock.now()) {
            Ok(outcome) => {
                tracing::debug!(
                    session_id = id,
                    actual_minutes = outcome.actual_minutes,
                    exit_type = %outcome.exit_type,
                    "focus session ended"
                );
                Ok(outcome)
            }
            Err(err) => {
                tracing::warn!(session_id = id, "rejected repeated end");
                Err(err)
            }
        }
    }

    /// Snapshot of one session.
    pub fn get(&self, id: SessionId, owner: OwnerId) -> Result<FocusSession, DomainError> {
        let handle = self.handle(id, owner)?;
        let session = handle.lock().clone();
        Ok(session)
    }

    /// All sessions of `owner`, oldest first.
    pub fn sessions_for(&self, owner: OwnerId) -> Vec<FocusSession> {
        let handles: Vec<SessionHandle> = self.sessions.read().values().cloned().collect();
        let mut sessions: Vec<FocusSession> = handles
            .iter()
            .map(|h| h.lock().clone())
            .filter(|s| s.owner == owner)
            .collect();
        sessions.sort_by_key(|s| s.id);
        sessions
    }

    /// Sessions of `owner` that started on the local `date`.
    pub fn sessions_on(
        &self,
        owner: OwnerId,
        date: NaiveDate,
        day: &DayBoundary,
    ) -> Vec<FocusSession> {
        self.sessions_for(owner)
            .into_iter()
            .filter(|s| day.contains(date, s.started_at))
            .collect()
    }
}
