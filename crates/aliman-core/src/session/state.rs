//! Focus session record and its single transition.
//!
//! ## State Transitions
//!
//! ```text
//! Active -> Ended
//! ```
//!
//! There is no pause, resume or timeout. A session that is never ended stays
//! `Active`; enforcing the planned duration is up to the caller.
//!
//! Ending twice is rejected with [`DomainError::AlreadyEnded`] and leaves the
//! stored values untouched.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classifier::{classify_reason, ClassificationResult};
use crate::dialogue::respond_to_exit;
use crate::error::DomainError;

pub type SessionId = i64;
pub type OwnerId = i64;

pub const DEFAULT_PLANNED_MINUTES: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Active,
    Ended,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitType {
    #[default]
    Completed,
    Distracted,
    Other,
}

impl ExitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitType::Completed => "completed",
            ExitType::Distracted => "distracted",
            ExitType::Other => "other",
        }
    }
}

impl FromStr for ExitType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "completed" => Ok(ExitType::Completed),
            "distracted" => Ok(ExitType::Distracted),
            "other" => Ok(ExitType::Other),
            other => Err(DomainError::invalid(
                "exit_type",
                format!("expected completed, distracted or other, got '{other}'"),
            )),
        }
    }
}

impl fmt::Display for ExitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments of the `end` transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndRequest {
    #[serde(default)]
    pub exit_reason: Option<String>,
    #[serde(default)]
    pub exit_type: ExitType,
}

impl EndRequest {
    pub fn completed() -> Self {
        Self::default()
    }

    pub fn distracted(reason: impl Into<String>) -> Self {
        Self {
            exit_reason: Some(reason.into()),
            exit_type: ExitType::Distracted,
        }
    }
}

/// What the caller gets back from ending a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndOutcome {
    pub session_id: SessionId,
    pub actual_minutes: u32,
    pub exit_type: ExitType,
    /// Present only for a distracted exit with a non-empty reason.
    pub classification: Option<ClassificationResult>,
    /// Reply rendered from `classification`.
    pub response: Option<String>,
}

impl EndOutcome {
    /// Short status line for the caller.
    pub fn message(&self) -> &'static str {
        match self.exit_type {
            ExitType::Completed => "Sessiya tugadi",
            ExitType::Distracted | ExitType::Other => "Sessiya to'xtatildi",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusSession {
    pub id: SessionId,
    pub owner: OwnerId,
    pub planned_minutes: u32,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    /// Derived from `started_at` and `ended_at`; zero while active.
    pub actual_minutes: u32,
    pub exit_type: ExitType,
    pub exit_reason: Option<String>,
}

/// Resolve the requested planned duration.
///
/// `None` falls back to `default`.
///
/// # Errors
/// Returns `InvalidArgument` for non-positive or oversized values.
pub fn resolve_planned_minutes(requested: Option<i64>, default: u32) -> Result<u32, DomainError> {
    match requested {
        None => Ok(default),
        Some(m) if m <= 0 => Err(DomainError::invalid(
            "planned_minutes",
            format!("must be positive, got {m}"),
        )),
        Some(m) => u32::try_from(m)
            .map_err(|_| DomainError::invalid("planned_minutes", format!("{m} is too large"))),
    }
}

/// Whole minutes between two instants, floored, never negative.
pub fn elapsed_minutes(started_at: DateTime<Utc>, ended_at: DateTime<Utc>) -> u32 {
    let secs = (ended_at - started_at).num_seconds().max(0);
    u32::try_from(secs / 60).unwrap_or(u32::MAX)
}

impl FocusSession {
    /// Create an active session starting at `now`.
    ///
    /// # Errors
    /// Returns `InvalidArgument` if `planned_minutes` is zero.
    pub fn start(
        id: SessionId,
        owner: OwnerId,
        planned_minutes: u32,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if planned_minutes == 0 {
            return Err(DomainError::invalid("planned_minutes", "must be positive, got 0"));
        }
        Ok(Self {
            id,
            owner,
            planned_minutes,
            started_at: now,
            ended_at: None,
            actual_minutes: 0,
            exit_type: ExitType::Completed,
            exit_reason: None,
        })
    }

    pub fn state(&self) -> SessionState {
        if self.ended_at.is_some() {
            SessionState::Ended
        } else {
            SessionState::Active
        }
    }

    pub fn is_active(&self) -> bool {
        self.state() == SessionState::Active
    }

    /// Minutes elapsed so far, without ending the session.
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> u32 {
        elapsed_minutes(self.started_at, self.ended_at.unwrap_or(now))
    }

    /// The `Active -> Ended` transition.
    ///
    /// Sets `ended_at`, `actual_minutes`, `exit_type` and `exit_reason` once.
    /// A distracted exit with a non-blank reason is classified and answered.
    ///
    /// # Errors
    /// Returns `AlreadyEnded` if the session is no longer active.
    pub fn end(&mut self, request: EndRequest, now: DateTime<Utc>) -> Result<EndOutcome, DomainError> {
        if !self.is_active() {
            return Err(DomainError::AlreadyEnded(self.id));
        }

        self.ended_at = Some(now);
        self.actual_minutes = elapsed_minutes(self.started_at, now);
        self.exit_type = request.exit_type;
        self.exit_reason = request.exit_reason;

        Ok(self.outcome())
    }

    /// Rebuild the outcome of an ended session from its stored fields.
    pub fn outcome(&self) -> EndOutcome {
        let classification = match (&self.exit_reason, self.exit_type) {
            (Some(reason), ExitType::Distracted) if !reason.is_empty() => {
                Some(classify_reason(reason))
            }
            _ => None,
        };
        let response = classification.as_ref().map(respond_to_exit);
        EndOutcome {
            session_id: self.id,
            actual_minutes: self.actual_minutes,
            exit_type: self.exit_type,
            classification,
            response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Category;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
    }

    #[test]
    fn start_creates_active_session() {
        let session = FocusSession::start(1, 1, 25, t0()).unwrap();
        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.actual_minutes, 0);
        assert_eq!(session.exit_type, ExitType::Completed);
        assert!(session.ended_at.is_none());
    }

    #[test]
    fn planned_minutes_resolution() {
        assert_eq!(resolve_planned_minutes(None, 25).unwrap(), 25);
        assert_eq!(resolve_planned_minutes(Some(50), 25).unwrap(), 50);
        assert!(matches!(
            resolve_planned_minutes(Some(0), 25),
            Err(DomainError::InvalidArgument { .. })
        ));
        assert!(resolve_planned_minutes(Some(-5), 25).is_err());
        assert!(resolve_planned_minutes(Some(i64::MAX), 25).is_err());
        assert!(FocusSession::start(1, 1, 0, t0()).is_err());
    }

    #[test]
    fn distracted_end_classifies_reason() {
        let mut session = FocusSession::start(1, 1, 25, t0()).unwrap();
        let outcome = session
            .end(EndRequest::distracted("zerikdim"), t0() + Duration::minutes(30))
            .unwrap();
        assert_eq!(outcome.actual_minutes, 30);
        assert_eq!(
            outcome.classification.as_ref().map(|c| c.category),
            Some(Category::Distraction)
        );
        assert!(outcome.response.as_deref().unwrap().contains("zerikdim"));
        assert_eq!(session.state(), SessionState::Ended);
        assert_eq!(outcome.message(), "Sessiya to'xtatildi");
    }

    #[test]
    fn completed_end_has_no_reply() {
        let mut session = FocusSession::start(1, 1, 25, t0()).unwrap();
        let outcome = session
            .end(EndRequest::completed(), t0() + Duration::seconds(25 * 60 + 59))
            .unwrap();
        assert_eq!(outcome.actual_minutes, 25);
        assert!(outcome.classification.is_none());
        assert!(outcome.response.is_none());
        assert_eq!(outcome.message(), "Sessiya tugadi");
    }

    #[test]
    fn reason_without_distracted_exit_is_not_classified() {
        let mut session = FocusSession::start(1, 1, 25, t0()).unwrap();
        let outcome = session
            .end(
                EndRequest {
                    exit_reason: Some("youtube".into()),
                    exit_type: ExitType::Other,
                },
                t0(),
            )
            .unwrap();
        assert!(outcome.response.is_none());
        assert_eq!(session.exit_reason.as_deref(), Some("youtube"));
    }

    #[test]
    fn whitespace_reason_gets_the_unknown_reply() {
        let mut session = FocusSession::start(1, 1, 25, t0()).unwrap();
        let outcome = session.end(EndRequest::distracted("   "), t0()).unwrap();
        let classification = outcome.classification.unwrap();
        assert_eq!(classification.category, Category::Unknown);
        assert_eq!(classification.matched_reason, "   ");
        assert!(outcome.response.is_some());
    }

    #[test]
    fn empty_reason_is_not_classified() {
        let mut session = FocusSession::start(1, 1, 25, t0()).unwrap();
        let outcome = session.end(EndRequest::distracted(""), t0()).unwrap();
        assert!(outcome.classification.is_none());
        assert!(outcome.response.is_none());
    }

    #[test]
    fn second_end_is_rejected_and_keeps_values() {
        let mut session = FocusSession::start(9, 1, 25, t0()).unwrap();
        session
            .end(EndRequest::distracted("kino"), t0() + Duration::minutes(12))
            .unwrap();
        let before = session.clone();

        let err = session
            .end(EndRequest::completed(), t0() + Duration::minutes(90))
            .unwrap_err();
        assert_eq!(err, DomainError::AlreadyEnded(9));
        assert_eq!(session, before);
        assert_eq!(session.actual_minutes, 12);
    }

    #[test]
    fn clock_skew_never_goes_negative() {
        assert_eq!(elapsed_minutes(t0(), t0() - Duration::minutes(5)), 0);
        assert_eq!(elapsed_minutes(t0(), t0() + Duration::seconds(59)), 0);
        assert_eq!(elapsed_minutes(t0(), t0() + Duration::seconds(60)), 1);
    }

    #[test]
    fn elapsed_at_freezes_after_end() {
        let mut session = FocusSession::start(1, 1, 25, t0()).unwrap();
        assert_eq!(session.elapsed_at(t0() + Duration::minutes(4)), 4);
        session
            .end(EndRequest::completed(), t0() + Duration::minutes(5))
            .unwrap();
        assert_eq!(session.elapsed_at(t0() + Duration::hours(3)), 5);
    }

    #[test]
    fn exit_type_parsing() {
        assert_eq!("Distracted".parse::<ExitType>().unwrap(), ExitType::Distracted);
        assert_eq!("other".parse::<ExitType>().unwrap(), ExitType::Other);
        assert!("quit".parse::<ExitType>().is_err());
        assert_eq!(ExitType::Completed.to_string(), "completed");
    }
}
