//! # Aliman Core Library
//!
//! This library provides the behavioral core of Aliman, a focus-session
//! companion. Front ends (the bundled CLI, or any request-handling layer)
//! resolve who the user is and what time it is, then call into this crate.
//!
//! ## Architecture
//!
//! - **Classifier**: ordered keyword-set membership over case-folded text
//! - **Dialogue**: canned, template-filled replies for exits and chat
//! - **Session**: the `Active -> Ended` state machine with at-most-once ending
//! - **Review**: end-of-day aggregation and narrative selection
//! - **Storage**: SQLite persistence and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`classify_reason`]: exit reason classification
//! - [`respond_to_chat`] / [`respond_to_exit`]: reply generation
//! - [`FocusSession`] and [`SessionArena`]: session lifecycle
//! - [`summarize`]: daily review
//! - [`Database`] and [`Config`]: persistence and configuration

pub mod chat;
pub mod classifier;
pub mod clock;
pub mod day;
pub mod dialogue;
pub mod error;
pub mod events;
pub mod plan;
pub mod review;
pub mod session;
pub mod storage;

pub use chat::{ChatExchange, ChatMessage, ChatRole};
pub use classifier::{classify, classify_reason, Category, ClassificationResult};
pub use clock::{Clock, ManualClock, SystemClock};
pub use day::DayBoundary;
pub use dialogue::{analyze_exit, daily_question, respond_to_chat, respond_to_exit, ChatContext, ChatIntent};
pub use error::{ConfigError, CoreError, DatabaseError, DomainError};
pub use events::Event;
pub use plan::DailyPlan;
pub use review::{summarize, DailyReviewSummary, DayStats, Verdict};
pub use session::{
    EndOutcome, EndRequest, ExitType, FocusSession, OwnerId, SessionArena, SessionId,
    SessionState,
};
pub use storage::{Config, Database};
