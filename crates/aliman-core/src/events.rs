use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chat::ChatExchange;
use crate::classifier::Category;
use crate::dialogue::{ChatContext, ChatIntent};
use crate::plan::{DailyPlan, PlanId};
use crate::session::{EndOutcome, ExitType, FocusSession, OwnerId, SessionId};

/// Every state change in the system produces an Event.
/// Front ends print or forward them; nothing here stores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    SessionStarted {
        session_id: SessionId,
        owner: OwnerId,
        planned_minutes: u32,
        at: DateTime<Utc>,
    },
    SessionEnded {
        session_id: SessionId,
        actual_minutes: u32,
        exit_type: ExitType,
        category: Option<Category>,
        response: Option<String>,
        message: String,
        at: DateTime<Utc>,
    },
    PlanAdded {
        plan_id: PlanId,
        text: String,
        at: DateTime<Utc>,
    },
    PlanCompleted {
        plan_id: PlanId,
        at: DateTime<Utc>,
    },
    ChatReplied {
        context: ChatContext,
        intent: ChatIntent,
        reply: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn session_started(session: &FocusSession) -> Self {
        Event::SessionStarted {
            session_id: session.id,
            owner: session.owner,
            planned_minutes: session.planned_minutes,
            at: session.started_at,
        }
    }

    pub fn session_ended(outcome: &EndOutcome, at: DateTime<Utc>) -> Self {
        Event::SessionEnded {
            session_id: outcome.session_id,
            actual_minutes: outcome.actual_minutes,
            exit_type: outcome.exit_type,
            category: outcome.classification.as_ref().map(|c| c.category),
            response: outcome.response.clone(),
            message: outcome.message().to_string(),
            at,
        }
    }

    pub fn plan_added(plan: &DailyPlan, at: DateTime<Utc>) -> Self {
        Event::PlanAdded {
            plan_id: plan.id,
            text: plan.text.clone(),
            at,
        }
    }

    pub fn plan_completed(plan: &DailyPlan, at: DateTime<Utc>) -> Self {
        Event::PlanCompleted {
            plan_id: plan.id,
            at,
        }
    }

    /// Stamped with the reply's creation time.
    pub fn chat_replied(exchange: &ChatExchange) -> Self {
        Event::ChatReplied {
            context: exchange.context,
            intent: exchange.intent,
            reply: exchange.reply.content.clone(),
            at: exchange.reply.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::EndRequest;
    use chrono::{Duration, TimeZone};

    #[test]
    fn events_are_tagged_by_type() {
        let at = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let mut session = FocusSession::start(3, 1, 25, at).unwrap();
        let started = serde_json::to_value(Event::session_started(&session)).unwrap();
        assert_eq!(started["type"], "session_started");
        assert_eq!(started["planned_minutes"], 25);

        let end_at = at + Duration::minutes(30);
        let outcome = session.end(EndRequest::distracted("tiktok"), end_at).unwrap();
        let ended = serde_json::to_value(Event::session_ended(&outcome, end_at)).unwrap();
        assert_eq!(ended["type"], "session_ended");
        assert_eq!(ended["category"], "distraction");
        assert_eq!(ended["exit_type"], "distracted");
        assert_eq!(ended["actual_minutes"], 30);
    }

    #[test]
    fn plan_and_chat_events_carry_their_source() {
        let at = Utc.with_ymd_and_hms(2026, 3, 2, 18, 0, 0).unwrap();
        let plan = DailyPlan {
            id: 11,
            owner: 1,
            text: "sport".into(),
            date: at.date_naive(),
            completed: true,
        };
        assert_eq!(
            Event::plan_completed(&plan, at),
            Event::PlanCompleted { plan_id: 11, at }
        );

        let ex = crate::chat::exchange("salom", ChatContext::Dashboard, "Aziz", at).unwrap();
        let replied = serde_json::to_value(Event::chat_replied(&ex)).unwrap();
        assert_eq!(replied["type"], "chat_replied");
        assert_eq!(replied["intent"], "greeting");
        assert_eq!(replied["context"], "dashboard");
        assert_eq!(replied["reply"], ex.reply.content.as_str());
    }
}
