//! Daily plan records.
//!
//! A plan is one line of intent for a calendar day, later ticked off. The
//! daily review only needs how many exist and how many are done.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::session::OwnerId;

pub type PlanId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPlan {
    pub id: PlanId,
    pub owner: OwnerId,
    pub text: String,
    pub date: NaiveDate,
    pub completed: bool,
}

/// Trim plan text and reject it if nothing is left.
///
/// # Errors
/// Returns `InvalidArgument` for empty or whitespace-only text.
pub fn validate_plan_text(text: &str) -> Result<&str, DomainError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid("plan_text", "must not be empty"));
    }
    Ok(trimmed)
}

/// `(completed, total)` over a day's plans.
pub fn completion_counts(plans: &[DailyPlan]) -> (u32, u32) {
    let completed = plans.iter().filter(|p| p.completed).count();
    (saturating_u32(completed), saturating_u32(plans.len()))
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(id: PlanId, completed: bool) -> DailyPlan {
        DailyPlan {
            id,
            owner: 1,
            text: format!("plan {id}"),
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            completed,
        }
    }

    #[test]
    fn text_is_trimmed() {
        assert_eq!(validate_plan_text("  kitob o'qish \n").unwrap(), "kitob o'qish");
    }

    #[test]
    fn blank_text_is_rejected() {
        assert!(matches!(
            validate_plan_text(" \t "),
            Err(DomainError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn counts_completed_plans() {
        assert_eq!(completion_counts(&[]), (0, 0));
        assert_eq!(
            completion_counts(&[plan(1, true), plan(2, false), plan(3, true)]),
            (2, 3)
        );
    }
}
