//! End-of-day review.
//!
//! Aggregates one day's sessions and plans into counts and picks a narrative
//! from a fixed decision table. Inputs arrive already filtered to the day; the
//! day boundary is the caller's policy (see [`crate::day::DayBoundary`]).

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::plan::{completion_counts, DailyPlan};
use crate::session::{ExitType, FocusSession, OwnerId};

/// Minutes of undistracted focus that make an excellent day.
pub const EXCELLENT_FOCUS_MINUTES: u64 = 60;
/// More distractions than this and tomorrow needs to be better.
pub const DISTRACTION_LIMIT: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Excellent,
    GoodStart,
    TryHarder,
    NoSessions,
    Decent,
}

impl Verdict {
    /// First matching row wins.
    pub fn decide(distraction_count: u32, total_focus_minutes: u64) -> Self {
        if distraction_count == 0 && total_focus_minutes >= EXCELLENT_FOCUS_MINUTES {
            Verdict::Excellent
        } else if distraction_count == 0 && total_focus_minutes > 0 {
            Verdict::GoodStart
        } else if distraction_count > DISTRACTION_LIMIT {
            Verdict::TryHarder
        } else if total_focus_minutes == 0 {
            Verdict::NoSessions
        } else {
            Verdict::Decent
        }
    }

    pub fn narrative(&self) -> &'static str {
        match self {
            Verdict::Excellent => "🏆 Ajoyib kun! Bugun a'lo fokuslandingiz!",
            Verdict::GoodStart => {
                "👍 Yaxshi boshlash! Ertaga yanada ko'proq fokus vaqti qo'shing."
            }
            Verdict::TryHarder => {
                "💪 Ertaga yaxshiroq bo'ladi. Telefon/ijtimoiy tarmoqlarni o'chiring!"
            }
            Verdict::NoSessions => {
                "📅 Bugun fokus sessiyasi bo'lmadi. Ertaga boshlang — birinchi qadam eng muhimi!"
            }
            Verdict::Decent => "📈 Yaxshi kun o'tdi. Ertaga yanada yaxshiroq bo'lasiz!",
        }
    }
}

/// Counts shared by the dashboard and the review.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStats {
    pub sessions: u32,
    pub total_minutes: u64,
    pub distractions: u32,
}

impl DayStats {
    pub fn from_sessions(sessions: &[FocusSession]) -> Self {
        sessions.iter().fold(Self::default(), |mut acc, s| {
            acc.sessions = acc.sessions.saturating_add(1);
            acc.total_minutes += u64::from(s.actual_minutes);
            if s.exit_type == ExitType::Distracted {
                acc.distractions = acc.distractions.saturating_add(1);
            }
            acc
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReviewSummary {
    pub owner: OwnerId,
    pub date: NaiveDate,
    pub total_sessions: u32,
    pub distraction_count: u32,
    pub total_focus_minutes: u64,
    pub completed_plan_count: u32,
    pub total_plan_count: u32,
    pub verdict: Verdict,
    pub narrative: String,
}

/// Summarize one day. Pure: same inputs, same summary.
pub fn summarize(
    owner: OwnerId,
    date: NaiveDate,
    sessions: &[FocusSession],
    plans: &[DailyPlan],
) -> DailyReviewSummary {
    let stats = DayStats::from_sessions(sessions);
    let (completed_plan_count, total_plan_count) = completion_counts(plans);
    let verdict = Verdict::decide(stats.distractions, stats.total_minutes);

    DailyReviewSummary {
        owner,
        date,
        total_sessions: stats.sessions,
        distraction_count: stats.distractions,
        total_focus_minutes: stats.total_minutes,
        completed_plan_count,
        total_plan_count,
        verdict,
        narrative: verdict.narrative().to_string(),
    }
}

impl DailyReviewSummary {
    /// Full report text. The plan line is omitted on days without plans.
    pub fn render(&self) -> String {
        let mut out = String::from("📊 Bugungi tahlil:\n\n");
        let _ = writeln!(
            out,
            "⏱️  Fokus vaqti: {} daqiqa ({} sessiya)",
            self.total_focus_minutes, self.total_sessions
        );
        let _ = writeln!(out, "⚠️  Chalg'igan holatlar: {} marta", self.distraction_count);
        if self.total_plan_count > 0 {
            let _ = writeln!(
                out,
                "✅  Bajarilgan rejalar: {}/{}",
                self.completed_plan_count, self.total_plan_count
            );
        }
        out.push('\n');
        out.push_str(&self.narrative);
        out
    }
}
