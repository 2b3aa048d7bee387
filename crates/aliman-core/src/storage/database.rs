//! SQLite-based storage.
//!
//! Provides persistent storage for:
//! - Focus sessions
//! - Daily plans
//! - Chat history
//!
//! Ending a session is a compare-and-swap on `ended_at IS NULL` inside an
//! immediate transaction, so at most one `end` per session id ever lands.

use std::path::Path;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};

use super::data_dir;
use crate::chat::{ChatExchange, ChatMessage, ChatRole};
use crate::day::DayBoundary;
use crate::error::{DatabaseError, Result, DomainError};
use crate::plan::{validate_plan_text, DailyPlan, PlanId};
use crate::session::{EndOutcome, EndRequest, ExitType, FocusSession, OwnerId, SessionId};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fixed-width UTC text so range filters can compare strings.
fn encode_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_ts(column: &'static str, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| corrupt(column, raw))
}

fn decode_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| corrupt("date", raw))
}

fn corrupt(column: &'static str, raw: &str) -> crate::error::CoreError {
    DatabaseError::Corrupt {
        column,
        value: raw.to_string(),
    }
    .into()
}

/// Raw `focus_sessions` row before timestamp decoding.
struct SessionRow {
    id: SessionId,
    owner: OwnerId,
    planned_minutes: u32,
    started_at: String,
    ended_at: Option<String>,
    actual_minutes: u32,
    exit_type: String,
    exit_reason: Option<String>,
}

const SESSION_COLUMNS: &str = "id, owner_id, planned_minutes, started_at, ended_at, \
                               actual_minutes, exit_type, exit_reason";

impl SessionRow {
    fn read(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            owner: row.get(1)?,
            planned_minutes: row.get(2)?,
            started_at: row.get(3)?,
            ended_at: row.get(4)?,
            actual_minutes: row.get(5)?,
            exit_type: row.get(6)?,
            exit_reason: row.get(7)?,
        })
    }

    fn into_session(self) -> Result<FocusSession> {
        let exit_type = self
            .exit_type
            .parse::<ExitType>()
            .map_err(|_| corrupt("exit_type", &self.exit_type))?;
        Ok(FocusSession {
            id: self.id,
            owner: self.owner,
            planned_minutes: self.planned_minutes,
            started_at: decode_ts("started_at", &self.started_at)?,
            ended_at: self
                .ended_at
                .as_deref()
                .map(|raw| decode_ts("ended_at", raw))
                .transpose()?,
            actual_minutes: self.actual_minutes,
            exit_type,
            exit_reason: self.exit_reason,
        })
    }
}

/// SQLite database for sessions, plans and chat history.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data dir>/aliman.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("aliman.db"))
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS focus_sessions (
                    id              INTEGER PRIMARY KEY AUTOINCREMENT,
                    owner_id        INTEGER NOT NULL,
                    planned_minutes INTEGER NOT NULL DEFAULT 25,
                    started_at      TEXT NOT NULL,
                    ended_at        TEXT,
                    actual_minutes  INTEGER NOT NULL DEFAULT 0,
                    exit_type       TEXT NOT NULL DEFAULT 'completed',
                    exit_reason     TEXT
                );

                CREATE TABLE IF NOT EXISTS daily_plans (
                    id        INTEGER PRIMARY KEY AUTOINCREMENT,
                    owner_id  INTEGER NOT NULL,
                    plan_text TEXT NOT NULL,
                    date      TEXT NOT NULL,
                    completed INTEGER NOT NULL DEFAULT 0
                );

                CREATE TABLE IF NOT EXISTS chat_messages (
                    id         INTEGER PRIMARY KEY AUTOINCREMENT,
                    owner_id   INTEGER NOT NULL,
                    role       TEXT NOT NULL,
                    content    TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_sessions_owner_started ON focus_sessions(owner_id, started_at);
                CREATE INDEX IF NOT EXISTS idx_plans_owner_date ON daily_plans(owner_id, date);
                CREATE INDEX IF NOT EXISTS idx_chat_owner ON chat_messages(owner_id, id);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        tracing::debug!("database schema ready");
        Ok(())
    }

    // ── Sessions ─────────────────────────────────────────────────────

    /// Insert a new active session.
    ///
    /// # Errors
    /// `InvalidArgument` for a zero planned duration, or a database error.
    pub fn start_session(
        &self,
        owner: OwnerId,
        planned_minutes: u32,
        now: DateTime<Utc>,
    ) -> Result<FocusSession> {
        let mut session = FocusSession::start(0, owner, planned_minutes, now)?;
        self.conn.execute(
            "INSERT INTO focus_sessions (owner_id, planned_minutes, started_at, exit_type)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                owner,
                planned_minutes,
                encode_ts(now),
                session.exit_type.as_str()
            ],
        )?;
        session.id = self.conn.last_insert_rowid();
        tracing::info!(session_id = session.id, owner, planned_minutes, "focus session started");
        Ok(session)
    }

    fn load_session(conn: &Connection, id: SessionId, owner: OwnerId) -> Result<FocusSession> {
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM focus_sessions WHERE id = ?1 AND owner_id = ?2"
        );
        let row = conn
            .query_row(&sql, params![id, owner], SessionRow::read)
            .optional()?
            .ok_or_else(|| DomainError::session_not_found(id))?;
        row.into_session()
    }

    /// Look up a session owned by `owner`.
    ///
    /// # Errors
    /// `NotFound` if the id does not belong to `owner`.
    pub fn session(&self, id: SessionId, owner: OwnerId) -> Result<FocusSession> {
        Self::load_session(&self.conn, id, owner)
    }

    /// End a session owned by `owner`.
    ///
    /// # Errors
    /// `NotFound` if the id does not belong to `owner`, `AlreadyEnded` if it
    /// was ended before, or a database error.
    pub fn end_session(
        &self,
        id: SessionId,
        owner: OwnerId,
        request: EndRequest,
        now: DateTime<Utc>,
    ) -> Result<EndOutcome> {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?;
        let mut session = Self::load_session(&tx, id, owner)?;
        let outcome = match session.end(request, now) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(session_id = id, "rejected repeated end");
                return Err(err.into());
            }
        };

        let updated = tx.execute(
            "UPDATE focus_sessions
             SET ended_at = ?1, actual_minutes = ?2, exit_reason = ?3, exit_type = ?4
             WHERE id = ?5 AND owner_id = ?6 AND ended_at IS NULL",
            params![
                encode_ts(now),
                session.actual_minutes,
                session.exit_reason,
                session.exit_type.as_str(),
                id,
                owner,
            ],
        )?;
        if updated == 0 {
            return Err(DomainError::AlreadyEnded(id).into());
        }
        tx.commit()?;

        tracing::info!(
            session_id = id,
            actual_minutes = outcome.actual_minutes,
            exit_type = %outcome.exit_type,
            "focus session ended"
        );
        Ok(outcome)
    }

    /// Sessions of `owner` that started on the local `date`, oldest first.
    pub fn sessions_on(
        &self,
        owner: OwnerId,
        date: NaiveDate,
        day: &DayBoundary,
    ) -> Result<Vec<FocusSession>> {
        let (start, end) = day.range_of(date);
        let sql = format!(
            "SELECT {SESSION_COLUMNS} FROM focus_sessions
             WHERE owner_id = ?1 AND started_at >= ?2 AND started_at < ?3
             ORDER BY started_at, id"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![owner, encode_ts(start), encode_ts(end)], SessionRow::read)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(SessionRow::into_session).collect()
    }

    // ── Plans ────────────────────────────────────────────────────────

    /// Add a plan for `date`.
    ///
    /// # Errors
    /// `InvalidArgument` for blank text, or a database error.
    pub fn add_plan(&self, owner: OwnerId, text: &str, date: NaiveDate) -> Result<DailyPlan> {
        let text = validate_plan_text(text)?;
        self.conn.execute(
            "INSERT INTO daily_plans (owner_id, plan_text, date) VALUES (?1, ?2, ?3)",
            params![owner, text, date.format(DATE_FORMAT).to_string()],
        )?;
        Ok(DailyPlan {
            id: self.conn.last_insert_rowid(),
            owner,
            text: text.to_string(),
            date,
            completed: false,
        })
    }

    /// Mark a plan done.
    ///
    /// # Errors
    /// `NotFound` if the id does not belong to `owner`.
    pub fn complete_plan(&self, owner: OwnerId, id: PlanId) -> Result<DailyPlan> {
        let updated = self.conn.execute(
            "UPDATE daily_plans SET completed = 1 WHERE id = ?1 AND owner_id = ?2",
            params![id, owner],
        )?;
        if updated == 0 {
            return Err(DomainError::plan_not_found(id).into());
        }
        tracing::info!(plan_id = id, owner, "plan completed");

        let (text, date, completed): (String, String, bool) = self.conn.query_row(
            "SELECT plan_text, date, completed FROM daily_plans WHERE id = ?1",
            params![id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;
        Ok(DailyPlan {
            id,
            owner,
            text,
            date: decode_date(&date)?,
            completed,
        })
    }

    /// Plans of `owner` for `date`, newest first.
    pub fn plans_on(&self, owner: OwnerId, date: NaiveDate) -> Result<Vec<DailyPlan>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, plan_text, completed FROM daily_plans
             WHERE owner_id = ?1 AND date = ?2
             ORDER BY id DESC",
        )?;
        let rows = stmt.query_map(params![owner, date.format(DATE_FORMAT).to_string()], |row| {
            Ok(DailyPlan {
                id: row.get(0)?,
                owner,
                text: row.get(1)?,
                date,
                completed: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // ── Chat ─────────────────────────────────────────────────────────

    /// Store the user message and its reply, in that order.
    pub fn record_exchange(&self, owner: OwnerId, exchange: &ChatExchange) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for message in [&exchange.message, &exchange.reply] {
            tx.execute(
                "INSERT INTO chat_messages (owner_id, role, content, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    owner,
                    message.role.as_str(),
                    message.content,
                    encode_ts(message.created_at)
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// The most recent `limit` messages, oldest first.
    pub fn chat_history(&self, owner: OwnerId, limit: u32) -> Result<Vec<ChatMessage>> {
        let mut stmt = self.conn.prepare(
            "SELECT role, content, created_at FROM chat_messages
             WHERE owner_id = ?1
             ORDER BY id DESC
             LIMIT ?2",
        )?;
        let rows = stmt
            .query_map(params![owner, limit], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut messages = rows
            .into_iter()
            .map(|(role, content, created_at)| {
                Ok(ChatMessage {
                    role: role.parse::<ChatRole>().map_err(|_| corrupt("role", &role))?,
                    content,
                    created_at: decode_ts("created_at", &created_at)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        messages.reverse();
        Ok(messages)
    }
}
