pub mod chat;
pub mod config;
pub mod dashboard;
pub mod focus;
pub mod plan;
pub mod review;

use aliman_core::{Clock, Config, Database, DayBoundary, SystemClock};
use chrono::{DateTime, NaiveDate, Utc};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// What every command needs: the store, the profile and "now".
pub struct Env {
    pub db: Database,
    pub config: Config,
    pub day: DayBoundary,
    pub now: DateTime<Utc>,
}

impl Env {
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let day = config.day_boundary()?;
        Ok(Self {
            db: Database::open()?,
            day,
            config,
            now: SystemClock.now(),
        })
    }

    pub fn owner(&self) -> aliman_core::OwnerId {
        self.config.profile.owner_id
    }

    pub fn today(&self) -> NaiveDate {
        self.day.date_of(self.now)
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
