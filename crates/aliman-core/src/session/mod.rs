mod arena;
mod state;

pub use arena::SessionArena;
pub use state::{
    elapsed_minutes, resolve_planned_minutes, EndOutcome, EndRequest, ExitType, FocusSession,
    OwnerId, SessionId, SessionState, DEFAULT_PLANNED_MINUTES,
};
