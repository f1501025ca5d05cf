//! Session state tracking and the session service

mod manager;
mod state;

pub use manager::{InMemorySessionService, Session, SessionEvent, SessionKey, SessionService};
pub use state::{SessionState, SessionSummary};
