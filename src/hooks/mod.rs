//! Agent turn and model call hooks
//!
//! ## Lifecycle
//!
//! ```text
//! before_agent ──► [refused: limit message]
//!      │
//!      ▼
//! before_model ──► model ──► after_model   (repeats per model call)
//!      │
//!      ▼
//! after_agent
//! ```

mod callbacks;
mod context;

pub use callbacks::SessionHooks;
pub use context::{CallbackContext, Invocation};
