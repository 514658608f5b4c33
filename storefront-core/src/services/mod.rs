//! Service layer - auth flows and presentation logic
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a single page or feature area.

pub mod google_sign_in;
pub mod logging;
pub mod login;
mod marquee;
mod session;
pub mod signup;

#[cfg(test)]
pub(crate) mod testing;

pub use google_sign_in::GoogleSignIn;
pub use logging::{log_quietly, redact, EntryPoint, EventCount, LogEntry, LogEvent, LoggingService};
pub use login::LoginFlow;
pub use marquee::{Marquee, DEFAULT_ITEMS, ITEM_PADDING};
pub use session::{SessionService, SessionSummary};
pub use signup::SignupFlow;
