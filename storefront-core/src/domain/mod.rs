//! Core domain entities
//!
//! Plain data structures with presence validation - no I/O.

mod credentials;
pub mod flow;
pub mod navigation;
pub mod result;
mod session;
pub mod token;
mod user;

pub use credentials::{Credentials, Registration};
pub use flow::{FlowOutcome, FlowState, FlowStatus, IdentityState, SocialProvider};
pub use navigation::{Navigation, Route, Routes};
pub use session::Session;
pub use token::TokenClaims;
pub use user::{Role, UserProfile};
