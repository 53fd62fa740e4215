//! Practice sessions
//!
//! A session is the single owned state object behind one learner's page:
//! the current problem, the test case ledger, the editor contents and the
//! generate → run → submit flags. [`SessionController`] implements the state
//! machine; [`SessionStore`] keeps live sessions addressable by id.

pub mod controller;
pub mod store;

pub use controller::{GenerationTicket, SessionController, TestRunTicket};
pub use store::{SessionStore, SharedSession};
