//! Tariff editing session
//!
//! Drives one tariff draft from creation (or fetch-for-edit) through
//! validation to submission against the remote store. All mutation and
//! validation are synchronous; the only async operations are the store
//! round trips.

pub mod session;

pub use session::EditorSession;
