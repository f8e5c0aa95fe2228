//! Resource console core
//!
//! Everything here is independent of the terminal, so it can be driven by
//! the TUI, by the one-shot CLI, or by tests.
//!
//! - [`form`] - Form inputs and focus handling
//! - [`status`] - Self-hiding status areas
//! - [`ops`] - Validation, the operations themselves, and result rendering

pub mod form;
pub mod ops;
pub mod status;

pub use form::{FormKind, FormState};
pub use ops::{execute, Outcome, Submission};
pub use status::{StatusArea, StatusKind, StatusUpdate};
