//! # Atelier Production
//!
//! The production workflow over a fiche: an ordered stepper with
//! confirmation-gated forward transitions and direct (by default
//! non-cascading) reverts, plus the client notification built once the
//! workflow completes.

pub mod notification;
pub mod stepper;

pub use notification::ClientNotification;
pub use stepper::{Confirmation, RevertPolicy, Stepper};
