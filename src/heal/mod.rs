// ABOUTME: The shared health-check, restart and verify sequence.
// ABOUTME: Exports the Healer used by every trigger, plus its building blocks.

mod error;
mod healer;
mod lease;
mod outcome;
mod verify;

pub use error::{HealError, HealErrorKind, LeaseHolderInfo};
pub use healer::{Healer, LeaseSettings};
pub use lease::{LeaseInfo, RestartLease};
pub use outcome::{Action, HealOutcome, OutcomeStatus};
pub use verify::{restart_and_verify, verify_restart};
