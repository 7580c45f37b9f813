// ABOUTME: Command module aggregator for the medic CLI.
// ABOUTME: Re-exports the alert, check, restart and probe command handlers.

mod alert;
mod check;
mod context;
mod probe;
mod restart;

pub use alert::alert;
pub use check::check;
pub use probe::probe;
pub use restart::restart;
