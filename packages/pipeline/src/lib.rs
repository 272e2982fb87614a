// Bulk AI image generation - orchestration core
//
// Drains a durable, externally stored keyword work queue one row per
// invocation, runs the content → image → persist → mark-success step chain
// for each keyword, and re-derives all progress from the external status
// ledger so a restarted process never repeats or loses work.
//
// The spreadsheet backend, the generative APIs, and the document store are
// collaborators behind the traits in `kernel`; this crate owns only the
// orchestration.

pub mod config;
pub mod error;
pub mod generation;
pub mod kernel;
pub mod queue;
pub mod testing;

pub use config::Config;
pub use error::{ApiError, RunError};
pub use generation::{RunController, RunOutcome};
