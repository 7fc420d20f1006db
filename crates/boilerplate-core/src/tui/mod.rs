//! Terminal front end built on cliclack
//!
//! Only compiled with the `tui` feature. [`run`] drives the wizard and the
//! generator with inline prompts and one spinner per step.

mod prompts;

pub use crate::wizard::CreateArgs;
pub use prompts::{run, CliclackPrompter, CliclackReporter, RunOutcome};
