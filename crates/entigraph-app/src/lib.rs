//! Entigraph Application
//!
//! Command-line shell around the editor core: loads configuration,
//! replays recorded interactions and exports the resulting diagram.

mod app;
mod cli;
mod clipboard;
mod error;
mod replay;

pub use app::App;
pub use cli::Cli;
pub use clipboard::copy_text;
pub use error::{AppError, AppResult};
pub use replay::{parse_script, replay, ReplaySummary};
