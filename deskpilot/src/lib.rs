//! Remote command intake for a desktop machine
//!
//! Short text or voice commands arrive from a phone, pass a shared-token
//! check, get parsed into a structured action and run against an injected
//! desktop automation engine. Every submission is recorded in an ordered,
//! bounded log that clients poll.
//!
//! ```no_run
//! use deskpilot::{platforms, CommandQueue, CommandSource, Config};
//!
//! let config = Config::new(None);
//! let engine = platforms::create_engine(&config.resolved_home_dir())?;
//! let queue = CommandQueue::from_config(&config, engine);
//! let entry = queue.submit("open browser", CommandSource::Text)?;
//! println!("#{} {:?}: {}", entry.id, entry.status, entry.output);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod errors;
pub mod executor;
pub mod guard;
pub mod parser;
pub mod platforms;
pub mod queue;
#[cfg(test)]
mod tests;
pub mod types;

pub use config::Config;
pub use errors::{AutomationError, CommandError};
pub use executor::ActionExecutor;
pub use guard::TokenGuard;
pub use parser::{parse, ParsedAction};
pub use platforms::{AppTarget, DesktopEngine};
pub use queue::CommandQueue;
pub use types::{CommandEntry, CommandSource, CommandStatus, Outcome};
