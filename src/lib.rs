//! License notification engine.
//!
//! Turns license events raised by the protection SDK (expiring licenses,
//! exhausted unit counters, missing licenses, ...) into user-facing notices.
//! Texts come from a localized INI message catalog; concurrent raisers of the
//! same logical event are coalesced so that the user sees it once and every
//! raiser receives the same answer.
//!
//! ```ignore
//! let config = NotifierConfig::load()?;
//! let dispatcher = NotificationDispatcher::from_config(&config, renderer);
//! let choice = dispatcher.notify(EXPIRATION_TIME_WARNING, parameters);
//! ```

mod catalog;
mod config;
pub mod constants;
mod coordinator;
mod dispatcher;
mod errors;
mod message;

pub use catalog::*;
pub use config::*;
pub use coordinator::*;
pub use dispatcher::*;
pub use errors::*;
pub use message::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
