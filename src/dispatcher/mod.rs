//! Turns raised events into notices.
//!
//! [`NoticeDescriptor`] maps every event code to its presentation, the
//! [`NotificationDispatcher`] composes the notice from the catalog and hands
//! it to a [`Renderer`].

mod descriptor;
mod dispatcher;
mod render;
pub use descriptor::*;
pub use dispatcher::*;
pub use render::*;
