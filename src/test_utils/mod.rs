//! Shared builders and renderers for unit tests.
//!
//! `common` builds parameter bags shaped the way the SDK raises them;
//! `renderer` provides renderers that record requests or hold the rendering
//! thread until a test releases it.
mod common;
mod renderer;

pub use common::*;
pub use renderer::*;
