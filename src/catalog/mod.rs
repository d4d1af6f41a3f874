//! Message catalog: the parsed INI document and the per-system template index
//! built on top of it.

mod document;
mod system;
mod template_catalog;
pub use document::*;
pub use system::*;
pub use template_catalog::*;

#[cfg(test)]
mod catalog_test;
