mod coordinator;
mod equivalence;
pub use coordinator::*;
pub use equivalence::*;

#[cfg(test)]
mod coordinator_test;
