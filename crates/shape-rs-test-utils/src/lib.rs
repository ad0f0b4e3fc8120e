//! Test helpers shared across shape crates.

pub mod store;

pub use store::{FailingStore, StubStore};
