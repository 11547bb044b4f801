//! Storage ports and the in-memory adapter used by tests

#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod ports;

#[cfg(any(test, feature = "test-util"))]
pub use memory::InMemoryRepository;
