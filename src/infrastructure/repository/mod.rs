//! Store implementations for the domain persistence ports.
//!
//! The UseCase layer depends on the domain traits, not on these concrete
//! types (dependency inversion).

pub mod inmemory;

pub use inmemory::InMemoryVisitorSessionStore;
