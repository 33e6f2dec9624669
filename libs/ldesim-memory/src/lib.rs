//! In-memory storage adapter for the LDES server simulator
//!
//! Implements the domain's `FragmentRepository` port on top of a shared map.
//! The simulator keeps no state across restarts; seeding at startup is how a
//! fresh instance gets its data back.

pub mod infrastructure;

pub use infrastructure::InMemoryFragmentRepository;
