//! Storage and collaborator ports

mod ports;

pub use ports::{ContextFetcher, DocumentParser, FragmentRepository, NoContextFetcher};
