//! Controller domain module
//!
//! Alias resolution, access statistics and the controller tying them to the
//! fragment service.

mod aliases;
mod controller;
mod statistics;

pub use aliases::AliasTable;
pub use controller::{
    AliasRequest, DeleteAllSummary, FragmentController, FragmentLookup, Redirection, SeededFile,
    Statistics,
};
pub use statistics::{ResponseStatistics, StatisticsTable};
