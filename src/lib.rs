// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod config;
pub mod curve;
pub mod lineup;
pub mod names;
pub mod projections;
pub mod weeks;
