//! Infrastructure layer - Repository, cache and observability implementations

pub mod book;
pub mod cache;
pub mod logging;
pub mod observability;
