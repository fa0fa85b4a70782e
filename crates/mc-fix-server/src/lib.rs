//! Glue between decoded packets and the repair core: configuration, the
//! packet filter and in-memory capability implementations.

pub mod config;
pub mod filter;
pub mod session;
