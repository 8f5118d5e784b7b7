//! CLI command implementations.

pub mod address;
pub mod build;
pub mod config;
pub mod inspect;
