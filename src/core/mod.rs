//! Core types shared across the crate: errors and configuration.

pub mod config;
pub mod errors;
