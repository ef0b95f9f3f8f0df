//! Shared helpers

pub mod encoding;
