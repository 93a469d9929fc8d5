//! Shared value types and the crate error.

pub(crate) mod core;
pub(crate) mod error;
