//! Whitelist management subsystem.

pub mod client;

pub use client::{WhitelistClient, WhitelistError};
