//! Outbound (driven) adapters.

pub mod persistence;
