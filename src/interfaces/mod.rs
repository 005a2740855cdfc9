//! Transport adapters over the domain ports

pub mod http;
