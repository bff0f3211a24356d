//! Storage infrastructure: configuration file loading.
//!
//! The bridge keeps no state between runs.  The only thing read from disk is
//! the TOML configuration, handled by the `config` sub-module.

pub mod config;
