//! fhash command line front end
//!
//! The binary in `main.rs` parses arguments and dispatches here; these modules
//! are public so integration tests can drive configuration and output directly.

pub mod commands;
pub mod config;
pub mod output;
pub mod terminal;
