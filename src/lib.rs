//! dockerup library
//!
//! Downloads the static Docker release, installs its binaries and brings the
//! daemon up under systemd. The `dockerup` binary is a thin layer over this.

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod utils;

#[cfg(test)]
mod test_support;
