//! The `common` crate provides the ambient pieces shared by the binaries in this workspace:
//! logging setup, a controllable clock and command line helpers.

pub mod clap;
mod error;
pub mod time;
pub mod tracing;

pub use error::Error;
