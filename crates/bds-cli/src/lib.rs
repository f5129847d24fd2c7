//! Library components of the `bds` command-line tool.

pub mod config;
pub mod logging;
