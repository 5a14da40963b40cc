//! git-highlights: weekly engineering highlights from Git/GitHub
//!
//! This library backs the `git-highlights` binary: the root command, its
//! settings layer, and the error type the binary reports on exit.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
