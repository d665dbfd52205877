//! # dbsh Configuration Module
//!
//! Compile-time configuration for the session layer. Runtime configuration
//! comes from environment variables (see [`crate::env::paths`]) and the RC
//! file executed at REPL start.
//!
//! ## Module Organization
//!
//! - [`constants`]: command identity, environment variable names, secrets
//!   file layout, prompts

pub mod constants;
pub use constants::*;
