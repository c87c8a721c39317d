//! Shared test utilities for handdrive.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers with `#[track_caller]`
//! - [`assertions`] - Assertion macros for command and status streams
//! - [`mock`] - Recording and manually driven port implementations
//! - [`fixtures`] - Observation scripts and small configurations
//! - [`prelude`] - Convenience re-exports
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! handdrive-test-helpers = { path = "crates/test-helpers" }
//! ```
//!
//! ```rust,ignore
//! use handdrive_test_helpers::prelude::*;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic, reason = "test-only crate")]

pub mod assertions;
pub mod must;
pub mod prelude;

#[cfg(feature = "mock")]
pub mod mock;

#[cfg(feature = "fixtures")]
pub mod fixtures;

pub use must::*;
