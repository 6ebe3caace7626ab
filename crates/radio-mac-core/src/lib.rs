//! # radio-mac-core
//!
//! Shared vocabulary for the 802.15.4 MAC hook layer. Contains the radio
//! types handed to feature hooks, configuration schemas with the
//! compile-time feature set, and the unified error system.
//!
//! This crate has **no** internal dependencies on other radio-mac crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
