//! Wikispan Core
//!
//! This crate provides core types and error definitions
//! for the wikispan inline token scanner.
//!
//! # Overview
//!
//! The core crate contains:
//! - [`RegistrationError`] - Errors raised while registering token definitions
//! - [`MalformedMatchError`] - Scan-time diagnostics for matches that could not be built
//! - [`WikispanError`] - Top-level error for configuration and I/O
//! - [`Position`], [`Span`] - Source location types
//! - [`GroupRef`] - Capture group references shared by config and registry

pub mod error;
pub mod types;

pub use error::{MalformedMatchError, RegistrationError, Result, WikispanError};
pub use types::{GroupRef, Position, Span};
