//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`download`] - Download datasets as GPX (default)
//! - [`verify`] - Check produced coordinates
//! - [`convert`] - Transform a single LKS-94 coordinate

pub mod common;
pub mod convert;
pub mod download;
pub mod verify;
