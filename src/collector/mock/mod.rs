//! Mock filesystem implementations for testing.
//!
//! This module provides `MockFs` and pre-built scenarios for exercising
//! collectors and renderers without a Linux `/proc` mount.

mod filesystem;
mod scenarios;

pub use filesystem::MockFs;
pub use scenarios::status_file;
