//! Utility modules for common functionality
//!
//! Provides reusable utilities for local file operations.

pub mod fs;

pub use fs::FileSystemUtils;
