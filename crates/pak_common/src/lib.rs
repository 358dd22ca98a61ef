//! Shared foundational types used across the pakcache workspace.
//!
//! This crate provides content hashing for cache record integrity checks and
//! helpers for taking apart archive entry paths, which may use either `/` or
//! `\` as a separator.

#![warn(missing_docs)]

pub mod entry_path;
pub mod hash;

pub use entry_path::{file_name, parent_dir, parent_name};
pub use hash::ContentHash;
