//! Marrow Core - Foundational types for the Marrow animation engine
//!
//! This crate provides the types the other Marrow crates depend on:
//! - Error types and Result alias

mod error;

pub use error::{MarrowError, Result};
