//! Shared types and configuration for Kopera.
//!
//! This crate provides common types used across all other crates:
//! - Money type with fixed 2-decimal precision
//! - Typed IDs for type-safe entity references
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::{Money, MoneyError};
