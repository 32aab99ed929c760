//! Core business logic for Kopera.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `account` - Account classification, number tombstones, balance deltas
//! - `ledger` - Batch validation and posting aggregation
//! - `closing` - Yearly net-result computation

pub mod account;
pub mod closing;
pub mod ledger;
