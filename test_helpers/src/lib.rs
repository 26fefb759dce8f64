//! Test helpers shared across crates.
//!
//! This crate provides fixture schemas modelled on a small mail server
//! configuration, helpers for reading rendered dumps, and a wrapper around
//! [`figment::Jail`] for option loading tests.

pub mod figment;
pub mod fixtures;
pub mod text;
