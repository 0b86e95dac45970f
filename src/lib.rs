//! # Burn Names
//!
//! A character-level name nationality classifier: a reader for per-category name files,
//! an RNN sequence tagger, and a predictor that turns raw names into category labels.
#![forbid(unsafe_code)]

/// Instances, fields, and the vocabulary
pub mod data;

/// Models
pub mod models;

/// Pipelines
pub mod pipelines;

/// Datasets
pub mod datasets;

/// Utilities
pub mod utils;

/// CLI indexes and utilities
pub mod cli;

/// Error macros
#[macro_use]
extern crate anyhow;

/// Logging macros
#[macro_use]
extern crate log;
