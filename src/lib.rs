//! # SMS Spam
//!
//! A TF-IDF + Multinomial Naive Bayes spam classifier for SMS messages: a trainer that fits and
//! persists the pipeline, and a small web form that serves its predictions.
#![forbid(unsafe_code)]

/// Pipelines
pub mod pipelines;

/// Datasets
pub mod datasets;

/// Utilities
pub mod utils;

/// CLI indexes and utilities
pub mod cli;

/// The interactive web surface
pub mod ui;
