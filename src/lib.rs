//! Fridge dashboard charts - binds fridge sensor samples to chart series and
//! keeps live charts in sync as new batches arrive.
//!
//! The library exposes the layers for the HTTP host in `main.rs` and for tests.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
