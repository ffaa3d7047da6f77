//! Application layer for the pairing tool
//!
//! This module wires the roster loader, history store, matcher and report
//! sink into a single run.

pub mod app;

pub use app::{CoffeePairsApp, PersistOutcome, RunPlan};
