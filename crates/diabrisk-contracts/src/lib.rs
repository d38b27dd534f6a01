//! # diabrisk-contracts
//!
//! Shared types and errors for the diabrisk runtime.
//!
//! All crates in the workspace import from here. No scaling or inference
//! logic lives in this crate, only data definitions, the fixed risk
//! thresholds, and error types.

pub mod error;
pub mod model;
pub mod patient;
pub mod prediction;
