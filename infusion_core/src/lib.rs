#![forbid(unsafe_code)]

//! Core dosing logic for the infusion calculator.
//!
//! This crate provides:
//! - Domain types (requests, results, vials, bags, infusion types)
//! - Input validation
//! - Per-drug calculators (Tepezza, Remicade, Benlysta)
//! - The dispatch engine tying validation to the calculators
//! - Configuration and logging setup for binaries

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod validation;
pub mod tepezza;
pub mod remicade;
pub mod benlysta;
pub mod engine;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use validation::{validate, Advisory, ValidationOutcome};
pub use engine::{calculate, Calculation};
