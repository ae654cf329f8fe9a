//! Numeric building blocks for the quickmath calculator.
//!
//! Parsing and exact solving are handled elsewhere; this crate receives already-compiled
//! functions and provides:
//!
//! - an evaluation adapter ([`numerical::func::Evaluator`]) that turns every failure into `NaN`,
//! - a heuristic global root finder ([`numerical::solve`]) used when no closed-form solution is
//!   available,
//! - helpers to round and format numbers for display ([`numerical::fmt`]).
//!
//! # Features
//!
//! - `serde`: Derives [`serde`] traits for the option types provided by this crate.
//!
//! [`serde`]: https://crates.io/crates/serde

pub mod numerical;
