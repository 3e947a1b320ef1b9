//! mathapi library entry points.
//!
//! This crate owns everything about turning an expression into display text:
//! the [`Evaluator`] seam and its default `meval`-backed engine, the [`Value`]
//! result type, and significant-digit formatting. The HTTP service only parses
//! transport parameters and calls the functions exported here.
//!

#![deny(warnings)]

pub mod error;
pub mod evaluate;
pub mod format;
pub mod value;

pub use error::{Error, Result};
pub use evaluate::{evaluate, Evaluator, MevalEvaluator};
pub use format::{format_result, format_significant};
pub use value::{format_number, Value};
