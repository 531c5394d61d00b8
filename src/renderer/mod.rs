//! Expression parsing and rendering
//!
//! This module contains the expression engine components:
//! - `engine`: The strict, custom-delimiter rendering engine
//! - `filters`: Naming-convention filters for generated artifacts

pub mod engine;
pub mod filters;

pub use engine::{parse_falsy, parse_truthy, ExpressionEngine};
