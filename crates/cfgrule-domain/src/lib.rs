//! Pure compliance evaluation (no IO).
//!
//! Input: a configuration item decoded elsewhere, plus rule parameters and effective policy.
//! Output: a compliance verdict per item, and report summaries over many items.

#![forbid(unsafe_code)]

pub mod policy;
pub mod report;
pub mod rules;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::{Assessment, assess, evaluate_all, evaluate_compliance};
