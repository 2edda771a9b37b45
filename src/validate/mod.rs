//! Validate module - Advisory dataset checks

mod finding;
mod validator;

pub use finding::{Finding, Severity};
pub use validator::{Completeness, Consistency, Freshness, ValidationReport, Validator};
