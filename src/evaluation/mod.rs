//! Student evaluation: a pure function over a fixed-shape record.

pub mod handlers;
pub mod rules;
pub mod samples;

pub use rules::{Criteria, EvaluationResult, StudentRecord, evaluate_student};
pub use samples::sample_students;
