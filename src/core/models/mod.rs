//! Data models for `MallaTracker`

pub mod course;
pub mod evaluation;
pub mod evaluation_set;

pub use course::Course;
pub use evaluation::{Evaluation, SubScore};
pub use evaluation_set::{EvaluationSet, ValidationError};
