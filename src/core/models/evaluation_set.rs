//! Evaluation set model and record operations
//!
//! One `EvaluationSet` exists per course. Every operation is a value-returning
//! transformation: the input set is left untouched and a new set is returned,
//! so "no-op on invalid input" is observable as value equality.

use super::evaluation::{is_valid_grade, round1, Evaluation, MAX_TOTAL_WEIGHT};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Slack used when comparing weight sums against the 100% budget
pub(crate) const WEIGHT_EPSILON: f64 = 1e-9;

/// Hard validation failure for [`EvaluationSet::add_evaluation`]
///
/// Carries a user-facing reason; the mutation was not applied. The silent
/// tier (grade and sub-score setters with malformed input) returns the set
/// unchanged with no error signal instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// User-facing description of the rejected input
    pub reason: String,
}

impl ValidationError {
    fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl std::error::Error for ValidationError {}

/// Ordered collection of evaluations for one course
///
/// Insertion order is preserved for display; it carries no computational
/// meaning. Invariant: the weights sum to at most 100 at all times.
///
/// Serializes transparently as the record array
/// `[{id, name, weight, grade, subScores: [{id, score}]}]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationSet {
    evaluations: Vec<Evaluation>,
}

impl EvaluationSet {
    /// Create an empty set
    #[must_use]
    pub const fn new() -> Self {
        Self {
            evaluations: Vec::new(),
        }
    }

    /// Evaluations in insertion order
    #[must_use]
    pub fn evaluations(&self) -> &[Evaluation] {
        &self.evaluations
    }

    /// Number of evaluations in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    /// Returns whether the set has no evaluations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }

    /// Look up an evaluation by id
    #[must_use]
    pub fn get(&self, id: u64) -> Option<&Evaluation> {
        self.evaluations.iter().find(|e| e.id == id)
    }

    /// Sum of all evaluation weights (0-100)
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.evaluations.iter().map(|e| e.weight).sum()
    }

    /// Next fresh id: one past the largest id in use across evaluations and
    /// sub-scores. Deterministic, so sets stay value-comparable.
    fn next_id(&self) -> u64 {
        self.evaluations
            .iter()
            .flat_map(|e| {
                std::iter::once(e.id).chain(e.sub_scores().iter().map(|s| s.id))
            })
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Add a new evaluation to the set
    ///
    /// Validates in order: non-blank name, weight in (0, 100], weight budget
    /// (`total + weight <= 100`), then grade in [1.0, 7.0] when provided. The
    /// stored name is trimmed and the grade rounded to 1 decimal.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] describing the first violated rule; the
    /// input set is unchanged.
    pub fn add_evaluation(
        &self,
        name: &str,
        weight: f64,
        grade: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new("Evaluation name is required"));
        }

        if !weight.is_finite() || weight <= 0.0 || weight > MAX_TOTAL_WEIGHT {
            return Err(ValidationError::new(
                "Weight must be greater than 0 and at most 100",
            ));
        }

        let new_total = self.total_weight() + weight;
        if new_total > MAX_TOTAL_WEIGHT + WEIGHT_EPSILON {
            return Err(ValidationError::new(format!(
                "Total weight would exceed 100% (would be {new_total}%)"
            )));
        }

        if let Some(g) = grade {
            if !is_valid_grade(g) {
                return Err(ValidationError::new("Grade must be between 1.0 and 7.0"));
            }
        }

        let mut next = self.clone();
        let id = next.next_id();
        next.evaluations
            .push(Evaluation::new(id, trimmed.to_string(), weight, grade));
        Ok(next)
    }

    /// Remove an evaluation by id. No-op when the id is absent.
    #[must_use]
    pub fn remove_evaluation(&self, id: u64) -> Self {
        let mut next = self.clone();
        next.evaluations.retain(|e| e.id != id);
        next
    }

    /// Set an evaluation's grade directly
    ///
    /// Silent no-op (the set is returned unchanged) when the id is absent,
    /// the grade is out of the [1.0, 7.0] domain, or the evaluation has
    /// sub-scores governing its grade. This mirrors ignoring malformed
    /// interactive input rather than raising.
    #[must_use]
    pub fn set_direct_grade(&self, id: u64, grade: f64) -> Self {
        if !is_valid_grade(grade) {
            return self.clone();
        }

        let mut next = self.clone();
        if let Some(eval) = next.evaluations.iter_mut().find(|e| e.id == id) {
            eval.set_direct_grade(grade);
        }
        next
    }

    /// Add a sub-score to an evaluation and re-derive its grade
    ///
    /// Silent no-op when the evaluation id is absent or the score is out of
    /// the [1.0, 7.0] domain. The stored score is rounded to 1 decimal.
    #[must_use]
    pub fn add_sub_score(&self, eval_id: u64, score: f64) -> Self {
        if !is_valid_grade(score) {
            return self.clone();
        }
        if self.get(eval_id).is_none() {
            return self.clone();
        }

        let mut next = self.clone();
        let sub_id = next.next_id();
        if let Some(eval) = next.evaluations.iter_mut().find(|e| e.id == eval_id) {
            eval.add_sub_score(sub_id, score);
        }
        next
    }

    /// Remove a sub-score from an evaluation and re-derive its grade; the
    /// grade reverts to `None` when no sub-scores remain. Silent no-op when
    /// either id is absent.
    #[must_use]
    pub fn remove_sub_score(&self, eval_id: u64, sub_id: u64) -> Self {
        let mut next = self.clone();
        if let Some(eval) = next.evaluations.iter_mut().find(|e| e.id == eval_id) {
            eval.remove_sub_score(sub_id);
        }
        next
    }
}
