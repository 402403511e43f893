//! Evaluation and sub-score models
//!
//! An evaluation is a weighted assessment of a course (e.g., "Controles 30%").
//! It is graded either directly or through sub-scores, in which case its grade
//! is derived as the mean of the sub-scores and cannot be set directly.

use serde::{Deserialize, Serialize};

/// Lowest grade on the scale
pub const MIN_GRADE: f64 = 1.0;

/// Highest grade on the scale
pub const MAX_GRADE: f64 = 7.0;

/// Total weight budget for one course, in percent
pub const MAX_TOTAL_WEIGHT: f64 = 100.0;

/// Round a grade or score to 1 decimal place (half away from zero).
/// Applied once at write time; stored values are never re-rounded on read.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Returns whether a value is a valid grade on the scale
#[must_use]
pub fn is_valid_grade(value: f64) -> bool {
    value.is_finite() && (MIN_GRADE..=MAX_GRADE).contains(&value)
}

/// A single sub-score (e.g., one quiz) inside an evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    /// Unique identifier, stable for the record's lifetime
    pub id: u64,

    /// Score in [1.0, 7.0], rounded to 1 decimal
    pub score: f64,
}

/// A weighted assessment of a course
///
/// `grade` and `sub_scores` are private so the derived-grade invariant holds:
/// while any sub-score exists, the grade is the rounded mean of the sub-scores
/// and direct writes are rejected. All mutation goes through
/// [`super::EvaluationSet`] operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    /// Unique identifier, assigned at creation, stable for the record's lifetime
    pub id: u64,

    /// Display name (non-empty, stored trimmed)
    pub name: String,

    /// Percentage of the course grade this evaluation represents, in (0, 100]
    pub weight: f64,

    /// Current grade; `None` means not yet graded
    grade: Option<f64>,

    /// Sub-scores; empty means the evaluation is graded directly
    #[serde(default)]
    sub_scores: Vec<SubScore>,
}

impl Evaluation {
    /// Create a new directly-graded evaluation.
    /// Callers are responsible for validating inputs; the grade is stored
    /// rounded to 1 decimal when present.
    #[must_use]
    pub(crate) fn new(id: u64, name: String, weight: f64, grade: Option<f64>) -> Self {
        Self {
            id,
            name,
            weight,
            grade: grade.map(round1),
            sub_scores: Vec::new(),
        }
    }

    /// Current grade, or `None` if not yet graded
    #[must_use]
    pub const fn grade(&self) -> Option<f64> {
        self.grade
    }

    /// Sub-scores in insertion order
    #[must_use]
    pub fn sub_scores(&self) -> &[SubScore] {
        &self.sub_scores
    }

    /// Returns whether the grade is derived from sub-scores
    #[must_use]
    pub fn has_sub_scores(&self) -> bool {
        !self.sub_scores.is_empty()
    }

    /// Set the grade directly. Ignored while any sub-score exists.
    pub(crate) fn set_direct_grade(&mut self, grade: f64) {
        if self.sub_scores.is_empty() {
            self.grade = Some(round1(grade));
        }
    }

    /// Append a sub-score and re-derive the grade
    pub(crate) fn add_sub_score(&mut self, id: u64, score: f64) {
        self.sub_scores.push(SubScore {
            id,
            score: round1(score),
        });
        self.recompute_grade();
    }

    /// Remove a sub-score by id and re-derive the grade
    pub(crate) fn remove_sub_score(&mut self, sub_id: u64) {
        self.sub_scores.retain(|s| s.id != sub_id);
        self.recompute_grade();
    }

    /// Re-derive the grade from sub-scores: the rounded mean when any exist,
    /// `None` otherwise (the caller must re-enter a direct grade).
    fn recompute_grade(&mut self) {
        if self.sub_scores.is_empty() {
            self.grade = None;
        } else {
            #[allow(clippy::cast_precision_loss)]
            let mean = self.sub_scores.iter().map(|s| s.score).sum::<f64>()
                / self.sub_scores.len() as f64;
            self.grade = Some(round1(mean));
        }
    }
}
