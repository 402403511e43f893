//! Grade projection calculator
//!
//! Pure functions over an [`EvaluationSet`]: weight totals, running weighted
//! average, pass/fail status, and the minimum average required on the
//! remaining weight to reach the passing threshold. Everything is re-derived
//! from scratch on every call; there is no incremental state.

use crate::core::models::evaluation::{MAX_GRADE, MAX_TOTAL_WEIGHT, MIN_GRADE};
use crate::core::models::evaluation_set::WEIGHT_EPSILON;
use crate::core::models::EvaluationSet;

/// Default passing threshold on the 1.0-7.0 scale
pub const DEFAULT_PASSING_THRESHOLD: f64 = 4.0;

/// Course outcome derived from the evaluation set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseStatus {
    /// The weight budget is not fully assigned yet
    Pending,
    /// All weight is assigned and the worst-case final average passes
    Approved,
    /// All weight is assigned and the worst-case final average fails
    Failed,
}

impl std::fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Failed => "Failed",
        };
        write!(f, "{as_str}")
    }
}

/// Minimum average required on the remaining weight to pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequiredAverage {
    /// Display value, clamped into [1.0, 7.0]
    pub value: f64,
    /// Whether the raw (pre-clamp) requirement fits within the grade scale.
    /// `false` means the requirement exceeded 7.0 and the course cannot be
    /// passed within the valid range. The lower clamp carries no analogous
    /// "already guaranteed" flag.
    pub achievable: bool,
}

/// Aggregate figures derived from one evaluation set
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// Sum of all evaluation weights (0-100)
    pub total_weight_assigned: f64,
    /// Unassigned weight: `100 - total_weight_assigned`
    pub remaining_weight: f64,
    /// Sum of weights of evaluations that have a grade
    pub weight_with_grade: f64,
    /// Weighted average over graded evaluations, or 0 when none are graded
    /// (presentation distinguishes "no data" from an actual 0)
    pub current_weighted_average: f64,
    /// Course outcome
    pub status: CourseStatus,
    /// Required average on the remaining weight; absent when nothing is
    /// graded yet or no weight remains
    pub required_future_average: Option<RequiredAverage>,
}

/// Returns whether the assigned weight fills the 100% budget
fn budget_complete(total_weight: f64) -> bool {
    (MAX_TOTAL_WEIGHT - total_weight).abs() < WEIGHT_EPSILON
}

/// Compute the projection for an evaluation set against a passing threshold.
///
/// Status policy: once the full 100% is assigned, the final average treats
/// ungraded evaluations as 0 (worst case) and the course is `Approved` or
/// `Failed` outright; until then it is `Pending`. A completed budget also
/// makes the required-future-average absent, even if some evaluations are
/// still ungraded.
#[must_use]
pub fn compute_projection(set: &EvaluationSet, threshold: f64) -> Projection {
    let total_weight_assigned = set.total_weight();
    let remaining_weight = MAX_TOTAL_WEIGHT - total_weight_assigned;

    let graded: Vec<_> = set
        .evaluations()
        .iter()
        .filter_map(|e| e.grade().map(|g| (g, e.weight)))
        .collect();
    let weight_with_grade: f64 = graded.iter().map(|(_, w)| w).sum();
    let current_weighted_average = if weight_with_grade > 0.0 {
        graded.iter().map(|(g, w)| g * w).sum::<f64>() / weight_with_grade
    } else {
        0.0
    };

    let status = if budget_complete(total_weight_assigned) {
        let final_average = set
            .evaluations()
            .iter()
            .map(|e| e.grade().unwrap_or(0.0) * e.weight)
            .sum::<f64>()
            / MAX_TOTAL_WEIGHT;
        if final_average >= threshold {
            CourseStatus::Approved
        } else {
            CourseStatus::Failed
        }
    } else {
        CourseStatus::Pending
    };

    let required_future_average = if status == CourseStatus::Pending
        && weight_with_grade > 0.0
        && remaining_weight > WEIGHT_EPSILON
    {
        let raw = (threshold * MAX_TOTAL_WEIGHT - current_weighted_average * weight_with_grade)
            / remaining_weight;
        Some(RequiredAverage {
            value: raw.clamp(MIN_GRADE, MAX_GRADE),
            achievable: raw <= MAX_GRADE,
        })
    } else {
        None
    };

    Projection {
        total_weight_assigned,
        remaining_weight,
        weight_with_grade,
        current_weighted_average,
        status,
        required_future_average,
    }
}

/// Compute the projection against the default 4.0 passing threshold
#[must_use]
pub fn compute_default_projection(set: &EvaluationSet) -> Projection {
    compute_projection(set, DEFAULT_PASSING_THRESHOLD)
}
