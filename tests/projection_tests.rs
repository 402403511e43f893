//! Integration tests for grade projections
//!
//! Exercises the full path from evaluation set operations to the
//! projection calculator, the way the CLI drives them.

use malla_tracker::core::models::EvaluationSet;
use malla_tracker::core::projection::{
    compute_default_projection, compute_projection, CourseStatus,
};

const EPS: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_empty_set_is_pending_with_no_projection() {
    let set = EvaluationSet::new();
    let projection = compute_default_projection(&set);

    assert_eq!(projection.status, CourseStatus::Pending);
    assert!(projection.required_future_average.is_none());
    assert_close(projection.current_weighted_average, 0.0);
    assert_close(projection.total_weight_assigned, 0.0);
    assert_close(projection.remaining_weight, 100.0);
}

#[test]
fn test_partial_grades_produce_required_average() {
    // 40% at 3.0, 60% unassigned: needs (4.0*100 - 3.0*40) / 60 = 4.67
    let set = EvaluationSet::new()
        .add_evaluation("Control 1", 40.0, Some(3.0))
        .expect("valid evaluation");

    let projection = compute_default_projection(&set);

    assert_eq!(projection.status, CourseStatus::Pending);
    assert_close(projection.current_weighted_average, 3.0);
    assert_close(projection.remaining_weight, 60.0);

    let required = projection
        .required_future_average
        .expect("projection expected");
    assert_close(required.value, (4.0 * 100.0 - 3.0 * 40.0) / 60.0);
    assert!(required.achievable);
}

#[test]
fn test_two_graded_evaluations_weighted_average() {
    // 40% at 3.0 plus 20% at 5.0: average over graded weight is 11/3
    let set = EvaluationSet::new()
        .add_evaluation("Control 1", 40.0, Some(3.0))
        .expect("valid evaluation")
        .add_evaluation("Control 2", 20.0, Some(5.0))
        .expect("valid evaluation");

    let projection = compute_default_projection(&set);

    assert_close(
        projection.current_weighted_average,
        (3.0 * 40.0 + 5.0 * 20.0) / 60.0,
    );
    assert_close(projection.remaining_weight, 40.0);
    assert_eq!(projection.status, CourseStatus::Pending);
}

#[test]
fn test_unachievable_projection_clamps_to_max() {
    // 90% at 3.0 leaves 10%: raw requirement is 13.0, clamped to 7.0
    let set = EvaluationSet::new()
        .add_evaluation("Semestre", 90.0, Some(3.0))
        .expect("valid evaluation");

    let projection = compute_default_projection(&set);
    let required = projection
        .required_future_average
        .expect("projection expected");

    assert_close(required.value, 7.0);
    assert!(!required.achievable);
}

#[test]
fn test_comfortable_lead_clamps_low_and_stays_achievable() {
    // 90% at 6.5 leaves 10%: raw requirement is negative, clamped to 1.0
    let set = EvaluationSet::new()
        .add_evaluation("Semestre", 90.0, Some(6.5))
        .expect("valid evaluation");

    let projection = compute_default_projection(&set);
    let required = projection
        .required_future_average
        .expect("projection expected");

    assert_close(required.value, 1.0);
    assert!(required.achievable);
}

#[test]
fn test_full_budget_decides_the_course() {
    let passing = EvaluationSet::new()
        .add_evaluation("Catedra", 70.0, Some(4.5))
        .expect("valid evaluation")
        .add_evaluation("Laboratorio", 30.0, Some(4.0))
        .expect("valid evaluation");
    let projection = compute_default_projection(&passing);
    assert_eq!(projection.status, CourseStatus::Approved);
    assert!(projection.required_future_average.is_none());

    let failing = EvaluationSet::new()
        .add_evaluation("Catedra", 70.0, Some(3.0))
        .expect("valid evaluation")
        .add_evaluation("Laboratorio", 30.0, Some(3.5))
        .expect("valid evaluation");
    let projection = compute_default_projection(&failing);
    assert_eq!(projection.status, CourseStatus::Failed);
}

#[test]
fn test_full_budget_ungraded_counts_as_minimum() {
    // Budget complete but one evaluation ungraded: it contributes nothing,
    // so the final average falls below the threshold.
    let set = EvaluationSet::new()
        .add_evaluation("Catedra", 60.0, Some(6.0))
        .expect("valid evaluation")
        .add_evaluation("Examen", 40.0, None)
        .expect("valid evaluation");

    let projection = compute_default_projection(&set);

    assert_eq!(projection.status, CourseStatus::Failed);
}

#[test]
fn test_sub_scores_feed_the_projection() {
    // Sub-scores 5.0, 6.0, 7.0 derive a 6.0 grade for the evaluation
    let set = EvaluationSet::new()
        .add_evaluation("Controles", 50.0, None)
        .expect("valid evaluation");
    let id = set.evaluations()[0].id;

    let set = set
        .add_sub_score(id, 5.0)
        .add_sub_score(id, 6.0)
        .add_sub_score(id, 7.0);

    assert_close(set.evaluations()[0].grade().expect("derived grade"), 6.0);

    let projection = compute_default_projection(&set);
    assert_close(projection.current_weighted_average, 6.0);
    assert_close(projection.weight_with_grade, 50.0);
}

#[test]
fn test_removing_last_sub_score_clears_grade_and_projection() {
    let set = EvaluationSet::new()
        .add_evaluation("Controles", 50.0, None)
        .expect("valid evaluation");
    let id = set.evaluations()[0].id;

    let set = set.add_sub_score(id, 5.0);
    let sub_id = set.evaluations()[0]
        .sub_scores()
        .first()
        .expect("sub-score")
        .id;

    let set = set.remove_sub_score(id, sub_id);

    assert!(set.evaluations()[0].grade().is_none());
    let projection = compute_default_projection(&set);
    assert!(projection.required_future_average.is_none());
    assert!(projection.weight_with_grade.abs() < EPS);
}

#[test]
fn test_custom_threshold_changes_requirement() {
    let set = EvaluationSet::new()
        .add_evaluation("Control 1", 40.0, Some(3.0))
        .expect("valid evaluation");

    let projection = compute_projection(&set, 5.0);
    let required = projection
        .required_future_average
        .expect("projection expected");

    assert_close(required.value, (5.0 * 100.0 - 3.0 * 40.0) / 60.0);
    assert!(required.achievable);
}

#[test]
fn test_budget_overflow_is_rejected_before_projection() {
    let set = EvaluationSet::new()
        .add_evaluation("Catedra", 70.0, Some(4.0))
        .expect("valid evaluation");

    let err = set
        .add_evaluation("Examen", 40.0, None)
        .expect_err("budget overflow expected");
    assert!(err.reason.contains("100"));

    // The original set is untouched and still projects normally
    let projection = compute_default_projection(&set);
    assert_eq!(projection.status, CourseStatus::Pending);
    assert_close(projection.total_weight_assigned, 70.0);
}

#[test]
fn test_silent_operations_leave_projection_unchanged() {
    let set = EvaluationSet::new()
        .add_evaluation("Control 1", 40.0, Some(3.0))
        .expect("valid evaluation");
    let id = set.evaluations()[0].id;

    // Out-of-range grade and unknown ids come back unchanged
    let same = set
        .set_direct_grade(id, 8.0)
        .set_direct_grade(9999, 5.0)
        .add_sub_score(9999, 5.0)
        .remove_sub_score(id, 9999);

    assert_eq!(same, set);
    let projection = compute_default_projection(&same);
    assert_close(projection.current_weighted_average, 3.0);
}
