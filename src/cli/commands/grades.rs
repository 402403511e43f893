//! Grades command handler
//!
//! Loads the course's evaluation set from the grade store, applies one
//! operation, persists the result, and prints the updated projection.

use crate::args::GradesSubcommand;
use malla_tracker::config::Config;
use malla_tracker::core::models::{Evaluation, EvaluationSet};
use malla_tracker::core::projection::{compute_projection, CourseStatus, Projection};
use malla_tracker::core::store::{GradeStore, JsonFileStore};
use malla_tracker::{error, info};
use std::path::PathBuf;

/// Run the grades command for one course.
///
/// # Arguments
/// * `course_id` - Course identifier the evaluation set is keyed by
/// * `subcommand` - Operation to apply
/// * `config` - Configuration with the data directory and passing threshold
pub fn run(course_id: &str, subcommand: GradesSubcommand, config: &Config) {
    let store = JsonFileStore::new(PathBuf::from(&config.paths.data_dir).join("grades.json"));

    let set = match store.load(course_id) {
        Ok(set) => set,
        Err(e) => {
            error!("Failed to load grades for {course_id}: {e}");
            eprintln!("✗ {e}");
            return;
        }
    };

    let next = match apply(&set, &subcommand) {
        Ok(next) => next,
        Err(reason) => {
            // Hard validation failure: surface the reason, apply nothing.
            eprintln!("✗ {reason}");
            return;
        }
    };

    if next != set {
        if let Err(e) = store.save(course_id, &next) {
            error!("Failed to save grades for {course_id}: {e}");
            eprintln!("✗ {e}");
            return;
        }
        info!("Grades saved for {course_id}");
    }

    print_summary(course_id, &next, config.grading.passing_threshold);
}

/// Apply one subcommand to the set, returning the resulting set.
/// Silent-tier operations come back unchanged on invalid input by design.
fn apply(set: &EvaluationSet, subcommand: &GradesSubcommand) -> Result<EvaluationSet, String> {
    match subcommand {
        GradesSubcommand::List => Ok(set.clone()),
        GradesSubcommand::Add {
            name,
            weight,
            grade,
        } => {
            let next = set
                .add_evaluation(name, *weight, *grade)
                .map_err(|e| e.reason)?;
            println!("✓ Added evaluation '{}' ({weight}%)", name.trim());
            Ok(next)
        }
        GradesSubcommand::Remove { id } => {
            let next = set.remove_evaluation(*id);
            if next.len() < set.len() {
                println!("✓ Removed evaluation {id}");
            }
            Ok(next)
        }
        GradesSubcommand::SetGrade { id, grade } => Ok(set.set_direct_grade(*id, *grade)),
        GradesSubcommand::AddScore { id, score } => Ok(set.add_sub_score(*id, *score)),
        GradesSubcommand::RemoveScore { id, sub_id } => Ok(set.remove_sub_score(*id, *sub_id)),
    }
}

fn print_evaluation(eval: &Evaluation) {
    let grade_label = eval
        .grade()
        .map_or_else(|| "--".to_string(), |g| format!("{g:.1}"));

    if eval.has_sub_scores() {
        let scores: Vec<String> = eval
            .sub_scores()
            .iter()
            .map(|s| format!("[{}] {:.1}", s.id, s.score))
            .collect();
        println!(
            "  [{}] {}  {}%  grade {grade_label} (mean of {})",
            eval.id,
            eval.name,
            eval.weight,
            scores.join(", ")
        );
    } else {
        println!(
            "  [{}] {}  {}%  grade {grade_label}",
            eval.id, eval.name, eval.weight
        );
    }
}

fn print_summary(course_id: &str, set: &EvaluationSet, threshold: f64) {
    let projection: Projection = compute_projection(set, threshold);

    println!("\n=== {course_id} ===");

    if set.is_empty() {
        println!("No evaluations registered.");
    } else {
        for eval in set.evaluations() {
            print_evaluation(eval);
        }
    }

    println!("\nWeight assigned: {}%", projection.total_weight_assigned);
    if projection.weight_with_grade > 0.0 {
        println!(
            "Current weighted average: {:.2} (over {}% graded)",
            projection.current_weighted_average, projection.weight_with_grade
        );
    } else {
        println!("Current weighted average: --");
    }
    println!("Status: {}", projection.status);

    if let Some(required) = projection.required_future_average {
        if required.achievable {
            println!(
                "To pass ({threshold:.1}): average {:.2} needed on the remaining {}%",
                required.value, projection.remaining_weight
            );
        } else {
            println!(
                "To pass ({threshold:.1}): average {:.2} needed on the remaining {}% (not achievable on the 1.0-7.0 scale)",
                required.value, projection.remaining_weight
            );
        }
    } else if projection.status == CourseStatus::Pending {
        println!("No projection yet: register a graded evaluation first.");
    }
}
