//! Courses command handler

use malla_tracker::config::Config;
use malla_tracker::core::catalog::{list_curricula, load_curriculum};
use malla_tracker::{error, info};
use std::path::{Path, PathBuf};

/// Run the courses command: list the catalog directory, or print one
/// curriculum file.
pub fn run(file: Option<&Path>, config: &Config) {
    match file {
        Some(path) => show_curriculum(path),
        None => list_catalog(config),
    }
}

fn show_curriculum(path: &Path) {
    let curriculum = match load_curriculum(path) {
        Ok(c) => c,
        Err(e) => {
            error!("Courses command failed for {}: {e}", path.display());
            eprintln!("✗ {e}");
            return;
        }
    };

    info!("Curriculum loaded: {}", path.display());

    println!(
        "\n=== {} - {} ({} courses, {} SCT) ===",
        curriculum.university,
        curriculum.name,
        curriculum.course_count(),
        curriculum.total_credits()
    );

    for semester in &curriculum.semesters {
        println!("\nSemester {}:", semester.number);
        for course in &semester.courses {
            println!("  {}  {}", course.id, course.label());
        }
    }
}

fn list_catalog(config: &Config) {
    let catalog_dir = PathBuf::from(&config.paths.catalog_dir);
    let files = match list_curricula(&catalog_dir) {
        Ok(files) => files,
        Err(e) => {
            error!("Catalog listing failed: {e}");
            eprintln!("✗ {e}");
            return;
        }
    };

    if files.is_empty() {
        println!(
            "No curricula found in {}. Add curriculum JSON files there or pass a file path.",
            catalog_dir.display()
        );
        return;
    }

    println!("\n=== Available curricula ===\n");
    for path in files {
        // Show the career name when the file parses; fall back to the file name.
        match load_curriculum(&path) {
            Ok(curriculum) => println!(
                "  {}  {} - {}",
                path.display(),
                curriculum.university,
                curriculum.name
            ),
            Err(_) => println!("  {}  (unreadable curriculum)", path.display()),
        }
    }
}
