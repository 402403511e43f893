//! Curriculum catalog loading
//!
//! Curricula are JSON files describing the semesters and courses of one
//! career (e.g., `BQ.json` for Bioquímica). The projection engine only needs
//! a course identifier; this module exists so the CLI can list what is
//! available and label courses in its output.

use crate::core::models::Course;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One semester of a curriculum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    /// Semester position in the curriculum, starting at 1
    pub number: u32,

    /// Courses taken in this semester
    pub courses: Vec<Course>,
}

/// A full curriculum for one career at one university
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curriculum {
    /// University name (e.g., "Universidad de Chile")
    pub university: String,

    /// Career name (e.g., "Bioquímica")
    pub name: String,

    /// Semesters in curriculum order
    pub semesters: Vec<Semester>,
}

impl Curriculum {
    /// Find a course anywhere in the curriculum by its identifier
    #[must_use]
    pub fn find_course(&self, course_id: &str) -> Option<&Course> {
        self.semesters
            .iter()
            .flat_map(|s| s.courses.iter())
            .find(|c| c.id == course_id)
    }

    /// Total number of courses across all semesters
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.semesters.iter().map(|s| s.courses.len()).sum()
    }

    /// Total credit load across all semesters
    #[must_use]
    pub fn total_credits(&self) -> f32 {
        self.semesters
            .iter()
            .flat_map(|s| s.courses.iter())
            .map(|c| c.credits)
            .sum()
    }
}

/// Parse a curriculum from a JSON string
///
/// # Errors
/// Returns an error when the JSON cannot be parsed into a curriculum.
pub fn parse_curriculum(json: &str) -> Result<Curriculum, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid curriculum JSON: {e}"))
}

/// Load a curriculum from a JSON file
///
/// # Errors
/// Returns an error when the file cannot be read or parsed.
pub fn load_curriculum(path: &Path) -> Result<Curriculum, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read curriculum {}: {e}", path.display()))?;
    parse_curriculum(&content)
        .map_err(|e| format!("Failed to load curriculum {}: {e}", path.display()))
}

/// List curriculum JSON files available in a catalog directory, sorted by
/// file name. A missing directory lists as empty rather than failing.
///
/// # Errors
/// Returns an error when the directory exists but cannot be read.
pub fn list_curricula(dir: &Path) -> Result<Vec<PathBuf>, String> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir)
        .map_err(|e| format!("Failed to read catalog directory {}: {e}", dir.display()))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "university": "Universidad de Chile",
        "name": "Bioquímica",
        "semesters": [
            {
                "number": 1,
                "courses": [
                    {"id": "BQ101", "name": "Química General", "code": "CQ10101", "credits": 6.0},
                    {"id": "BQ102", "name": "Biología Celular", "code": "BC10002", "credits": 5.0}
                ]
            },
            {
                "number": 2,
                "courses": [
                    {"id": "BQ201", "name": "Química Orgánica", "code": "CQ10201", "credits": 6.0}
                ]
            }
        ]
    }"#;

    #[test]
    fn parses_curriculum_json() {
        let curriculum = parse_curriculum(SAMPLE).expect("parse curriculum");

        assert_eq!(curriculum.university, "Universidad de Chile");
        assert_eq!(curriculum.name, "Bioquímica");
        assert_eq!(curriculum.semesters.len(), 2);
        assert_eq!(curriculum.course_count(), 3);
        assert!((curriculum.total_credits() - 17.0).abs() < f32::EPSILON);
    }

    #[test]
    fn finds_course_by_id() {
        let curriculum = parse_curriculum(SAMPLE).expect("parse curriculum");

        let course = curriculum.find_course("BQ201").expect("course");
        assert_eq!(course.name, "Química Orgánica");
        assert!(curriculum.find_course("BQ999").is_none());
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(parse_curriculum("not json").is_err());
        assert!(parse_curriculum("{\"name\": \"x\"}").is_err());
    }

    #[test]
    fn missing_catalog_dir_lists_empty() {
        let files =
            list_curricula(Path::new("/nonexistent/catalog/dir")).expect("list curricula");
        assert!(files.is_empty());
    }
}
