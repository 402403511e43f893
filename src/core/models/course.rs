//! Catalog course model

use serde::{Deserialize, Serialize};

/// Represents a course in a curriculum catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier within the curriculum (e.g., "BQ101")
    pub id: String,

    /// Course display name (e.g., "Química General")
    pub name: String,

    /// Official course code (e.g., "CQ10101")
    pub code: String,

    /// Credit load (SCT credits; can be fractional)
    pub credits: f32,
}

impl Course {
    /// Create a new course
    ///
    /// # Arguments
    /// * `id` - Unique identifier within the curriculum
    /// * `name` - Full course name
    /// * `code` - Official course code
    /// * `credits` - Credit load (can be fractional)
    #[must_use]
    pub const fn new(id: String, name: String, code: String, credits: f32) -> Self {
        Self {
            id,
            name,
            code,
            credits,
        }
    }

    /// One-line label used in listings (e.g., "Química General (CQ10101, 6 SCT)")
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({}, {} SCT)", self.name, self.code, self.credits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_creation() {
        let course = Course::new(
            "BQ101".to_string(),
            "Química General".to_string(),
            "CQ10101".to_string(),
            6.0,
        );

        assert_eq!(course.id, "BQ101");
        assert_eq!(course.name, "Química General");
        assert_eq!(course.code, "CQ10101");
        assert!((course.credits - 6.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_course_label() {
        let course = Course::new(
            "BQ102".to_string(),
            "Biología Celular".to_string(),
            "BC10002".to_string(),
            5.0,
        );

        assert_eq!(course.label(), "Biología Celular (BC10002, 5 SCT)");
    }

    #[test]
    fn test_fractional_credits() {
        let course = Course::new(
            "LAB1".to_string(),
            "Laboratorio".to_string(),
            "LB10001".to_string(),
            1.5,
        );

        assert!((course.credits - 1.5).abs() < f32::EPSILON);
    }
}
