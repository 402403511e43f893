//! Grade persistence
//!
//! The engine never touches storage directly; callers wire a [`GradeStore`]
//! and persist the set after every mutation. The file-backed store keeps one
//! JSON document mapping course ids to evaluation record arrays, the same
//! shape the data had in the original single-key browser storage.

use crate::core::models::evaluation::MAX_TOTAL_WEIGHT;
use crate::core::models::evaluation_set::WEIGHT_EPSILON;
use crate::core::models::EvaluationSet;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Key-value persistence for evaluation sets, keyed by course identifier
pub trait GradeStore {
    /// Load the evaluation set for a course, empty when none was saved yet
    ///
    /// # Errors
    /// Returns an error when the backing storage cannot be read or parsed.
    fn load(&self, course_id: &str) -> Result<EvaluationSet, String>;

    /// Persist the evaluation set for a course
    ///
    /// # Errors
    /// Returns an error when the backing storage cannot be written.
    fn save(&self, course_id: &str, set: &EvaluationSet) -> Result<(), String>;
}

/// File-backed store: one JSON file holding `{course_id: [records]}`
///
/// Writes are read-modify-write over the whole document; no cross-process
/// atomicity is attempted (single-user, single-session deployment).
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

type GradeDocument = BTreeMap<String, EvaluationSet>;

impl JsonFileStore {
    /// Create a store backed by the given JSON file.
    /// The file is created lazily on first save.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<GradeDocument, String> {
        if !self.path.exists() {
            return Ok(GradeDocument::new());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| format!("Failed to read grade store {}: {e}", self.path.display()))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse grade store {}: {e}", self.path.display()))
    }

    fn write_document(&self, document: &GradeDocument) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                format!("Failed to create data directory {}: {e}", parent.display())
            })?;
        }

        let content = serde_json::to_string_pretty(document)
            .map_err(|e| format!("Failed to serialize grade store: {e}"))?;
        fs::write(&self.path, content)
            .map_err(|e| format!("Failed to write grade store {}: {e}", self.path.display()))
    }
}

impl GradeStore for JsonFileStore {
    fn load(&self, course_id: &str) -> Result<EvaluationSet, String> {
        let document = self.read_document()?;
        let set = document.get(course_id).cloned().unwrap_or_default();

        // The set operations keep weights within budget; a hand-edited file
        // can violate it and would corrupt every projection downstream.
        let total = set.total_weight();
        if total > MAX_TOTAL_WEIGHT + WEIGHT_EPSILON {
            return Err(format!(
                "Grade store {} holds {total}% total weight for {course_id}; the limit is 100%",
                self.path.display()
            ));
        }
        Ok(set)
    }

    fn save(&self, course_id: &str, set: &EvaluationSet) -> Result<(), String> {
        let mut document = self.read_document()?;
        document.insert(course_id.to_string(), set.clone());
        self.write_document(&document)
    }
}

/// In-memory store for tests and embedding
///
/// Interior mutability keeps the trait object usable behind `&self`; the
/// engine is single-threaded, so `RefCell` suffices.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sets: RefCell<BTreeMap<String, EvaluationSet>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl GradeStore for MemoryStore {
    fn load(&self, course_id: &str) -> Result<EvaluationSet, String> {
        Ok(self
            .sets
            .borrow()
            .get(course_id)
            .cloned()
            .unwrap_or_default())
    }

    fn save(&self, course_id: &str, set: &EvaluationSet) -> Result<(), String> {
        self.sets
            .borrow_mut()
            .insert(course_id.to_string(), set.clone());
        Ok(())
    }
}
