//! JSON-file-backed student record store
//!
//! Owns the in-memory roster and keeps the backing file synchronized after
//! every mutating operation. Every operation is a single synchronous step:
//! validate, mutate or reject, persist if mutated. The in-memory list is
//! never left changed by a rejected operation.

use crate::core::models::{Student, StudentUpdate, MAX_AGE};
use crate::core::stats::{self, RosterStats};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced by store operations. All of them are recoverable by the
/// caller; none should terminate the process.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Blank required field or malformed/out-of-range numeric field
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An add collided with an existing record id
    #[error("a student with id '{0}' already exists")]
    DuplicateId(String),

    /// No record matched the requested id
    #[error("no student with id '{0}'")]
    NotFound(String),

    /// Backing file is present but not a parseable list of records.
    /// `open` recovers from this locally by starting empty.
    #[error("backing file is not a valid student list: {0}")]
    CorruptStore(String),

    /// Underlying file I/O failure
    #[error("file error: {0}")]
    Io(#[from] io::Error),
}

/// Result of an update: which supplied fields were applied or rejected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// At least one supplied field was accepted (and the store persisted)
    pub changed: bool,
    /// A supplied age was outside [0, `MAX_AGE`] and kept its prior value
    pub age_rejected: bool,
}

/// The in-memory roster plus its backing-file synchronization logic.
///
/// No other component touches the record list directly; shells go through
/// this interface.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    students: Vec<Student>,
}

impl RecordStore {
    /// Open the store backed by `path`.
    ///
    /// A missing file yields an empty store. A present but unparseable file
    /// (or one whose top-level value is not a list) also yields an empty
    /// store, with a warning logged; the file is only rewritten on the next
    /// mutation. Entries that are not objects or lack `id`/`name` keys are
    /// dropped; `age` is coerced per the digit-string rule.
    ///
    /// # Errors
    /// Returns an error only for file I/O failures other than "not found".
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let students = match fs::read_to_string(&path) {
            Ok(content) => match parse_records(&content) {
                Ok(students) => students,
                Err(err) => {
                    logger::warn!(
                        "{} is corrupted, starting with an empty roster: {err}",
                        path.display()
                    );
                    Vec::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(StoreError::Io(err)),
        };
        Ok(Self { path, students })
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records in store order
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether the roster is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Serialize the full list back to the backing file, overwriting it
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.students)
            .map_err(|err| StoreError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Look up a record by id; the query id is trimmed before comparison
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Student> {
        let sid = id.trim();
        self.students.iter().find(|s| s.id == sid)
    }

    /// Append a new record and persist.
    ///
    /// # Errors
    /// `InvalidInput` when `id` or `name` is blank after trimming or `age`
    /// exceeds [`MAX_AGE`]; `DuplicateId` when the trimmed id already exists.
    pub fn add(&mut self, id: &str, name: &str, age: u32, degree: &str) -> Result<(), StoreError> {
        let student = Student::new(id, name, age, degree);
        if student.id.is_empty() || student.name.is_empty() {
            return Err(StoreError::InvalidInput(
                "id and name cannot be empty".to_string(),
            ));
        }
        if age > MAX_AGE {
            return Err(StoreError::InvalidInput(format!(
                "age must be between 0 and {MAX_AGE}"
            )));
        }
        if self.find_by_id(&student.id).is_some() {
            return Err(StoreError::DuplicateId(student.id));
        }
        self.students.push(student);
        self.save()
    }

    /// Case-insensitive substring search against record names, store order
    /// preserved.
    ///
    /// # Errors
    /// `InvalidInput` when the term is blank after trimming.
    pub fn search_by_name(&self, term: &str) -> Result<Vec<&Student>, StoreError> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Err(StoreError::InvalidInput(
                "search term cannot be empty".to_string(),
            ));
        }
        Ok(self
            .students
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .collect())
    }

    /// Apply a partial update to the record with `id` and persist when at
    /// least one field was accepted.
    ///
    /// Blank or absent fields keep their current values. An out-of-range age
    /// is rejected for that field only; other supplied fields still apply.
    ///
    /// # Errors
    /// `NotFound` when no record matches the trimmed id.
    pub fn update(&mut self, id: &str, update: &StudentUpdate) -> Result<UpdateOutcome, StoreError> {
        let sid = id.trim();
        let Some(index) = self.students.iter().position(|s| s.id == sid) else {
            return Err(StoreError::NotFound(sid.to_string()));
        };

        let mut outcome = UpdateOutcome::default();
        {
            let student = &mut self.students[index];
            if let Some(name) = update.name.as_deref() {
                let name = name.trim();
                if !name.is_empty() {
                    student.name = name.to_string();
                    outcome.changed = true;
                }
            }
            match update.age {
                Some(age) if age <= MAX_AGE => {
                    student.age = age;
                    outcome.changed = true;
                }
                Some(_) => outcome.age_rejected = true,
                None => {}
            }
            if let Some(degree) = update.degree.as_deref() {
                let degree = degree.trim();
                if !degree.is_empty() {
                    student.degree = degree.to_string();
                    outcome.changed = true;
                }
            }
        }

        if outcome.changed {
            self.save()?;
        }
        Ok(outcome)
    }

    /// Remove the record with `id`, persist, and return it.
    ///
    /// # Errors
    /// `NotFound` when no record matches the trimmed id.
    pub fn remove(&mut self, id: &str) -> Result<Student, StoreError> {
        let sid = id.trim();
        let Some(index) = self.students.iter().position(|s| s.id == sid) else {
            return Err(StoreError::NotFound(sid.to_string()));
        };
        let removed = self.students.remove(index);
        self.save()?;
        Ok(removed)
    }

    /// Derived aggregate view over the current roster
    #[must_use]
    pub fn stats(&self) -> RosterStats {
        stats::compute(&self.students)
    }
}

/// Parse the backing file content into records, dropping entries that are
/// not objects or lack `id`/`name` keys.
fn parse_records(content: &str) -> Result<Vec<Student>, StoreError> {
    let value: Value =
        serde_json::from_str(content).map_err(|err| StoreError::CorruptStore(err.to_string()))?;
    let Value::Array(items) = value else {
        return Err(StoreError::CorruptStore(
            "top-level value is not a list".to_string(),
        ));
    };
    Ok(items.iter().filter_map(coerce_record).collect())
}

fn coerce_record(value: &Value) -> Option<Student> {
    let map = value.as_object()?;
    let id = text_field(map.get("id")?)?;
    let name = text_field(map.get("name")?)?;
    let degree = map
        .get("degree")
        .and_then(text_field)
        .unwrap_or_default();
    let age = coerce_age(map.get("age"));
    Some(Student {
        id,
        name,
        age,
        degree,
    })
}

/// Accept string or numeric JSON values for text fields, trimmed
fn text_field(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerce an age value to an integer, defaulting to 0 unless it is a
/// non-negative digit string (or integer) within [0, `MAX_AGE`]
fn coerce_age(value: Option<&Value>) -> u32 {
    let raw = match value {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s.trim().to_string(),
        _ => return 0,
    };
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return 0;
    }
    match raw.parse::<u32>() {
        Ok(age) if age <= MAX_AGE => age,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, RecordStore) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = RecordStore::open(dir.path().join("students.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_open_missing_file_yields_empty_store() {
        let (_dir, store) = temp_store();
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_then_find_returns_exact_fields() {
        let (_dir, mut store) = temp_store();
        store.add(" 1001 ", " Amy Chen ", 20, " CS ").unwrap();

        let found = store.find_by_id("1001").unwrap();
        assert_eq!(found.id, "1001");
        assert_eq!(found.name, "Amy Chen");
        assert_eq!(found.age, 20);
        assert_eq!(found.degree, "CS");
    }

    #[test]
    fn test_find_trims_query_id() {
        let (_dir, mut store) = temp_store();
        store.add("1001", "Amy", 20, "CS").unwrap();
        assert!(store.find_by_id("  1001  ").is_some());
        assert!(store.find_by_id("9999").is_none());
    }

    #[test]
    fn test_add_duplicate_id_leaves_store_unchanged() {
        let (_dir, mut store) = temp_store();
        store.add("1001", "Amy", 20, "CS").unwrap();

        let err = store.add("1001", "Bob", 25, "Math").unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(_)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.find_by_id("1001").unwrap().name, "Amy");
    }

    #[test]
    fn test_add_blank_required_fields_rejected() {
        let (_dir, mut store) = temp_store();

        let err = store.add("  ", "Amy", 20, "CS").unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
        let err = store.add("1001", "   ", 20, "CS").unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_age_out_of_range_rejected() {
        let (_dir, mut store) = temp_store();
        let err = store.add("1001", "Amy", 121, "CS").unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let (_dir, mut store) = temp_store();
        store.add("1", "Amy Chen", 20, "CS").unwrap();
        store.add("2", "Bob Smith", 22, "Math").unwrap();
        store.add("3", "amy lee", 0, "").unwrap();

        let matches = store.search_by_name("AMY").unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, "1"); // store order preserved
        assert_eq!(matches[1].id, "3");
    }

    #[test]
    fn test_search_empty_term_rejected() {
        let (_dir, store) = temp_store();
        let err = store.search_by_name("   ").unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let (_dir, mut store) = temp_store();
        let err = store
            .update("1001", &StudentUpdate::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_update_blank_fields_keep_current_values() {
        let (_dir, mut store) = temp_store();
        store.add("1001", "Amy", 20, "CS").unwrap();

        let update = StudentUpdate {
            name: Some("   ".to_string()),
            age: None,
            degree: Some(String::new()),
        };
        let outcome = store.update("1001", &update).unwrap();
        assert!(!outcome.changed);

        let s = store.find_by_id("1001").unwrap();
        assert_eq!(s.name, "Amy");
        assert_eq!(s.age, 20);
        assert_eq!(s.degree, "CS");
    }

    #[test]
    fn test_update_rejects_age_but_applies_other_fields() {
        let (_dir, mut store) = temp_store();
        store.add("1001", "Amy", 20, "CS").unwrap();

        let update = StudentUpdate {
            name: Some("Amy Chen".to_string()),
            age: Some(200),
            degree: Some("Math".to_string()),
        };
        let outcome = store.update("1001", &update).unwrap();
        assert!(outcome.changed);
        assert!(outcome.age_rejected);

        let s = store.find_by_id("1001").unwrap();
        assert_eq!(s.name, "Amy Chen");
        assert_eq!(s.age, 20); // prior value retained
        assert_eq!(s.degree, "Math");
    }

    #[test]
    fn test_update_applies_all_supplied_fields() {
        let (_dir, mut store) = temp_store();
        store.add("1001", "Amy", 20, "CS").unwrap();

        let update = StudentUpdate {
            name: Some("Amy Chen".to_string()),
            age: Some(21),
            degree: Some("Physics".to_string()),
        };
        let outcome = store.update("1001", &update).unwrap();
        assert!(outcome.changed);
        assert!(!outcome.age_rejected);

        let s = store.find_by_id("1001").unwrap();
        assert_eq!(s.name, "Amy Chen");
        assert_eq!(s.age, 21);
        assert_eq!(s.degree, "Physics");
    }

    #[test]
    fn test_remove_unknown_id_leaves_store_unchanged() {
        let (_dir, mut store) = temp_store();
        store.add("1001", "Amy", 20, "CS").unwrap();

        let err = store.remove("9999").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_known_id_then_find_returns_none() {
        let (_dir, mut store) = temp_store();
        store.add("1001", "Amy", 20, "CS").unwrap();
        store.add("1002", "Bob", 22, "Math").unwrap();

        let removed = store.remove("1001").unwrap();
        assert_eq!(removed.name, "Amy");
        assert!(store.find_by_id("1001").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_save_then_open_round_trips() {
        let (_dir, mut store) = temp_store();
        store.add("1", "Amy", 20, "CS").unwrap();
        store.add("2", "Bob", 0, "").unwrap();
        store.add("3", "Cara", 25, "Math").unwrap();

        let reopened = RecordStore::open(store.path()).unwrap();
        assert_eq!(reopened.students(), store.students());
    }

    #[test]
    fn test_open_corrupt_file_yields_empty_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = RecordStore::open(&path).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_non_list_file_yields_empty_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.json");
        std::fs::write(&path, "{\"id\": \"1\"}").unwrap();

        let store = RecordStore::open(&path).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_drops_malformed_entries_and_coerces_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.json");
        std::fs::write(
            &path,
            r#"[
                {"id": " 1 ", "name": " Amy ", "age": "21", "degree": "CS", "note": "extra"},
                {"id": 2, "name": "Bob", "age": -3},
                {"name": "no id"},
                "not an object",
                {"id": "4", "name": "Dee", "age": "nineteen", "degree": "Math"},
                {"id": "5", "name": "Eve", "age": 500}
            ]"#,
        )
        .unwrap();

        let store = RecordStore::open(&path).unwrap();
        assert_eq!(store.len(), 4);

        let amy = store.find_by_id("1").unwrap();
        assert_eq!(amy.name, "Amy");
        assert_eq!(amy.age, 21);

        let bob = store.find_by_id("2").unwrap();
        assert_eq!(bob.age, 0); // negative coerces to unset
        assert_eq!(bob.degree, "");

        assert_eq!(store.find_by_id("4").unwrap().age, 0);
        assert_eq!(store.find_by_id("5").unwrap().age, 0); // out of range
    }

    #[test]
    fn test_failed_operations_do_not_rewrite_file() {
        let (_dir, mut store) = temp_store();
        store.add("1001", "Amy", 20, "CS").unwrap();
        let before = std::fs::read_to_string(store.path()).unwrap();

        let _ = store.add("1001", "Bob", 25, "Math");
        let _ = store.remove("9999");
        let _ = store.update("1001", &StudentUpdate::default());

        let after = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(before, after);
    }
}
