//! Student record model

use serde::{Deserialize, Serialize};

/// Upper bound for a plausible student age. Ages outside [0, `MAX_AGE`] are
/// rejected on input and coerced to 0 ("unset") on load.
pub const MAX_AGE: u32 = 120;

/// A single student record as stored in the backing file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Externally supplied identifier, unique across the roster (opaque,
    /// not necessarily numeric)
    pub id: String,

    /// Student name, non-empty after trimming
    pub name: String,

    /// Age in years; 0 means "unspecified"
    pub age: u32,

    /// Degree programme; empty means "unspecified"
    pub degree: String,
}

impl Student {
    /// Create a new record, trimming all string fields
    #[must_use]
    pub fn new(id: &str, name: &str, age: u32, degree: &str) -> Self {
        Self {
            id: id.trim().to_string(),
            name: name.trim().to_string(),
            age,
            degree: degree.trim().to_string(),
        }
    }

    /// Whether this record's age field carries a real value
    #[must_use]
    pub const fn has_age(&self) -> bool {
        self.age > 0
    }

    /// Degree label for display and grouping; blank maps to "Unknown"
    #[must_use]
    pub fn degree_label(&self) -> &str {
        if self.degree.is_empty() {
            "Unknown"
        } else {
            &self.degree
        }
    }
}

/// Per-field update input: `None` means "leave unchanged".
///
/// Clearing a field to empty through an update is deliberately not possible;
/// shells translate blank input to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentUpdate {
    /// Replacement name, when supplied
    pub name: Option<String>,
    /// Replacement age, when supplied
    pub age: Option<u32>,
    /// Replacement degree, when supplied
    pub degree: Option<String>,
}

impl StudentUpdate {
    /// True when no field is supplied at all
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.degree.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_fields() {
        let s = Student::new("  1001 ", " Amy Chen ", 20, " Computer Science ");
        assert_eq!(s.id, "1001");
        assert_eq!(s.name, "Amy Chen");
        assert_eq!(s.age, 20);
        assert_eq!(s.degree, "Computer Science");
    }

    #[test]
    fn test_has_age() {
        assert!(Student::new("1", "Amy", 20, "CS").has_age());
        assert!(!Student::new("2", "Bo", 0, "").has_age());
    }

    #[test]
    fn test_degree_label_defaults_to_unknown() {
        assert_eq!(Student::new("1", "Amy", 20, "CS").degree_label(), "CS");
        assert_eq!(Student::new("2", "Bo", 0, "  ").degree_label(), "Unknown");
    }

    #[test]
    fn test_update_is_empty() {
        assert!(StudentUpdate::default().is_empty());
        let update = StudentUpdate {
            age: Some(21),
            ..StudentUpdate::default()
        };
        assert!(!update.is_empty());
    }
}
