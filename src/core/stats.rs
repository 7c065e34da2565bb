//! Aggregate statistics over the roster
//!
//! Ages of 0 mean "unspecified" and are excluded from the age aggregates.

use crate::core::models::Student;

/// Number of records sharing one degree label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeCount {
    /// Degree label; blank degrees are bucketed as "Unknown"
    pub degree: String,
    /// Records carrying this degree
    pub count: usize,
}

/// Derived aggregate view of the roster
#[derive(Debug, Clone, PartialEq)]
pub struct RosterStats {
    /// Total record count
    pub total: usize,
    /// Average age over records with a real age, rounded to one decimal;
    /// 0 when no such records exist
    pub avg_age: f64,
    /// Minimum real age, 0 when none
    pub min_age: u32,
    /// Maximum real age, 0 when none
    pub max_age: u32,
    /// Degree breakdown, sorted descending by count with first-seen order
    /// as the tie-break
    pub degrees: Vec<DegreeCount>,
}

/// Compute statistics over a slice of records
#[must_use]
pub fn compute(students: &[Student]) -> RosterStats {
    let ages: Vec<u32> = students
        .iter()
        .filter(|s| s.has_age())
        .map(|s| s.age)
        .collect();

    let (avg_age, min_age, max_age) = if ages.is_empty() {
        (0.0, 0, 0)
    } else {
        let sum: u64 = ages.iter().map(|&a| u64::from(a)).sum();
        #[allow(clippy::cast_precision_loss)]
        let avg = sum as f64 / ages.len() as f64;
        (
            (avg * 10.0).round() / 10.0,
            ages.iter().copied().min().unwrap_or(0),
            ages.iter().copied().max().unwrap_or(0),
        )
    };

    let mut degrees: Vec<DegreeCount> = Vec::new();
    for student in students {
        let label = student.degree_label();
        match degrees.iter_mut().find(|d| d.degree == label) {
            Some(entry) => entry.count += 1,
            None => degrees.push(DegreeCount {
                degree: label.to_string(),
                count: 1,
            }),
        }
    }
    // Stable sort keeps first-seen order among equal counts
    degrees.sort_by(|a, b| b.count.cmp(&a.count));

    RosterStats {
        total: students.len(),
        avg_age,
        min_age,
        max_age,
        degrees,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_roster() {
        let stats = compute(&[]);
        assert_eq!(stats.total, 0);
        assert!((stats.avg_age - 0.0).abs() < f64::EPSILON);
        assert_eq!(stats.min_age, 0);
        assert_eq!(stats.max_age, 0);
        assert!(stats.degrees.is_empty());
    }

    #[test]
    fn test_unset_ages_excluded_from_aggregates() {
        let students = vec![
            Student::new("1", "Amy", 20, "CS"),
            Student::new("2", "Bo", 0, ""),
        ];
        let stats = compute(&students);

        assert_eq!(stats.total, 2);
        assert!((stats.avg_age - 20.0).abs() < f64::EPSILON);
        assert_eq!(stats.min_age, 20);
        assert_eq!(stats.max_age, 20);
        assert_eq!(stats.degrees.len(), 2);
        assert_eq!(stats.degrees[0].degree, "CS");
        assert_eq!(stats.degrees[0].count, 1);
        assert_eq!(stats.degrees[1].degree, "Unknown");
        assert_eq!(stats.degrees[1].count, 1);
    }

    #[test]
    fn test_average_rounds_to_one_decimal() {
        let students = vec![
            Student::new("1", "Amy", 20, "CS"),
            Student::new("2", "Bob", 21, "CS"),
        ];
        let stats = compute(&students);
        assert!((stats.avg_age - 20.5).abs() < f64::EPSILON);
        assert_eq!(stats.min_age, 20);
        assert_eq!(stats.max_age, 21);
    }

    #[test]
    fn test_degree_breakdown_sorted_by_count_descending() {
        let students = vec![
            Student::new("1", "Amy", 20, "Math"),
            Student::new("2", "Bob", 22, "CS"),
            Student::new("3", "Cara", 23, "CS"),
            Student::new("4", "Dee", 0, ""),
        ];
        let stats = compute(&students);

        assert_eq!(stats.degrees[0].degree, "CS");
        assert_eq!(stats.degrees[0].count, 2);
        // Tie between Math and Unknown resolves in first-seen order
        assert_eq!(stats.degrees[1].degree, "Math");
        assert_eq!(stats.degrees[2].degree, "Unknown");
    }
}
