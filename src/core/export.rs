//! Flat CSV export of the roster
//!
//! One line per record in store order. There is no quoting scheme; commas
//! inside a field are replaced by a single space to avoid delimiter
//! collisions.

use crate::core::models::Student;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

/// Fixed CSV header line
pub const CSV_HEADER: &str = "id,name,age,degree";

fn sanitize(field: &str) -> String {
    field.replace(',', " ")
}

/// Render the roster as CSV text
#[must_use]
pub fn render_csv(students: &[Student]) -> String {
    let mut out = String::from(CSV_HEADER);
    for s in students {
        let _ = write!(
            out,
            "\n{},{},{},{}",
            sanitize(&s.id),
            sanitize(&s.name),
            s.age,
            sanitize(&s.degree)
        );
    }
    out
}

/// Write the roster as CSV to `path`
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_csv(students: &[Student], path: &Path) -> Result<(), io::Error> {
    fs::write(path, render_csv(students))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_roster_renders_header_only() {
        assert_eq!(render_csv(&[]), "id,name,age,degree");
    }

    #[test]
    fn test_one_line_per_record_in_store_order() {
        let students = vec![
            Student::new("1", "Amy", 20, "CS"),
            Student::new("2", "Bo", 0, ""),
        ];
        let csv = render_csv(&students);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["id,name,age,degree", "1,Amy,20,CS", "2,Bo,0,"]);
    }

    #[test]
    fn test_embedded_commas_become_spaces() {
        let students = vec![Student::new("1", "Chen, Amy", 20, "Computing, AI")];
        let csv = render_csv(&students);
        assert_eq!(csv.lines().nth(1).unwrap(), "1,Chen  Amy,20,Computing  AI");
    }
}
