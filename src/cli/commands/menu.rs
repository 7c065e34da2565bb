//! Interactive terminal menu
//!
//! Single-session loop over one store instance: loaded once at startup, held
//! in memory, persisted by the store after every mutation.

use super::{open_store, records::format_line};
use roster::config::Config;
use roster::core::models::{StudentUpdate, MAX_AGE};
use roster::core::store::{RecordStore, StoreError};
use std::io::{self, Write};

/// Handle `roster menu`
pub fn run(config: &Config) {
    let mut store = match open_store(config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    loop {
        show_menu();
        let choice = prompt("Choose (1-6): ");

        match choice.as_str() {
            "1" => add_student(&mut store),
            "2" => view_students(&store),
            "3" => search_student(&store),
            "4" => update_student(&mut store),
            "5" => delete_student(&mut store),
            "6" => {
                println!("Goodbye!");
                return;
            }
            _ => println!("Invalid choice. Please enter 1 to 6."),
        }
    }
}

fn show_menu() {
    println!("\n--- Student Management System ---");
    println!("1) Add student");
    println!("2) View all students");
    println!("3) Search student by name");
    println!("4) Update student by ID");
    println!("5) Delete student by ID");
    println!("6) Exit");
}

/// Print a prompt and read one trimmed line from stdin
fn prompt(message: &str) -> String {
    print!("{message}");
    io::stdout().flush().ok();

    let mut line = String::new();
    io::stdin().read_line(&mut line).ok();
    line.trim().to_string()
}

/// Ask a yes/no question; only an explicit "y" counts as yes
pub fn confirm(message: &str) -> bool {
    prompt(message).eq_ignore_ascii_case("y")
}

/// Interpret a raw age entry: blank means "unset" (0), otherwise it must be
/// a digit string within [0, `MAX_AGE`]
pub fn parse_age_entry(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0);
    }
    if !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    match raw.parse::<u32>() {
        Ok(age) if age <= MAX_AGE => Some(age),
        _ => None,
    }
}

/// Prompt for an age until a valid entry (or blank) is given
fn prompt_age(message: &str) -> u32 {
    loop {
        let raw = prompt(message);
        if let Some(age) = parse_age_entry(&raw) {
            return age;
        }
        println!("Please enter a valid number between 0 and {MAX_AGE} (or press Enter to skip).");
    }
}

fn add_student(store: &mut RecordStore) {
    let name = prompt("Enter student name: ");
    let id = prompt("Enter student ID: ");

    if name.is_empty() || id.is_empty() {
        println!("Name and ID cannot be empty.");
        return;
    }
    if store.find_by_id(&id).is_some() {
        println!("That student ID already exists. Please use a unique ID.");
        return;
    }

    let age = prompt_age("Enter age (optional, press Enter to skip): ");
    let degree = prompt("Enter degree (optional): ");

    match store.add(&id, &name, age, &degree) {
        Ok(()) => println!("Student added and saved."),
        Err(e) => println!("✗ {e}"),
    }
}

fn view_students(store: &RecordStore) {
    if store.is_empty() {
        println!("No students found.");
        return;
    }

    println!("\nStudents:");
    for student in store.students() {
        println!("{}", format_line(student));
    }
}

fn search_student(store: &RecordStore) {
    let keyword = prompt("Enter name to search: ");

    match store.search_by_name(&keyword) {
        Ok(matches) if matches.is_empty() => println!("No matching student found."),
        Ok(matches) => {
            println!("\nMatches:");
            for student in matches {
                println!("- {} (ID: {})", student.name, student.id);
            }
        }
        Err(StoreError::InvalidInput(_)) => println!("Search term cannot be empty."),
        Err(e) => println!("✗ {e}"),
    }
}

fn update_student(store: &mut RecordStore) {
    let id = prompt("Enter student ID to update: ");
    let Some(current) = store.find_by_id(&id) else {
        println!("Student not found.");
        return;
    };
    let (current_name, current_age, current_degree) = (
        current.name.clone(),
        current.age,
        current.degree.clone(),
    );

    println!("Press Enter to keep current value.");
    let new_name = prompt(&format!("New name (current: {current_name}): "));
    let new_age_raw = prompt(&format!("New age (current: {current_age}): "));
    let new_degree = prompt(&format!("New degree (current: {current_degree}): "));

    let mut input = StudentUpdate::default();
    if !new_name.is_empty() {
        input.name = Some(new_name);
    }
    if !new_age_raw.is_empty() {
        match parse_age_entry(&new_age_raw) {
            // Blank was already excluded, so Some here is a real age
            Some(age) => input.age = Some(age),
            None => println!("Invalid age. Keeping previous value."),
        }
    }
    if !new_degree.is_empty() {
        input.degree = Some(new_degree);
    }

    match store.update(&id, &input) {
        Ok(outcome) => {
            if outcome.age_rejected {
                println!("Invalid age. Keeping previous value.");
            }
            if outcome.changed {
                println!("Student updated and saved.");
            } else {
                println!("No changes applied.");
            }
        }
        Err(e) => println!("✗ {e}"),
    }
}

fn delete_student(store: &mut RecordStore) {
    let id = prompt("Enter student ID to delete: ");
    let Some(student) = store.find_by_id(&id) else {
        println!("Student not found.");
        return;
    };

    let question = format!(
        "Are you sure you want to delete {} (ID: {})? (y/n): ",
        student.name, student.id
    );
    if confirm(&question) {
        match store.remove(&id) {
            Ok(_) => println!("Student deleted and saved."),
            Err(e) => println!("✗ {e}"),
        }
    } else {
        println!("Delete cancelled.");
    }
}

#[cfg(test)]
mod tests {
    use super::parse_age_entry;

    #[test]
    fn test_blank_age_means_unset() {
        assert_eq!(parse_age_entry(""), Some(0));
        assert_eq!(parse_age_entry("   "), Some(0));
    }

    #[test]
    fn test_valid_ages_accepted() {
        assert_eq!(parse_age_entry("0"), Some(0));
        assert_eq!(parse_age_entry("20"), Some(20));
        assert_eq!(parse_age_entry("120"), Some(120));
    }

    #[test]
    fn test_invalid_ages_rejected() {
        assert_eq!(parse_age_entry("121"), None);
        assert_eq!(parse_age_entry("-1"), None);
        assert_eq!(parse_age_entry("twenty"), None);
        assert_eq!(parse_age_entry("20.5"), None);
    }
}
