//! Direct CRUD command handlers

use super::open_store;
use logger::{error, info};
use roster::config::Config;
use roster::core::models::{Student, StudentUpdate};

/// One-line display form used by list and search output
pub fn format_line(student: &Student) -> String {
    let mut line = format!("- {} (ID: {}", student.name, student.id);
    if student.has_age() {
        line.push_str(&format!(", Age: {}", student.age));
    }
    if !student.degree.is_empty() {
        line.push_str(&format!(", Degree: {}", student.degree));
    }
    line.push(')');
    line
}

/// Handle `roster add`
pub fn add(config: &Config, id: &str, name: &str, age: u32, degree: &str) {
    let mut store = match open_store(config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    match store.add(id, name, age, degree) {
        Ok(()) => {
            info!("Added student {id}");
            println!("✓ Student added and saved.");
        }
        Err(e) => {
            error!("Add failed for id '{id}': {e}");
            eprintln!("✗ {e}");
        }
    }
}

/// Handle `roster list`
pub fn list(config: &Config) {
    let store = match open_store(config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    if store.is_empty() {
        println!("No students found.");
        return;
    }

    println!("\nStudents:");
    for student in store.students() {
        println!("{}", format_line(student));
    }
}

/// Handle `roster search`
pub fn search(config: &Config, term: &str) {
    let store = match open_store(config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    match store.search_by_name(term) {
        Ok(matches) if matches.is_empty() => println!("No matching student found."),
        Ok(matches) => {
            println!("\nMatches:");
            for student in matches {
                println!("{}", format_line(student));
            }
        }
        Err(e) => eprintln!("✗ {e}"),
    }
}

/// Handle `roster update`
pub fn update(
    config: &Config,
    id: &str,
    name: Option<String>,
    age: Option<u32>,
    degree: Option<String>,
) {
    let mut store = match open_store(config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    let input = StudentUpdate { name, age, degree };
    if input.is_empty() {
        println!("Nothing to update: supply --name, --age, or --degree.");
        return;
    }

    match store.update(id, &input) {
        Ok(outcome) => {
            if outcome.age_rejected {
                println!("✗ Invalid age. Keeping previous value.");
            }
            if outcome.changed {
                info!("Updated student {id}");
                println!("✓ Student updated and saved.");
            } else {
                println!("No changes applied.");
            }
        }
        Err(e) => {
            error!("Update failed for id '{id}': {e}");
            eprintln!("✗ {e}");
        }
    }
}

/// Handle `roster remove`
pub fn remove(config: &Config, id: &str, yes: bool) {
    let mut store = match open_store(config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    let Some(student) = store.find_by_id(id) else {
        eprintln!("✗ no student with id '{}'", id.trim());
        return;
    };

    if !yes {
        let prompt = format!(
            "Are you sure you want to delete {} (ID: {})? (y/n): ",
            student.name, student.id
        );
        if !super::menu::confirm(&prompt) {
            println!("✗ Delete cancelled.");
            return;
        }
    }

    match store.remove(id) {
        Ok(removed) => {
            info!("Removed student {}", removed.id);
            println!("✓ Student deleted and saved.");
        }
        Err(e) => {
            error!("Remove failed for id '{id}': {e}");
            eprintln!("✗ {e}");
        }
    }
}
