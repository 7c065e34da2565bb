//! Stats command handler

use super::open_store;
use roster::config::Config;

/// Handle `roster stats`
pub fn run(config: &Config) {
    let store = match open_store(config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };

    let stats = store.stats();
    println!("\n=== Roster Statistics ===\n");
    println!("Total students: {}", stats.total);
    println!(
        "Age (excluding unset): avg {} | min {} | max {}",
        stats.avg_age, stats.min_age, stats.max_age
    );

    if stats.degrees.is_empty() {
        println!("No degree data.");
        return;
    }

    println!("\nStudents by degree:");
    for entry in &stats.degrees {
        println!("  {:<30} {}", entry.degree, entry.count);
    }
}
