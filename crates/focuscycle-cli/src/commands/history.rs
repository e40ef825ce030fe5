use chrono::Local;

use focuscycle_core::storage::{Database, SnapshotStore};

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let state = SnapshotStore::new(db).load();

    if json {
        println!("{}", serde_json::to_string_pretty(&state.cycles)?);
        return Ok(());
    }

    if state.cycles.is_empty() {
        println!("No cycles yet");
        return Ok(());
    }

    println!(
        "{:<30} {:>7}  {:<19}  {}",
        "Task", "Minutes", "Started", "Status"
    );
    for cycle in &state.cycles {
        let started = cycle
            .start_date
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S");
        println!(
            "{:<30} {:>7}  {}  {}",
            truncate(&cycle.task, 30),
            cycle.minutes_amount,
            started,
            cycle.status().as_str(),
        );
    }
    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
