//! Weekly availability commands for CLI.

use std::path::PathBuf;

use clap::Subcommand;
use studyplan_core::{ClockTime, Day, TimeWindow};

use super::{load_or_new, save, settings_path, CommandResult};

#[derive(Subcommand)]
pub enum AvailabilityAction {
    /// Add a time window to a day
    Add {
        /// Day name (e.g. Monday or mon)
        day: String,
        /// Start time (HH:MM)
        start: String,
        /// End time (HH:MM)
        end: String,
    },
    /// Remove a window by its index in `availability list`
    Remove {
        /// Day name
        day: String,
        /// Window index
        index: usize,
    },
    /// Remove all windows of a day
    Clear {
        /// Day name
        day: String,
    },
    /// List windows per day
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(file: Option<PathBuf>, action: AvailabilityAction) -> CommandResult {
    let path = settings_path(file);
    let mut doc = load_or_new(&path)?;

    match action {
        AvailabilityAction::Add { day, start, end } => {
            let day: Day = day.parse()?;
            let start: ClockTime = start.parse()?;
            let end: ClockTime = end.parse()?;
            let window = TimeWindow::new(start, end);
            if window.is_empty() {
                tracing::warn!(%day, %start, %end, "window ends before it starts and adds no time");
            }
            doc.add_window(day, window);
            save(&doc, &path)?;
            println!("{day}: added {start} - {end}");
        }
        AvailabilityAction::Remove { day, index } => {
            let day: Day = day.parse()?;
            let removed = doc.remove_window(day, index)?;
            save(&doc, &path)?;
            println!("{day}: removed {} - {}", removed.start, removed.end);
        }
        AvailabilityAction::Clear { day } => {
            let day: Day = day.parse()?;
            doc.clear_day(day);
            save(&doc, &path)?;
            println!("{day}: cleared");
        }
        AvailabilityAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&doc.available_time)?);
                return Ok(());
            }
            for day in Day::ALL {
                let windows = doc.available_time.windows(day);
                if windows.is_empty() {
                    println!("{day}: -");
                    continue;
                }
                let listed: Vec<String> = windows
                    .iter()
                    .enumerate()
                    .map(|(i, w)| format!("[{i}] {} - {}", w.start, w.end))
                    .collect();
                println!("{day}: {}", listed.join(", "));
            }
            println!(
                "Total: {}",
                studyplan_core::report::human_hours(doc.available_time.total_minutes())
            );
        }
    }
    Ok(())
}
