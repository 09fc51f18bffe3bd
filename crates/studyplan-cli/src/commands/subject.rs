//! Subject management commands for CLI.

use std::path::PathBuf;

use clap::Subcommand;
use studyplan_core::Subject;

use super::{load_or_new, save, settings_path, CommandResult};

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Add a new subject
    Add {
        /// Subject name (must be unique)
        name: String,
        /// Difficulty 1-5 (default: 3)
        #[arg(long, default_value = "3", value_parser = clap::value_parser!(u8).range(1..=5))]
        difficulty: u8,
        /// Priority 1-3 (default: 1)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u8).range(1..=3))]
        priority: u8,
        /// Weekly goal in hours, 0 to fill proportionally
        #[arg(long, default_value = "0")]
        goal_hours: f64,
    },
    /// Update an existing subject
    Update {
        /// Subject name
        name: String,
        /// New difficulty 1-5
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        difficulty: Option<u8>,
        /// New priority 1-3
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
        priority: Option<u8>,
        /// New weekly goal in hours
        #[arg(long)]
        goal_hours: Option<f64>,
    },
    /// Remove a subject
    Remove {
        /// Subject name
        name: String,
    },
    /// List subjects
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(file: Option<PathBuf>, action: SubjectAction) -> CommandResult {
    let path = settings_path(file);
    let mut doc = load_or_new(&path)?;

    match action {
        SubjectAction::Add {
            name,
            difficulty,
            priority,
            goal_hours,
        } => {
            let subject = Subject::new(name.clone())
                .with_difficulty(difficulty)
                .with_priority(priority)
                .with_goal_hours(goal_hours);
            doc.add_subject(subject)?;
            save(&doc, &path)?;
            println!("Subject added: {name}");
        }
        SubjectAction::Update {
            name,
            difficulty,
            priority,
            goal_hours,
        } => {
            let mut subject = doc
                .subject(&name)
                .cloned()
                .ok_or_else(|| format!("unknown subject: {name}"))?;
            if let Some(d) = difficulty {
                subject.difficulty = d;
            }
            if let Some(p) = priority {
                subject.priority = p;
            }
            if let Some(g) = goal_hours {
                subject.goal_hours = g;
            }
            doc.update_subject(subject)?;
            save(&doc, &path)?;
            println!("Subject updated: {name}");
        }
        SubjectAction::Remove { name } => {
            doc.remove_subject(&name)?;
            save(&doc, &path)?;
            println!("Subject removed: {name}");
        }
        SubjectAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&doc.subjects)?);
            } else if doc.subjects.is_empty() {
                println!("No subjects yet. Use 'subject add' to create one.");
            } else {
                for s in &doc.subjects {
                    println!(
                        "{}  difficulty={} priority={} goal={}h",
                        s.name, s.difficulty, s.priority, s.goal_hours
                    );
                }
            }
        }
    }
    Ok(())
}
