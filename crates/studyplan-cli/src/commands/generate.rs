//! Schedule generation command for CLI.

use std::path::PathBuf;

use clap::Args;
use studyplan_core::{report, Config, OutputFormat, SettingsDocument};

use super::{settings_path, CommandResult};

#[derive(Args)]
pub struct GenerateArgs {
    /// Output format: table, markdown, csv, json (default from config)
    #[arg(long)]
    format: Option<String>,
    /// Write to a file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Append goal and utilization summary
    #[arg(long)]
    summary: bool,
}

pub fn run(file: Option<PathBuf>, args: GenerateArgs) -> CommandResult {
    let path = settings_path(file);
    let doc = SettingsDocument::load(&path)?;
    let config = Config::load_or_default();

    let format = match args.format {
        Some(f) => f.parse::<OutputFormat>()?,
        None => config.output_format(),
    };
    let with_summary = args.summary || config.output.summary;

    let plan = doc.plan()?;
    let rendered = report::render(
        format,
        &plan,
        &doc.subjects,
        &doc.settings.user_name,
        with_summary,
    )?;

    match args.output {
        Some(out) => {
            std::fs::write(&out, &rendered)?;
            tracing::info!(path = %out.display(), %format, "schedule written");
            println!(
                "Schedule written to {} ({} sessions)",
                out.display(),
                plan.schedule.session_count()
            );
        }
        None => {
            print!("{rendered}");
            if !rendered.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}
