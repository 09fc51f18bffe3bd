//! Human-readable renderings of a generated plan.
//!
//! Every renderer lists all seven days; a day without sessions gets an
//! explicit "No sessions" placeholder row instead of being left out.

mod summary;
mod table;

pub use summary::PlanSummary;
pub use table::{render_csv, render_markdown, render_table};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result};
use crate::model::Subject;
use crate::planner::StudyPlan;

/// Placeholder text for days without sessions.
pub const NO_SESSIONS: &str = "No sessions";

/// Output formats for a generated plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Markdown,
    Csv,
    Json,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Table,
        OutputFormat::Markdown,
        OutputFormat::Csv,
        OutputFormat::Json,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "md" => Ok(OutputFormat::Markdown),
            "text" | "txt" => Ok(OutputFormat::Table),
            _ => OutputFormat::ALL
                .into_iter()
                .find(|f| f.as_str() == lower)
                .ok_or_else(|| InputError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render `plan` in the requested format.
///
/// `subjects` and `user_name` only appear in the Markdown document.
/// `with_summary` appends the goal summary to table and Markdown output;
/// JSON output always carries the per-subject allocations.
///
/// # Errors
///
/// Returns an error if JSON or CSV serialization fails.
pub fn render(
    format: OutputFormat,
    plan: &StudyPlan,
    subjects: &[Subject],
    user_name: &str,
    with_summary: bool,
) -> Result<String> {
    let summary = PlanSummary::from_plan(plan);
    let mut out = match format {
        OutputFormat::Table => render_table(&plan.schedule),
        OutputFormat::Markdown => render_markdown(&plan.schedule, subjects, user_name),
        OutputFormat::Csv => return render_csv(&plan.schedule),
        OutputFormat::Json => {
            return Ok(serde_json::to_string_pretty(&serde_json::json!({
                "schedule": plan.schedule,
                "summary": summary,
            }))?)
        }
    };
    if with_summary {
        out.push('\n');
        match format {
            OutputFormat::Markdown => out.push_str(&summary.render_markdown()),
            _ => out.push_str(&summary.render_text()),
        }
    }
    Ok(out)
}

/// `"2h 5m"` for 125 minutes, `"45m"` under an hour.
pub fn human_hours(minutes: u32) -> String {
    let (h, m) = (minutes / 60, minutes % 60);
    if h > 0 {
        format!("{h}h {m}m")
    } else {
        format!("{m}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Day, TimeWindow, WeeklyAvailability};
    use crate::planner::Planner;

    fn plan() -> StudyPlan {
        let availability = WeeklyAvailability::new().with_window(
            Day::Monday,
            TimeWindow::new("09:00".parse().unwrap(), "12:00".parse().unwrap()),
        );
        Planner::default()
            .plan(&[Subject::new("Math")], &availability)
            .unwrap()
    }

    #[test]
    fn human_hours_formats() {
        assert_eq!(human_hours(0), "0m");
        assert_eq!(human_hours(45), "45m");
        assert_eq!(human_hours(60), "1h 0m");
        assert_eq!(human_hours(125), "2h 5m");
    }

    #[test]
    fn output_format_parsing() {
        assert_eq!("Markdown".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert!(matches!(
            "pdf".parse::<OutputFormat>(),
            Err(InputError::UnknownFormat(_))
        ));
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn json_output_contains_schedule_and_summary() {
        let out = render(OutputFormat::Json, &plan(), &[], "", false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["schedule"]["Monday"].as_array().unwrap().len(), 2);
        assert_eq!(value["schedule"]["Sunday"], serde_json::json!([]));
        assert_eq!(value["summary"]["subjects"][0]["name"], "Math");
    }

    #[test]
    fn summary_is_appended_on_request() {
        let without = render(OutputFormat::Table, &plan(), &[], "", false).unwrap();
        let with = render(OutputFormat::Table, &plan(), &[], "", true).unwrap();
        assert!(with.starts_with(&without));
        assert!(with.contains("Available: 3h 0m"));
        assert!(!without.contains("Available:"));
    }
}
