//! Schedule tables: plain text, Markdown and CSV.

use crate::error::Result;
use crate::model::Subject;
use crate::planner::{Session, WeeklySchedule};

use super::NO_SESSIONS;

const SCHEDULE_HEADERS: [&str; 4] = ["Day", "Time", "Subject", "Duration"];

/// One `[day, time, subject, duration]` row per session, placeholder rows for
/// empty days.
fn schedule_rows(schedule: &WeeklySchedule) -> Vec<[String; 4]> {
    let mut rows = Vec::new();
    for (day, sessions) in schedule.iter() {
        if sessions.is_empty() {
            rows.push([day.to_string(), NO_SESSIONS.into(), "-".into(), "-".into()]);
        }
        for session in sessions {
            rows.push([
                day.to_string(),
                time_range(session),
                session.subject.clone(),
                format!("{} min", session.duration),
            ]);
        }
    }
    rows
}

fn time_range(session: &Session) -> String {
    format!("{} - {}", session.start, session.end)
}

/// Column-aligned text table with a dashed rule under the header.
pub(crate) fn format_table<const N: usize>(headers: [&str; N], rows: &[[String; N]]) -> String {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_line = |cells: Vec<&str>| {
        let line = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    };

    push_line(headers.to_vec());
    let rules: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(rules.iter().map(String::as_str).collect());
    for row in rows {
        push_line(row.iter().map(String::as_str).collect());
    }
    out
}

/// Markdown pipe table.
pub(crate) fn format_markdown_table<const N: usize>(headers: [&str; N], rows: &[[String; N]]) -> String {
    let mut out = format!("| {} |\n", headers.join(" | "));
    out.push_str(&format!("|{}\n", " --- |".repeat(N)));
    for row in rows {
        let cells: Vec<String> = row.iter().map(|c| c.replace('|', "\\|")).collect();
        out.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
    out
}

/// Plain-text schedule table.
pub fn render_table(schedule: &WeeklySchedule) -> String {
    format_table(SCHEDULE_HEADERS, &schedule_rows(schedule))
}

/// Markdown document: title, schedule table and, when `subjects` is not
/// empty, a subject overview table.
pub fn render_markdown(schedule: &WeeklySchedule, subjects: &[Subject], user_name: &str) -> String {
    let name = user_name.trim();
    let mut out = if name.is_empty() {
        "# Smart Study Schedule\n\n".to_string()
    } else {
        format!("# Smart Study Schedule – {name}\n\n")
    };
    out.push_str(&format_markdown_table(SCHEDULE_HEADERS, &schedule_rows(schedule)));

    if !subjects.is_empty() {
        let rows: Vec<[String; 4]> = subjects
            .iter()
            .map(|s| {
                [
                    s.name.clone(),
                    s.difficulty.to_string(),
                    s.priority.to_string(),
                    format!("{:.1}", s.goal_hours),
                ]
            })
            .collect();
        out.push_str("\n## Subjects\n\n");
        out.push_str(&format_markdown_table(
            ["Subject", "Difficulty", "Priority", "Goal (hrs)"],
            &rows,
        ));
    }
    out
}

/// CSV export with header `day,start,end,subject,duration`.
///
/// Empty days produce a row with blank times and `No sessions` as subject.
///
/// # Errors
///
/// Returns an error if the CSV writer fails.
pub fn render_csv(schedule: &WeeklySchedule) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["day", "start", "end", "subject", "duration"])?;
    for (day, sessions) in schedule.iter() {
        if sessions.is_empty() {
            wtr.write_record([day.name(), "", "", NO_SESSIONS, ""])?;
        }
        for s in sessions {
            wtr.write_record([
                day.name().to_string(),
                s.start.to_string(),
                s.end.to_string(),
                s.subject.clone(),
                s.duration.to_string(),
            ])?;
        }
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}
