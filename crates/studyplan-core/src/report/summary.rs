//! Planned-versus-available summary for a generated plan.

use serde::{Deserialize, Serialize};

use super::human_hours;
use super::table::{format_markdown_table, format_table};
use crate::planner::{StudyPlan, SubjectAllocation};

/// Totals and per-subject coverage for one plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub total_available_minutes: u32,
    pub scheduled_minutes: u32,
    /// Available minutes spent on breaks or left as slack
    pub unscheduled_minutes: u32,
    pub session_count: usize,
    pub subjects: Vec<SubjectAllocation>,
}

impl PlanSummary {
    pub fn from_plan(plan: &StudyPlan) -> Self {
        let scheduled_minutes = plan.schedule.total_minutes();
        Self {
            total_available_minutes: plan.total_available_minutes,
            scheduled_minutes,
            unscheduled_minutes: plan.total_available_minutes.saturating_sub(scheduled_minutes),
            session_count: plan.schedule.session_count(),
            subjects: plan.allocations.clone(),
        }
    }

    /// Subjects whose explicit goal was not reached.
    pub fn unmet_goals(&self) -> impl Iterator<Item = &SubjectAllocation> {
        self.subjects.iter().filter(|s| !s.goal_met())
    }

    /// Share of available time that became sessions, 0.0-1.0.
    pub fn utilization(&self) -> f64 {
        if self.total_available_minutes == 0 {
            return 0.0;
        }
        f64::from(self.scheduled_minutes) / f64::from(self.total_available_minutes)
    }

    fn headline(&self) -> String {
        format!(
            "Available: {} | Scheduled: {} | Unscheduled: {} | Sessions: {}",
            human_hours(self.total_available_minutes),
            human_hours(self.scheduled_minutes),
            human_hours(self.unscheduled_minutes),
            self.session_count,
        )
    }

    fn rows(&self) -> Vec<[String; 5]> {
        self.subjects
            .iter()
            .map(|s| {
                [
                    s.name.clone(),
                    s.weight.to_string(),
                    human_hours(s.goal_minutes),
                    human_hours(s.target_minutes),
                    human_hours(s.scheduled_minutes),
                ]
            })
            .collect()
    }

    const HEADERS: [&'static str; 5] = ["Subject", "Weight", "Goal", "Target", "Scheduled"];

    pub fn render_text(&self) -> String {
        let mut out = self.headline();
        out.push('\n');
        if !self.subjects.is_empty() {
            out.push('\n');
            out.push_str(&format_table(Self::HEADERS, &self.rows()));
        }
        for unmet in self.unmet_goals() {
            out.push_str(&format!(
                "Goal not met for {}: {} of {}\n",
                unmet.name,
                human_hours(unmet.scheduled_minutes),
                human_hours(unmet.goal_minutes)
            ));
        }
        out
    }

    pub fn render_markdown(&self) -> String {
        let mut out = format!("## Summary\n\n{}\n", self.headline());
        if !self.subjects.is_empty() {
            out.push('\n');
            out.push_str(&format_markdown_table(Self::HEADERS, &self.rows()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Day, Subject, TimeWindow, WeeklyAvailability};
    use crate::planner::Planner;

    fn plan(subjects: &[Subject]) -> StudyPlan {
        let availability = WeeklyAvailability::new().with_window(
            Day::Monday,
            TimeWindow::new("09:00".parse().unwrap(), "12:00".parse().unwrap()),
        );
        Planner::default().plan(subjects, &availability).unwrap()
    }

    #[test]
    fn totals_follow_the_schedule() {
        let summary = PlanSummary::from_plan(&plan(&[Subject::new("Math")]));
        assert_eq!(summary.total_available_minutes, 180);
        assert_eq!(summary.scheduled_minutes, 170);
        assert_eq!(summary.unscheduled_minutes, 10);
        assert_eq!(summary.session_count, 2);
        assert!((summary.utilization() - 170.0 / 180.0).abs() < 1e-9);
        assert_eq!(summary.unmet_goals().count(), 0);
    }

    #[test]
    fn unmet_goals_are_listed() {
        let summary = PlanSummary::from_plan(&plan(&[Subject::new("Math").with_goal_hours(5.0)]));
        let unmet: Vec<&str> = summary.unmet_goals().map(|s| s.name.as_str()).collect();
        assert_eq!(unmet, vec!["Math"]);
        let text = summary.render_text();
        assert!(text.starts_with("Available: 3h 0m | Scheduled: 2h 50m | Unscheduled: 10m | Sessions: 2\n"));
        assert!(text.contains("Goal not met for Math: 2h 50m of 5h 0m"));
    }

    #[test]
    fn empty_plan_summary() {
        let summary = PlanSummary::from_plan(&plan(&[]));
        assert_eq!(summary.utilization(), 0.0);
        assert_eq!(summary.session_count, 0);
        assert!(summary.render_markdown().starts_with("## Summary\n\nAvailable: 3h 0m"));
    }
}
