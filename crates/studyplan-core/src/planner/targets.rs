//! Per-subject weekly minute targets.

use serde::{Deserialize, Serialize};

use crate::model::Subject;

/// How much time one subject was meant to get, and how much it got.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectAllocation {
    pub name: String,
    pub weight: u64,
    /// Explicit weekly goal in minutes (0 when none was set)
    pub goal_minutes: u32,
    /// Goal plus proportional share of leftover capacity
    pub target_minutes: u32,
    /// Minutes actually placed into sessions
    pub scheduled_minutes: u32,
}

impl SubjectAllocation {
    /// Minutes of the target that could not be placed.
    pub fn unscheduled_minutes(&self) -> u32 {
        self.target_minutes.saturating_sub(self.scheduled_minutes)
    }

    /// Whether the explicit goal was reached. Subjects without a goal always are.
    pub fn goal_met(&self) -> bool {
        self.scheduled_minutes >= self.goal_minutes
    }
}

/// Compute targets for `subjects` given `total_available` minutes.
///
/// Each subject starts at its explicit goal. Capacity left over after all
/// goals is split in proportion to weight, rounding each share down. When
/// goals already meet or exceed capacity the targets are the bare goals.
pub fn compute_targets(subjects: &[Subject], total_available: u32) -> Vec<SubjectAllocation> {
    let total_weight: u64 = subjects.iter().map(Subject::weight).sum::<u64>().max(1);
    let total_goals: i64 = subjects.iter().map(|s| i64::from(s.goal_minutes())).sum();
    let leftover = i64::from(total_available) - total_goals;

    subjects
        .iter()
        .map(|subject| {
            let weight = subject.weight();
            let goal_minutes = subject.goal_minutes();
            let share = if leftover > 0 {
                (leftover as u64 * weight / total_weight) as u32
            } else {
                0
            };
            SubjectAllocation {
                name: subject.name.clone(),
                weight,
                goal_minutes,
                target_minutes: goal_minutes.saturating_add(share),
                scheduled_minutes: 0,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(subjects: &[Subject], total: u32) -> Vec<u32> {
        compute_targets(subjects, total)
            .into_iter()
            .map(|a| a.target_minutes)
            .collect()
    }

    #[test]
    fn leftover_split_by_weight() {
        let subjects = vec![
            Subject::new("Math").with_difficulty(4).with_priority(2), // 8
            Subject::new("Art").with_difficulty(2),                   // 2
        ];
        assert_eq!(targets(&subjects, 600), vec![480, 120]);
    }

    #[test]
    fn goals_come_first_then_leftover() {
        let subjects = vec![
            Subject::new("Math").with_goal_hours(2.0),
            Subject::new("Art"),
        ];
        // 300 - 120 = 180 left, equal weights 3 and 3
        assert_eq!(targets(&subjects, 300), vec![210, 90]);
    }

    #[test]
    fn shares_round_down() {
        let subjects = vec![Subject::new("a"), Subject::new("b"), Subject::new("c")];
        assert_eq!(targets(&subjects, 100), vec![33, 33, 33]);
    }

    #[test]
    fn oversubscribed_goals_are_kept_verbatim() {
        let subjects = vec![
            Subject::new("Math").with_goal_hours(3.0),
            Subject::new("Art").with_goal_hours(2.0),
        ];
        assert_eq!(targets(&subjects, 180), vec![180, 120]);
        assert_eq!(targets(&subjects, 300), vec![180, 120]);
    }

    #[test]
    fn allocation_reports_goal_coverage() {
        let mut allocation = compute_targets(&[Subject::new("Math").with_goal_hours(1.0)], 30)
            .pop()
            .unwrap();
        assert_eq!(allocation.target_minutes, 60);
        allocation.scheduled_minutes = 30;
        assert!(!allocation.goal_met());
        assert_eq!(allocation.unscheduled_minutes(), 30);
        allocation.scheduled_minutes = 60;
        assert!(allocation.goal_met());
    }
}
