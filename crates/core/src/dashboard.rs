//! Dashboard metric aggregation.
//!
//! Pure fold over the project and task populations; the API layer fetches
//! the rows and passes plain facts in. This is a full-collection scan with
//! no caching, acceptable at the data volumes a single construction firm
//! produces.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::status::{ProjectStatus, TaskStatus};

/// Per-status project counts. Every key is always present, zero-initialized.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectStatusCounts {
    pub upcoming: i64,
    pub ongoing: i64,
    pub completed: i64,
    #[serde(rename = "on-hold")]
    pub on_hold: i64,
}

impl ProjectStatusCounts {
    fn bump(&mut self, status: ProjectStatus) {
        match status {
            ProjectStatus::Upcoming => self.upcoming += 1,
            ProjectStatus::Ongoing => self.ongoing += 1,
            ProjectStatus::Completed => self.completed += 1,
            ProjectStatus::OnHold => self.on_hold += 1,
        }
    }

    pub fn total(&self) -> i64 {
        self.upcoming + self.ongoing + self.completed + self.on_hold
    }
}

/// Per-status task counts. Every key is always present, zero-initialized.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct TaskStatusCounts {
    pub pending: i64,
    #[serde(rename = "in-progress")]
    pub in_progress: i64,
    pub completed: i64,
}

impl TaskStatusCounts {
    fn bump(&mut self, status: TaskStatus) {
        match status {
            TaskStatus::Pending => self.pending += 1,
            TaskStatus::InProgress => self.in_progress += 1,
            TaskStatus::Completed => self.completed += 1,
        }
    }

    pub fn total(&self) -> i64 {
        self.pending + self.in_progress + self.completed
    }
}

/// Aggregated counts over the full project/task population.
///
/// The API layer flattens this into the dashboard response alongside the
/// recency-ordered project sample, which needs the full rows.
#[derive(Debug, Clone, Serialize)]
pub struct MetricTotals {
    pub total_projects: i64,
    pub projects_by_status: ProjectStatusCounts,
    /// Category keys are created lazily from the observed values.
    pub projects_by_category: BTreeMap<String, i64>,
    pub total_tasks: i64,
    pub tasks_by_status: TaskStatusCounts,
    /// Percentage of projects with status `completed`, rounded to two
    /// decimals. Defined as 0.0 for the empty population.
    pub completion_rate: f64,
}

/// Fold project facts (status, category) and task statuses into totals.
pub fn aggregate<'a>(
    projects: impl IntoIterator<Item = (ProjectStatus, &'a str)>,
    tasks: impl IntoIterator<Item = TaskStatus>,
) -> MetricTotals {
    let mut projects_by_status = ProjectStatusCounts::default();
    let mut projects_by_category: BTreeMap<String, i64> = BTreeMap::new();
    let mut total_projects = 0;

    for (status, category) in projects {
        total_projects += 1;
        projects_by_status.bump(status);
        *projects_by_category.entry(category.to_string()).or_insert(0) += 1;
    }

    let mut tasks_by_status = TaskStatusCounts::default();
    let mut total_tasks = 0;
    for status in tasks {
        total_tasks += 1;
        tasks_by_status.bump(status);
    }

    let completion_rate = if total_projects == 0 {
        0.0
    } else {
        round2(projects_by_status.completed as f64 / total_projects as f64 * 100.0)
    };

    MetricTotals {
        total_projects,
        projects_by_status,
        projects_by_category,
        total_tasks,
        tasks_by_status,
        completion_rate,
    }
}

/// Round to two decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_population_is_all_zeros() {
        let totals = aggregate(std::iter::empty(), std::iter::empty());
        assert_eq!(totals.total_projects, 0);
        assert_eq!(totals.total_tasks, 0);
        assert_eq!(totals.projects_by_status, ProjectStatusCounts::default());
        assert_eq!(totals.tasks_by_status, TaskStatusCounts::default());
        assert!(totals.projects_by_category.is_empty());
        assert_eq!(totals.completion_rate, 0.0);
    }

    #[test]
    fn test_two_of_three_completed_rounds_to_66_67() {
        let totals = aggregate(
            [
                (ProjectStatus::Completed, "residential"),
                (ProjectStatus::Completed, "commercial"),
                (ProjectStatus::Ongoing, "residential"),
            ],
            std::iter::empty(),
        );
        assert_eq!(totals.total_projects, 3);
        assert_eq!(totals.projects_by_status.upcoming, 0);
        assert_eq!(totals.projects_by_status.ongoing, 1);
        assert_eq!(totals.projects_by_status.completed, 2);
        assert_eq!(totals.projects_by_status.on_hold, 0);
        assert_eq!(totals.completion_rate, 66.67);
    }

    #[test]
    fn test_status_counts_sum_to_totals() {
        let totals = aggregate(
            [
                (ProjectStatus::Upcoming, "a"),
                (ProjectStatus::OnHold, "b"),
                (ProjectStatus::OnHold, "b"),
                (ProjectStatus::Ongoing, "c"),
            ],
            [
                TaskStatus::Pending,
                TaskStatus::InProgress,
                TaskStatus::InProgress,
                TaskStatus::Completed,
            ],
        );
        assert_eq!(totals.projects_by_status.total(), totals.total_projects);
        assert_eq!(totals.tasks_by_status.total(), totals.total_tasks);
    }

    #[test]
    fn test_category_keys_are_lazy() {
        let totals = aggregate(
            [
                (ProjectStatus::Ongoing, "residential"),
                (ProjectStatus::Ongoing, "residential"),
                (ProjectStatus::Upcoming, "infrastructure"),
            ],
            std::iter::empty(),
        );
        assert_eq!(totals.projects_by_category.len(), 2);
        assert_eq!(totals.projects_by_category["residential"], 2);
        assert_eq!(totals.projects_by_category["infrastructure"], 1);
    }

    #[test]
    fn test_serialized_keys_use_stored_labels() {
        let totals = aggregate(
            [(ProjectStatus::OnHold, "x")],
            [TaskStatus::InProgress],
        );
        let json = serde_json::to_value(&totals).unwrap();
        assert_eq!(json["projects_by_status"]["on-hold"], 1);
        assert_eq!(json["tasks_by_status"]["in-progress"], 1);
    }
}
