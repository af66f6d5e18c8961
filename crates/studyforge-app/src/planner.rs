use std::collections::BTreeSet;

use studyforge_persist::StudyPlanRepository;
use studyforge_types::StudyPlan;

use crate::error::{AppError, Result};

pub const DEFAULT_DURATION: &str = "1 week";

/// Current study plan and its completion marks.
///
/// Completion is keyed by `period-description`. A regenerated plan whose
/// task text differs does not inherit any marks.
pub struct Planner {
    repo: StudyPlanRepository,
    plan: Option<StudyPlan>,
    checked: BTreeSet<String>,
}

impl Planner {
    pub fn new(repo: StudyPlanRepository) -> Self {
        let plan = repo.load_plan();
        let checked = repo.checked_tasks();
        Self {
            repo,
            plan,
            checked,
        }
    }

    pub fn reload(&mut self) {
        self.plan = self.repo.load_plan();
        self.checked = self.repo.checked_tasks();
    }

    pub fn plan(&self) -> Option<&StudyPlan> {
        self.plan.as_ref()
    }

    pub fn has_plan(&self) -> bool {
        self.plan.is_some()
    }

    pub fn is_checked(&self, period: &str, description: &str) -> bool {
        self.checked
            .contains(&StudyPlan::task_id(period, description))
    }

    /// Stores `plan` and clears all progress
    pub fn replace(&mut self, plan: StudyPlan) -> Result<()> {
        self.repo.replace_plan(&plan)?;
        tracing::info!(title = %plan.plan_title, tasks = plan.task_count(), "Study plan replaced");
        self.plan = Some(plan);
        self.checked.clear();
        Ok(())
    }

    /// Toggles the task at zero-based positions, returning whether it is now
    /// checked
    pub fn toggle(&mut self, day: usize, task: usize) -> Result<bool> {
        let id = self
            .plan
            .as_ref()
            .and_then(|p| p.schedule.get(day))
            .and_then(|d| d.tasks.get(task).map(|t| StudyPlan::task_id(&d.period, &t.description)))
            .ok_or(AppError::TaskNotFound {
                day: day + 1,
                task: task + 1,
            })?;
        let now_checked = self.repo.toggle_task(&id)?;
        self.checked = self.repo.checked_tasks();
        Ok(now_checked)
    }

    pub fn clear_progress(&mut self) -> Result<()> {
        self.repo.clear_progress()?;
        self.checked.clear();
        Ok(())
    }

    /// Completed share of the plan's tasks, 0 to 100
    pub fn progress(&self) -> f64 {
        let Some(plan) = &self.plan else {
            return 0.0;
        };
        let ids = plan.task_ids();
        if ids.is_empty() {
            return 0.0;
        }
        let done = ids.iter().filter(|id| self.checked.contains(*id)).count();
        done as f64 / ids.len() as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use studyforge_persist::MemoryStore;
    use studyforge_types::{StudyDay, StudyTask, TaskType};

    fn plan(task: &str) -> StudyPlan {
        StudyPlan {
            plan_title: "Chemistry".into(),
            schedule: vec![StudyDay {
                period: "Day 1".into(),
                topics: vec!["Bonds".into()],
                tasks: vec![
                    StudyTask {
                        description: task.into(),
                        task_type: TaskType::Read,
                    },
                    StudyTask {
                        description: "Quiz yourself".into(),
                        task_type: TaskType::Quiz,
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut planner = Planner::new(StudyPlanRepository::new(Arc::new(MemoryStore::new())));
        planner.replace(plan("Read 2.1")).unwrap();

        assert!(planner.toggle(0, 0).unwrap());
        assert_eq!(planner.progress(), 50.0);
        assert!(!planner.toggle(0, 0).unwrap());
        assert_eq!(planner.progress(), 0.0);
        assert!(matches!(planner.toggle(3, 0), Err(AppError::TaskNotFound { .. })));
    }

    #[test]
    fn test_renamed_task_loses_completion() {
        let repo = StudyPlanRepository::new(Arc::new(MemoryStore::new()));
        let mut planner = Planner::new(repo.clone());
        planner.replace(plan("Read 2.1")).unwrap();
        planner.toggle(0, 0).unwrap();
        assert!(planner.is_checked("Day 1", "Read 2.1"));

        // Same period, edited description: the old mark no longer applies
        repo.save_plan(&plan("Read section 2.1")).unwrap();
        planner.reload();
        assert!(!planner.is_checked("Day 1", "Read section 2.1"));
        assert_eq!(planner.progress(), 0.0);
    }
}
