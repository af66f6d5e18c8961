use std::collections::BTreeSet;
use std::sync::Arc;

use studyforge_types::StudyPlan;

use crate::error::Result;
use crate::keys;
use crate::store::{KeyValueStore, KeyValueStoreExt};

/// The current study plan plus the parallel set of completed task ids
#[derive(Clone)]
pub struct StudyPlanRepository {
    store: Arc<dyn KeyValueStore>,
}

impl StudyPlanRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load_plan(&self) -> Option<StudyPlan> {
        self.store.get_or(keys::STUDY_PLAN, None)
    }

    pub fn save_plan(&self, plan: &StudyPlan) -> Result<()> {
        self.store.set_json(keys::STUDY_PLAN, plan)
    }

    pub fn checked_tasks(&self) -> BTreeSet<String> {
        let ids: Vec<String> = self.store.get_or_default(keys::CHECKED_TASKS);
        ids.into_iter().collect()
    }

    /// Flips completion for `task_id`, returning whether it is now checked
    pub fn toggle_task(&self, task_id: &str) -> Result<bool> {
        let mut checked = self.checked_tasks();
        let now_checked = if checked.remove(task_id) {
            false
        } else {
            checked.insert(task_id.to_string());
            true
        };
        self.store.set_json(keys::CHECKED_TASKS, &checked)?;
        Ok(now_checked)
    }

    pub fn clear_progress(&self) -> Result<()> {
        self.store.set_json(keys::CHECKED_TASKS, &Vec::<String>::new())
    }

    /// Stores a new plan and resets progress
    pub fn replace_plan(&self, plan: &StudyPlan) -> Result<()> {
        self.save_plan(plan)?;
        self.clear_progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbs::MemoryStore;

    #[test]
    fn test_toggle_task_round_trips() {
        let repo = StudyPlanRepository::new(Arc::new(MemoryStore::new()));
        assert!(repo.toggle_task("Day 1-Read ch. 1").unwrap());
        assert!(repo.checked_tasks().contains("Day 1-Read ch. 1"));
        assert!(!repo.toggle_task("Day 1-Read ch. 1").unwrap());
        assert!(repo.checked_tasks().is_empty());
    }

    #[test]
    fn test_missing_plan_is_none() {
        let repo = StudyPlanRepository::new(Arc::new(MemoryStore::new()));
        assert!(repo.load_plan().is_none());
    }
}
