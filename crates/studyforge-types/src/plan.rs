use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of study task. Labels outside the fixed vocabulary are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskType {
    Read,
    Watch,
    Practice,
    Review,
    Quiz,
    Other(String),
}

impl TaskType {
    pub const VOCABULARY: [&'static str; 5] = ["Read", "Watch", "Practice", "Review", "Quiz"];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Read => "Read",
            Self::Watch => "Watch",
            Self::Practice => "Practice",
            Self::Review => "Review",
            Self::Quiz => "Quiz",
            Self::Other(label) => label,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Read => "📖",
            Self::Watch => "💻",
            Self::Practice => "✍️",
            Self::Review => "🧠",
            Self::Quiz => "❓",
            Self::Other(_) => "📌",
        }
    }
}

impl From<String> for TaskType {
    fn from(label: String) -> Self {
        match label.trim().to_lowercase().as_str() {
            "read" => Self::Read,
            "watch" => Self::Watch,
            "practice" => Self::Practice,
            "review" => Self::Review,
            "quiz" => Self::Quiz,
            _ => Self::Other(label),
        }
    }
}

impl From<TaskType> for String {
    fn from(task_type: TaskType) -> Self {
        task_type.as_str().to_string()
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyTask {
    pub description: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyDay {
    pub period: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<StudyTask>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub plan_title: String,
    #[serde(default)]
    pub schedule: Vec<StudyDay>,
}

impl StudyPlan {
    /// Completion key for a task.
    ///
    /// Derived from text, not a stored id: editing either part orphans any
    /// recorded progress for the task.
    pub fn task_id(period: &str, description: &str) -> String {
        format!("{}-{}", period, description)
    }

    /// Every completion key in schedule order
    pub fn task_ids(&self) -> Vec<String> {
        self.schedule
            .iter()
            .flat_map(|day| {
                day.tasks
                    .iter()
                    .map(move |task| Self::task_id(&day.period, &task.description))
            })
            .collect()
    }

    pub fn task_count(&self) -> usize {
        self.schedule.iter().map(|day| day.tasks.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_type_vocabulary() {
        let parsed: TaskType = serde_json::from_str("\"practice\"").unwrap();
        assert_eq!(parsed, TaskType::Practice);

        let other: TaskType = serde_json::from_str("\"Lab\"").unwrap();
        assert_eq!(other, TaskType::Other("Lab".into()));
        assert_eq!(serde_json::to_string(&other).unwrap(), "\"Lab\"");
        assert_eq!(other.icon(), "📌");
    }

    #[test]
    fn test_plan_wire_shape() {
        let json = r#"{
            "planTitle": "Organic Chemistry",
            "schedule": [
                {"period": "Day 1", "topics": ["Alkanes"], "tasks": [
                    {"description": "Read chapter 3", "type": "Read"},
                    {"description": "Problem set 1", "type": "Practice"}
                ]}
            ]
        }"#;
        let plan: StudyPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.plan_title, "Organic Chemistry");
        assert_eq!(plan.task_count(), 2);
        assert_eq!(
            plan.task_ids(),
            vec!["Day 1-Read chapter 3".to_string(), "Day 1-Problem set 1".to_string()]
        );
    }
}
