//! Task classification: sub-task lookup and line label resolution.

use std::collections::HashMap;

use crate::category::Category;

/// Separator between sub-tasks within a line.
pub const TASK_SEPARATOR: &str = " / ";

/// Mapping from a raw task string to its category.
///
/// Keys match exactly (case- and whitespace-sensitive) after trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskLabelMap {
    rules: HashMap<String, Category>,
}

impl TaskLabelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a rule, returning the previous category if any.
    pub fn insert(&mut self, task: &str, label: Category) -> Option<Category> {
        self.rules.insert(task.trim().to_string(), label)
    }

    pub fn get(&self, task: &str) -> Option<&Category> {
        self.rules.get(task.trim())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Resolves a sub-task, defaulting to [`Category::Unknown`].
    pub fn resolve(&self, task: &str) -> Category {
        self.get(task).cloned().unwrap_or(Category::Unknown)
    }
}

impl<K, V> FromIterator<(K, V)> for TaskLabelMap
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (task, label) in iter {
            map.insert(task.as_ref(), Category::parse(label.as_ref()));
        }
        map
    }
}

/// Result of classifying one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Line-level label, after the `Ignore` → `Misc` normalization.
    pub label: Category,
    pub tasks: Vec<String>,
    /// Per-task labels, same length as `tasks`, not normalized.
    pub task_labels: Vec<Category>,
}

/// Splits a line into sub-tasks and labels the line by priority.
pub fn classify(raw_line: &str, task_to_label: &TaskLabelMap) -> Classification {
    let tasks: Vec<String> = split_tasks(raw_line);
    let task_labels: Vec<Category> = tasks
        .iter()
        .map(|task| task_to_label.resolve(task))
        .collect();

    let label = Category::highest_priority(&task_labels)
        .cloned()
        .unwrap_or(Category::Unknown)
        .display_label();

    Classification {
        label,
        tasks,
        task_labels,
    }
}

/// Splits a line on [`TASK_SEPARATOR`], trimming each part.
///
/// Always yields at least one (possibly empty) task.
pub fn split_tasks(raw_line: &str) -> Vec<String> {
    raw_line
        .trim()
        .split(TASK_SEPARATOR)
        .map(|task| task.trim().to_string())
        .collect()
}
