//! Task data model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric task identifier. IDs start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl TaskId {
    pub fn get(self) -> u64 {
        self.0
    }

    /// The ID that follows this one, or `None` at `u64::MAX`
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when text is not a valid task ID
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid task ID: '{0}'")]
pub struct ParseTaskIdError(pub String);

impl FromStr for TaskId {
    type Err = ParseTaskIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ParseTaskIdError(s.to_string()))
    }
}

/// Known task statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    New,
    InProgress,
    Complete,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [Self::New, Self::InProgress, Self::Complete];

    /// Match a stored status exactly against the known labels
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::InProgress => "In Progress",
            Self::Complete => "Complete",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Known task priorities, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|priority| priority.label() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Sort rank: Low=1, Medium=2, High=3
    pub fn rank(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Rank of a stored priority string; unrecognized values rank 0
    pub fn rank_of(s: &str) -> u8 {
        Self::parse(s).map(|p| p.rank()).unwrap_or(0)
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Upper-case the first character and lower-case the rest.
///
/// `"in progress"` becomes `"In progress"`, which is not the `In Progress`
/// label. Permissive stores keep such values as typed.
pub fn normalize_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// A task record. The ID is the key it is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub priority: String,
}

impl Task {
    pub fn new(
        description: impl Into<String>,
        status: impl Into<String>,
        priority: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            status: status.into(),
            priority: priority.into(),
        }
    }

    pub fn priority_rank(&self) -> u8 {
        TaskPriority::rank_of(&self.priority)
    }

    /// Format as a single listing line
    pub fn to_line(&self, id: TaskId) -> String {
        format!(
            "ID: {}, Description: {}, Status: {}, Priority: {}",
            id, self.description, self.status, self.priority
        )
    }
}

/// Fields to change on an existing task. `None` and blank values keep the
/// current field.
#[derive(Debug, Clone, Default)]
pub struct TaskEdit {
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl TaskEdit {
    /// Build an edit from raw prompt answers; empty answers mean "keep"
    pub fn from_input(description: &str, status: &str, priority: &str) -> Self {
        fn keep_if_empty(s: &str) -> Option<String> {
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        }

        Self {
            description: keep_if_empty(description),
            status: keep_if_empty(status).map(|s| normalize_case(&s)),
            priority: keep_if_empty(priority).map(|s| normalize_case(&s)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.status.is_none() && self.priority.is_none()
    }
}
