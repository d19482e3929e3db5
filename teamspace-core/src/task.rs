// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};

use crate::id::{ProjectId, TaskId, UserId, WorkspaceId};

/// Length of the random suffix in generated task codes.
pub const TASK_CODE_SUFFIX_LEN: usize = 8;

/// Workflow states a task moves through.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Backlog,
    Todo,
    InProgress,
    InReview,
    Done,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            TaskStatus::Backlog => "BACKLOG",
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::InReview => "IN_REVIEW",
            TaskStatus::Done => "DONE",
        };
        write!(f, "{value}")
    }
}

/// Priority of a task.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            TaskPriority::Low => "LOW",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::High => "HIGH",
        };
        write!(f, "{value}")
    }
}

/// Short human-facing task identifier, unique within a workspace.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskCode(String);

impl TaskCode {
    /// Generate a new random task code.
    pub fn random() -> Self {
        let suffix: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(TASK_CODE_SUFFIX_LEN)
            .map(char::from)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self(format!("task-{suffix}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A task scoped to one project and its workspace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub code: TaskCode,
    pub title: String,
    pub description: Option<String>,
    pub project: ProjectId,
    pub workspace: WorkspaceId,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub assigned_to: Option<UserId>,
    pub created_by: UserId,
    pub due_date: Option<u64>,
}

impl Task {
    pub fn new(
        title: impl Into<String>,
        project: ProjectId,
        workspace: WorkspaceId,
        created_by: UserId,
    ) -> Self {
        Self {
            id: TaskId::random(),
            code: TaskCode::random(),
            title: title.into(),
            description: None,
            project,
            workspace,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            assigned_to: None,
            created_by,
            due_date: None,
        }
    }

    /// Replace the task code with a freshly generated one.
    pub fn regenerate_code(&mut self) {
        self.code = TaskCode::random();
    }
}
