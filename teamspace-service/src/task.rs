// SPDX-License-Identifier: MIT OR Apache-2.0

use teamspace_core::{
    Permission, ProjectId, Task, TaskId, TaskPriority, TaskStatus, UserId, WorkspaceId,
};
use tracing::debug;

use crate::manager::{Manager, ServiceError};
use crate::store::ServiceStore;

/// Optional fields of a new task beyond its title.
#[derive(Clone, Debug, Default)]
pub struct TaskDraft {
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<UserId>,
    pub due_date: Option<u64>,
}

/// Changes to apply to an existing task. Fields left `None` keep their current value.
#[derive(Clone, Debug, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    /// `Some(None)` clears the assignee, `Some(Some(user))` reassigns.
    pub assigned_to: Option<Option<UserId>>,
    pub due_date: Option<u64>,
}

impl<S> Manager<S>
where
    S: ServiceStore,
{
    /// Create a task in a project. Requires CREATE_TASK.
    ///
    /// The project must belong to the workspace and the assignee, when given, must be one of
    /// its members. Status defaults to BACKLOG, priority to MEDIUM.
    pub async fn create_task(
        &self,
        actor: UserId,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        title: impl Into<String>,
        draft: TaskDraft,
    ) -> Result<Task, ServiceError> {
        self.guard
            .require(actor, workspace_id, Permission::CreateTask)
            .await?;

        self.project_in_workspace(project_id, workspace_id).await?;
        if let Some(assignee) = draft.assigned_to {
            self.check_assignee(assignee, workspace_id).await?;
        }

        let mut task = Task::new(title, project_id, workspace_id, actor);
        task.description = draft.description;
        task.assigned_to = draft.assigned_to;
        task.due_date = draft.due_date;
        if let Some(status) = draft.status {
            task.status = status;
        }
        if let Some(priority) = draft.priority {
            task.priority = priority;
        }

        // Task codes are unique per workspace; on the rare collision generate another.
        while !self.store.insert_task(&task).await? {
            task.regenerate_code();
        }

        debug!(task_id = %task.id, code = %task.code, %workspace_id, "created task");
        Ok(task)
    }

    /// All tasks of a project. Requires membership, with any role.
    pub async fn tasks_of_project(
        &self,
        actor: UserId,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
    ) -> Result<Vec<Task>, ServiceError> {
        self.guard.require_member(actor, workspace_id).await?;
        self.project_in_workspace(project_id, workspace_id).await?;
        Ok(self.store.tasks_of_project(project_id).await?)
    }

    /// All tasks of a workspace. Requires membership, with any role.
    pub async fn tasks(
        &self,
        actor: UserId,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Task>, ServiceError> {
        self.guard.require_member(actor, workspace_id).await?;
        Ok(self.store.tasks_of_workspace(workspace_id).await?)
    }

    /// Apply a patch to a task. Requires EDIT_TASK.
    pub async fn update_task(
        &self,
        actor: UserId,
        workspace_id: WorkspaceId,
        task_id: TaskId,
        patch: TaskPatch,
    ) -> Result<Task, ServiceError> {
        self.guard
            .require(actor, workspace_id, Permission::EditTask)
            .await?;

        let mut task = self.task_in_workspace(task_id, workspace_id).await?;
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = Some(description);
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(assigned_to) = patch.assigned_to {
            if let Some(assignee) = assigned_to {
                self.check_assignee(assignee, workspace_id).await?;
            }
            task.assigned_to = assigned_to;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = Some(due_date);
        }

        if !self.store.update_task(&task).await? {
            return Err(ServiceError::TaskNotFound(task_id));
        }
        Ok(task)
    }

    /// Delete a task. Requires DELETE_TASK.
    pub async fn delete_task(
        &self,
        actor: UserId,
        workspace_id: WorkspaceId,
        task_id: TaskId,
    ) -> Result<(), ServiceError> {
        self.guard
            .require(actor, workspace_id, Permission::DeleteTask)
            .await?;

        self.task_in_workspace(task_id, workspace_id).await?;
        self.store.delete_task(task_id).await?;

        debug!(%task_id, %workspace_id, "deleted task");
        Ok(())
    }

    async fn task_in_workspace(
        &self,
        task_id: TaskId,
        workspace_id: WorkspaceId,
    ) -> Result<Task, ServiceError> {
        let task = self
            .store
            .task(task_id)
            .await?
            .ok_or(ServiceError::TaskNotFound(task_id))?;
        if task.workspace != workspace_id {
            return Err(ServiceError::TaskWorkspaceMismatch(task_id, workspace_id));
        }
        Ok(task)
    }

    async fn check_assignee(
        &self,
        assignee: UserId,
        workspace_id: WorkspaceId,
    ) -> Result<(), ServiceError> {
        if self.store.member(assignee, workspace_id).await?.is_none() {
            return Err(ServiceError::AssigneeNotAMember(assignee, workspace_id));
        }
        Ok(())
    }
}
