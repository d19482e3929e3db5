// SPDX-License-Identifier: MIT OR Apache-2.0

use teamspace_core::{Permission, Project, ProjectId, UserId, WorkspaceId};
use tracing::debug;

use crate::manager::{Manager, ServiceError};
use crate::store::ServiceStore;

impl<S> Manager<S>
where
    S: ServiceStore,
{
    /// Create a project in a workspace. Requires CREATE_PROJECT.
    pub async fn create_project(
        &self,
        actor: UserId,
        workspace_id: WorkspaceId,
        name: impl Into<String>,
        description: Option<String>,
        emoji: Option<String>,
    ) -> Result<Project, ServiceError> {
        self.guard
            .require(actor, workspace_id, Permission::CreateProject)
            .await?;

        let project = Project::new(name, description, emoji, workspace_id, actor);
        self.store.insert_project(&project).await?;

        debug!(project_id = %project.id, %workspace_id, "created project");
        Ok(project)
    }

    /// All projects of a workspace. Requires membership, with any role.
    pub async fn projects(
        &self,
        actor: UserId,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Project>, ServiceError> {
        self.guard.require_member(actor, workspace_id).await?;
        Ok(self.store.projects_of_workspace(workspace_id).await?)
    }

    /// Update a project's name, description or emoji. Requires EDIT_PROJECT.
    pub async fn update_project(
        &self,
        actor: UserId,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
        name: Option<String>,
        description: Option<String>,
        emoji: Option<String>,
    ) -> Result<Project, ServiceError> {
        self.guard
            .require(actor, workspace_id, Permission::EditProject)
            .await?;

        let mut project = self.project_in_workspace(project_id, workspace_id).await?;
        if let Some(name) = name {
            project.name = name;
        }
        if let Some(description) = description {
            project.description = Some(description);
        }
        if let Some(emoji) = emoji {
            project.emoji = emoji;
        }

        if !self.store.update_project(&project).await? {
            return Err(ServiceError::ProjectNotFound(project_id));
        }
        Ok(project)
    }

    /// Delete a project and its tasks. Requires DELETE_PROJECT.
    pub async fn delete_project(
        &self,
        actor: UserId,
        workspace_id: WorkspaceId,
        project_id: ProjectId,
    ) -> Result<(), ServiceError> {
        self.guard
            .require(actor, workspace_id, Permission::DeleteProject)
            .await?;

        self.project_in_workspace(project_id, workspace_id).await?;
        self.store.delete_tasks_of_project(project_id).await?;
        self.store.delete_project(project_id).await?;

        debug!(%project_id, %workspace_id, "deleted project");
        Ok(())
    }

    /// Fetch a project and check it is scoped to the expected workspace.
    pub(crate) async fn project_in_workspace(
        &self,
        project_id: ProjectId,
        workspace_id: WorkspaceId,
    ) -> Result<Project, ServiceError> {
        let project = self
            .store
            .project(project_id)
            .await?
            .ok_or(ServiceError::ProjectNotFound(project_id))?;
        if project.workspace != workspace_id {
            return Err(ServiceError::ProjectWorkspaceMismatch(
                project_id,
                workspace_id,
            ));
        }
        Ok(project)
    }
}
