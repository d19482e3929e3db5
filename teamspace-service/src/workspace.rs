// SPDX-License-Identifier: MIT OR Apache-2.0

use teamspace_core::{Member, Permission, RoleName, UserId, Workspace, WorkspaceId};
use tracing::debug;

use crate::manager::{Manager, ServiceError};
use crate::store::ServiceStore;

impl<S> Manager<S>
where
    S: ServiceStore,
{
    /// Create a workspace owned by the acting user.
    ///
    /// No permission is required: the creating user becomes the workspace owner and its first
    /// member, holding the OWNER role.
    pub async fn create_workspace(
        &self,
        actor: UserId,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<Workspace, ServiceError> {
        let owner_role = self
            .store
            .role_by_name(RoleName::Owner)
            .await?
            .ok_or(ServiceError::RoleNotSeeded(RoleName::Owner))?;

        let mut workspace = Workspace::new(name, description, actor);
        // Invite codes are unique across workspaces; on the rare collision generate another.
        while !self.store.insert_workspace(&workspace).await? {
            workspace.rotate_invite_code();
        }

        let member = Member::new(actor, workspace.id, owner_role.id);
        self.store.insert_member(&member).await?;

        debug!(workspace_id = %workspace.id, owner = %actor, "created workspace");
        Ok(workspace)
    }

    /// Get a workspace. Requires membership, with any role.
    pub async fn workspace(
        &self,
        actor: UserId,
        workspace_id: WorkspaceId,
    ) -> Result<Workspace, ServiceError> {
        self.guard.require_member(actor, workspace_id).await?;
        self.store
            .workspace(workspace_id)
            .await?
            .ok_or(ServiceError::WorkspaceNotFound(workspace_id))
    }

    /// All workspaces the acting user is a member of.
    pub async fn workspaces_of_user(
        &self,
        actor: UserId,
    ) -> Result<Vec<Workspace>, ServiceError> {
        let mut workspaces = Vec::new();
        for workspace_id in self.store.workspaces_of_user(actor).await? {
            if let Some(workspace) = self.store.workspace(workspace_id).await? {
                workspaces.push(workspace);
            }
        }
        Ok(workspaces)
    }

    /// Update a workspace's name or description. Requires EDIT_WORKSPACE.
    pub async fn update_workspace(
        &self,
        actor: UserId,
        workspace_id: WorkspaceId,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Workspace, ServiceError> {
        self.guard
            .require(actor, workspace_id, Permission::EditWorkspace)
            .await?;

        let mut workspace = self
            .store
            .workspace(workspace_id)
            .await?
            .ok_or(ServiceError::WorkspaceNotFound(workspace_id))?;
        if let Some(name) = name {
            workspace.name = name;
        }
        if let Some(description) = description {
            workspace.description = Some(description);
        }

        if !self.store.update_workspace(&workspace).await? {
            return Err(ServiceError::WorkspaceNotFound(workspace_id));
        }
        Ok(workspace)
    }

    /// Replace the workspace's invite code, invalidating previously shared ones. Requires
    /// MANAGE_WORKSPACE_SETTINGS.
    pub async fn reset_invite_code(
        &self,
        actor: UserId,
        workspace_id: WorkspaceId,
    ) -> Result<Workspace, ServiceError> {
        self.guard
            .require(actor, workspace_id, Permission::ManageWorkspaceSettings)
            .await?;

        let mut workspace = self
            .store
            .workspace(workspace_id)
            .await?
            .ok_or(ServiceError::WorkspaceNotFound(workspace_id))?;
        loop {
            workspace.rotate_invite_code();
            if self.store.update_workspace(&workspace).await? {
                break;
            }
        }

        debug!(%workspace_id, "reset invite code");
        Ok(workspace)
    }

    /// Delete a workspace and everything scoped to it. Requires DELETE_WORKSPACE, and only the
    /// recorded owner may delete even with the permission.
    pub async fn delete_workspace(
        &self,
        actor: UserId,
        workspace_id: WorkspaceId,
    ) -> Result<(), ServiceError> {
        self.guard
            .require(actor, workspace_id, Permission::DeleteWorkspace)
            .await?;

        let workspace = self
            .store
            .workspace(workspace_id)
            .await?
            .ok_or(ServiceError::WorkspaceNotFound(workspace_id))?;
        if workspace.owner != actor {
            return Err(ServiceError::NotWorkspaceOwner);
        }

        // Tasks first, then projects and members, then the workspace itself.
        self.store.delete_tasks_of_workspace(workspace_id).await?;
        self.store.delete_projects_of_workspace(workspace_id).await?;
        self.store.delete_members_of_workspace(workspace_id).await?;
        self.store.delete_workspace(workspace_id).await?;

        debug!(%workspace_id, "deleted workspace");
        Ok(())
    }
}
