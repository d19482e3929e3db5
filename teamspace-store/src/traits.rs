// SPDX-License-Identifier: MIT OR Apache-2.0

use teamspace_core::{
    InviteCode, Member, Project, ProjectId, Role, RoleId, RoleName, Task, TaskId, UserId,
    Workspace, WorkspaceId,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Access to the seeded role documents.
///
/// Roles are written once by the seeding path and read-only afterwards; no update or delete
/// operations are exposed.
pub trait RoleStore {
    /// Insert a role document.
    ///
    /// Returns `true` when the insert occurred, or `false` when a role with the same name
    /// already existed and no insertion occurred.
    fn insert_role(&self, role: &Role) -> impl Future<Output = Result<bool, StoreError>>;

    /// Get a role by its id.
    fn role_by_id(&self, id: RoleId) -> impl Future<Output = Result<Option<Role>, StoreError>>;

    /// Get a role by its name.
    fn role_by_name(
        &self,
        name: RoleName,
    ) -> impl Future<Output = Result<Option<Role>, StoreError>>;

    /// All seeded roles.
    fn roles(&self) -> impl Future<Output = Result<Vec<Role>, StoreError>>;
}

/// Access to workspace membership records.
pub trait MemberStore {
    /// Insert a membership record.
    ///
    /// Returns `true` when the insert occurred, or `false` when the (user, workspace) pair
    /// already had a record and no insertion occurred.
    fn insert_member(&self, member: &Member) -> impl Future<Output = Result<bool, StoreError>>;

    /// Get the unique membership record for a (user, workspace) pair.
    fn member(
        &self,
        user_id: UserId,
        workspace_id: WorkspaceId,
    ) -> impl Future<Output = Result<Option<Member>, StoreError>>;

    /// All membership records of a workspace.
    fn members_of_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> impl Future<Output = Result<Vec<Member>, StoreError>>;

    /// Ids of all workspaces a user is a member of.
    fn workspaces_of_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<WorkspaceId>, StoreError>>;

    /// Point the membership record of a (user, workspace) pair at another role.
    ///
    /// Returns `false` when no record exists for the pair.
    fn update_member_role(
        &self,
        user_id: UserId,
        workspace_id: WorkspaceId,
        role: RoleId,
    ) -> impl Future<Output = Result<bool, StoreError>>;

    /// Delete the membership record of a (user, workspace) pair.
    ///
    /// Returns `false` when no record exists for the pair.
    fn delete_member(
        &self,
        user_id: UserId,
        workspace_id: WorkspaceId,
    ) -> impl Future<Output = Result<bool, StoreError>>;

    /// Delete all membership records of a workspace, returning how many were removed.
    fn delete_members_of_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> impl Future<Output = Result<usize, StoreError>>;
}

/// Access to workspace documents.
pub trait WorkspaceStore {
    /// Insert a workspace document.
    ///
    /// Returns `true` when the insert occurred, or `false` when the invite code was already
    /// taken and no insertion occurred.
    fn insert_workspace(
        &self,
        workspace: &Workspace,
    ) -> impl Future<Output = Result<bool, StoreError>>;

    /// Get a workspace by its id.
    fn workspace(
        &self,
        id: WorkspaceId,
    ) -> impl Future<Output = Result<Option<Workspace>, StoreError>>;

    /// Get a workspace by its invite code.
    fn workspace_by_invite_code(
        &self,
        code: &InviteCode,
    ) -> impl Future<Output = Result<Option<Workspace>, StoreError>>;

    /// Replace a workspace document.
    ///
    /// Returns `false` when the workspace is unknown or its invite code is already taken by
    /// another workspace.
    fn update_workspace(
        &self,
        workspace: &Workspace,
    ) -> impl Future<Output = Result<bool, StoreError>>;

    /// Delete a workspace document.
    ///
    /// Returns `false` when the workspace was not found in the store.
    fn delete_workspace(&self, id: WorkspaceId)
    -> impl Future<Output = Result<bool, StoreError>>;
}

/// Access to project documents.
pub trait ProjectStore {
    /// Insert a project document.
    ///
    /// Returns `true` when the insert occurred, or `false` when the id already existed and no
    /// insertion occurred.
    fn insert_project(&self, project: &Project)
    -> impl Future<Output = Result<bool, StoreError>>;

    /// Get a project by its id.
    fn project(&self, id: ProjectId) -> impl Future<Output = Result<Option<Project>, StoreError>>;

    /// All projects of a workspace.
    fn projects_of_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> impl Future<Output = Result<Vec<Project>, StoreError>>;

    /// Replace a project document.
    ///
    /// Returns `false` when the project was not found in the store.
    fn update_project(&self, project: &Project)
    -> impl Future<Output = Result<bool, StoreError>>;

    /// Delete a project document.
    ///
    /// Returns `false` when the project was not found in the store.
    fn delete_project(&self, id: ProjectId) -> impl Future<Output = Result<bool, StoreError>>;

    /// Delete all projects of a workspace, returning how many were removed.
    fn delete_projects_of_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> impl Future<Output = Result<usize, StoreError>>;
}

/// Access to task documents.
pub trait TaskStore {
    /// Insert a task document.
    ///
    /// Returns `true` when the insert occurred, or `false` when the task code was already taken
    /// within the workspace and no insertion occurred.
    fn insert_task(&self, task: &Task) -> impl Future<Output = Result<bool, StoreError>>;

    /// Get a task by its id.
    fn task(&self, id: TaskId) -> impl Future<Output = Result<Option<Task>, StoreError>>;

    /// All tasks of a project.
    fn tasks_of_project(
        &self,
        project_id: ProjectId,
    ) -> impl Future<Output = Result<Vec<Task>, StoreError>>;

    /// All tasks of a workspace.
    fn tasks_of_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> impl Future<Output = Result<Vec<Task>, StoreError>>;

    /// Replace a task document.
    ///
    /// Returns `false` when the task was not found in the store.
    fn update_task(&self, task: &Task) -> impl Future<Output = Result<bool, StoreError>>;

    /// Delete a task document.
    ///
    /// Returns `false` when the task was not found in the store.
    fn delete_task(&self, id: TaskId) -> impl Future<Output = Result<bool, StoreError>>;

    /// Delete all tasks of a project, returning how many were removed.
    fn delete_tasks_of_project(
        &self,
        project_id: ProjectId,
    ) -> impl Future<Output = Result<usize, StoreError>>;

    /// Delete all tasks of a workspace, returning how many were removed.
    fn delete_tasks_of_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> impl Future<Output = Result<usize, StoreError>>;
}
