// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;
use std::sync::Arc;

use teamspace_core::{
    InviteCode, Member, MemberId, Project, ProjectId, Role, RoleId, RoleName, Task, TaskId,
    UserId, Workspace, WorkspaceId,
};
use tokio::sync::RwLock;

use crate::traits::{
    MemberStore, ProjectStore, RoleStore, StoreError, TaskStore, WorkspaceStore,
};

/// In-memory store.
///
/// This does not persist data permanently, all changes are lost when the process ends. Use this
/// only in development or test contexts.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    roles: HashMap<RoleId, Role>,
    members: HashMap<MemberId, Member>,
    workspaces: HashMap<WorkspaceId, Workspace>,
    projects: HashMap<ProjectId, Project>,
    tasks: HashMap<TaskId, Task>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoleStore for MemoryStore {
    async fn insert_role(&self, role: &Role) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.roles.values().any(|known| known.name == role.name) {
            return Ok(false);
        }
        inner.roles.insert(role.id, role.clone());
        Ok(true)
    }

    async fn role_by_id(&self, id: RoleId) -> Result<Option<Role>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.roles.get(&id).cloned())
    }

    async fn role_by_name(&self, name: RoleName) -> Result<Option<Role>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.roles.values().find(|role| role.name == name).cloned())
    }

    async fn roles(&self) -> Result<Vec<Role>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.roles.values().cloned().collect())
    }
}

impl MemberStore for MemoryStore {
    async fn insert_member(&self, member: &Member) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let exists = inner.members.values().any(|known| {
            known.user_id == member.user_id && known.workspace_id == member.workspace_id
        });
        if exists {
            return Ok(false);
        }
        inner.members.insert(member.id, member.clone());
        Ok(true)
    }

    async fn member(
        &self,
        user_id: UserId,
        workspace_id: WorkspaceId,
    ) -> Result<Option<Member>, StoreError> {
        let inner = self.inner.read().await;
        let member = inner
            .members
            .values()
            .find(|member| member.user_id == user_id && member.workspace_id == workspace_id)
            .cloned();
        Ok(member)
    }

    async fn members_of_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Member>, StoreError> {
        let inner = self.inner.read().await;
        let members = inner
            .members
            .values()
            .filter(|member| member.workspace_id == workspace_id)
            .cloned()
            .collect();
        Ok(members)
    }

    async fn workspaces_of_user(&self, user_id: UserId) -> Result<Vec<WorkspaceId>, StoreError> {
        let inner = self.inner.read().await;
        let workspaces = inner
            .members
            .values()
            .filter(|member| member.user_id == user_id)
            .map(|member| member.workspace_id)
            .collect();
        Ok(workspaces)
    }

    async fn update_member_role(
        &self,
        user_id: UserId,
        workspace_id: WorkspaceId,
        role: RoleId,
    ) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let member = inner
            .members
            .values_mut()
            .find(|member| member.user_id == user_id && member.workspace_id == workspace_id);
        match member {
            Some(member) => {
                member.role = role;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_member(
        &self,
        user_id: UserId,
        workspace_id: WorkspaceId,
    ) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let id = inner
            .members
            .values()
            .find(|member| member.user_id == user_id && member.workspace_id == workspace_id)
            .map(|member| member.id);
        match id {
            Some(id) => {
                inner.members.remove(&id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_members_of_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<usize, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.members.len();
        inner
            .members
            .retain(|_, member| member.workspace_id != workspace_id);
        Ok(before - inner.members.len())
    }
}

impl WorkspaceStore for MemoryStore {
    async fn insert_workspace(&self, workspace: &Workspace) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let code_taken = inner
            .workspaces
            .values()
            .any(|known| known.invite_code == workspace.invite_code);
        if code_taken {
            return Ok(false);
        }
        inner.workspaces.insert(workspace.id, workspace.clone());
        Ok(true)
    }

    async fn workspace(&self, id: WorkspaceId) -> Result<Option<Workspace>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.workspaces.get(&id).cloned())
    }

    async fn workspace_by_invite_code(
        &self,
        code: &InviteCode,
    ) -> Result<Option<Workspace>, StoreError> {
        let inner = self.inner.read().await;
        let workspace = inner
            .workspaces
            .values()
            .find(|workspace| &workspace.invite_code == code)
            .cloned();
        Ok(workspace)
    }

    async fn update_workspace(&self, workspace: &Workspace) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.workspaces.contains_key(&workspace.id) {
            return Ok(false);
        }
        let code_taken = inner
            .workspaces
            .values()
            .any(|known| known.id != workspace.id && known.invite_code == workspace.invite_code);
        if code_taken {
            return Ok(false);
        }
        inner.workspaces.insert(workspace.id, workspace.clone());
        Ok(true)
    }

    async fn delete_workspace(&self, id: WorkspaceId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.workspaces.remove(&id).is_some())
    }
}

impl ProjectStore for MemoryStore {
    async fn insert_project(&self, project: &Project) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.projects.contains_key(&project.id) {
            return Ok(false);
        }
        inner.projects.insert(project.id, project.clone());
        Ok(true)
    }

    async fn project(&self, id: ProjectId) -> Result<Option<Project>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.projects.get(&id).cloned())
    }

    async fn projects_of_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Project>, StoreError> {
        let inner = self.inner.read().await;
        let projects = inner
            .projects
            .values()
            .filter(|project| project.workspace == workspace_id)
            .cloned()
            .collect();
        Ok(projects)
    }

    async fn update_project(&self, project: &Project) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.projects.contains_key(&project.id) {
            return Ok(false);
        }
        inner.projects.insert(project.id, project.clone());
        Ok(true)
    }

    async fn delete_project(&self, id: ProjectId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.projects.remove(&id).is_some())
    }

    async fn delete_projects_of_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<usize, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.projects.len();
        inner
            .projects
            .retain(|_, project| project.workspace != workspace_id);
        Ok(before - inner.projects.len())
    }
}

impl TaskStore for MemoryStore {
    async fn insert_task(&self, task: &Task) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let code_taken = inner
            .tasks
            .values()
            .any(|known| known.workspace == task.workspace && known.code == task.code);
        if code_taken {
            return Ok(false);
        }
        inner.tasks.insert(task.id, task.clone());
        Ok(true)
    }

    async fn task(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.tasks.get(&id).cloned())
    }

    async fn tasks_of_project(&self, project_id: ProjectId) -> Result<Vec<Task>, StoreError> {
        let inner = self.inner.read().await;
        let tasks = inner
            .tasks
            .values()
            .filter(|task| task.project == project_id)
            .cloned()
            .collect();
        Ok(tasks)
    }

    async fn tasks_of_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Task>, StoreError> {
        let inner = self.inner.read().await;
        let tasks = inner
            .tasks
            .values()
            .filter(|task| task.workspace == workspace_id)
            .cloned()
            .collect();
        Ok(tasks)
    }

    async fn update_task(&self, task: &Task) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.tasks.contains_key(&task.id) {
            return Ok(false);
        }
        inner.tasks.insert(task.id, task.clone());
        Ok(true)
    }

    async fn delete_task(&self, id: TaskId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.tasks.remove(&id).is_some())
    }

    async fn delete_tasks_of_project(&self, project_id: ProjectId) -> Result<usize, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.tasks.len();
        inner.tasks.retain(|_, task| task.project != project_id);
        Ok(before - inner.tasks.len())
    }

    async fn delete_tasks_of_workspace(
        &self,
        workspace_id: WorkspaceId,
    ) -> Result<usize, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.tasks.len();
        inner.tasks.retain(|_, task| task.workspace != workspace_id);
        Ok(before - inner.tasks.len())
    }
}

#[cfg(test)]
mod tests {
    use teamspace_core::{Member, Permission, Role, RoleName, UserId, Workspace};

    use super::MemoryStore;
    use crate::traits::{MemberStore, RoleStore, WorkspaceStore};

    #[tokio::test]
    async fn one_member_record_per_user_workspace_pair() {
        let store = MemoryStore::new();
        let role = Role::new(RoleName::Member, vec![Permission::ViewOnly]);
        store.insert_role(&role).await.unwrap();

        let user = UserId::random();
        let workspace = Workspace::new("Platform", None, UserId::random());
        store.insert_workspace(&workspace).await.unwrap();

        let member = Member::new(user, workspace.id, role.id);
        assert!(store.insert_member(&member).await.unwrap());

        // A second record for the same pair is refused, even with a fresh member id.
        let duplicate = Member::new(user, workspace.id, role.id);
        assert!(!store.insert_member(&duplicate).await.unwrap());

        let found = store.member(user, workspace.id).await.unwrap().unwrap();
        assert_eq!(found.id, member.id);
    }

    #[tokio::test]
    async fn duplicate_role_names_are_not_seeded_twice() {
        let store = MemoryStore::new();
        let owner = Role::new(RoleName::Owner, vec![Permission::DeleteWorkspace]);
        assert!(store.insert_role(&owner).await.unwrap());
        let again = Role::new(RoleName::Owner, vec![Permission::DeleteWorkspace]);
        assert!(!store.insert_role(&again).await.unwrap());
        assert_eq!(store.roles().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn workspace_is_found_by_invite_code() {
        let store = MemoryStore::new();
        let workspace = Workspace::new("Design", None, UserId::random());
        store.insert_workspace(&workspace).await.unwrap();

        let found = store
            .workspace_by_invite_code(&workspace.invite_code)
            .await
            .unwrap();
        assert_eq!(found, Some(workspace));
    }

    #[tokio::test]
    async fn update_workspace_refuses_taken_invite_codes() {
        let store = MemoryStore::new();
        let first = Workspace::new("One", None, UserId::random());
        let second = Workspace::new("Two", None, UserId::random());
        store.insert_workspace(&first).await.unwrap();
        store.insert_workspace(&second).await.unwrap();

        let mut stolen = second.clone();
        stolen.invite_code = first.invite_code.clone();
        assert!(!store.update_workspace(&stolen).await.unwrap());
    }
}
