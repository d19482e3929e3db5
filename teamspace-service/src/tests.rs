// SPDX-License-Identifier: MIT OR Apache-2.0

use assert_matches::assert_matches;
use teamspace_auth::seed_roles;
use teamspace_core::{InviteCode, RoleName, TaskPriority, TaskStatus, UserId};
use teamspace_store::{MemberStore, MemoryStore, ProjectStore, RoleStore, WorkspaceStore};

use crate::manager::{Manager, ServiceError};
use crate::task::{TaskDraft, TaskPatch};

async fn manager() -> Manager<MemoryStore> {
    let store = MemoryStore::new();
    let registry = seed_roles(&store).await.unwrap();
    Manager::new(store, registry)
}

#[tokio::test]
async fn creating_a_workspace_makes_the_creator_its_owner() {
    let manager = manager().await;
    let alice = UserId::random();

    let workspace = manager
        .create_workspace(alice, "Acme", Some("All of Acme".to_owned()))
        .await
        .unwrap();
    assert_eq!(workspace.owner, alice);

    let members = manager.members(alice, workspace.id).await.unwrap();
    assert_eq!(members.len(), 1);
    let owner_role = manager
        .store
        .role_by_name(RoleName::Owner)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(members[0].role, owner_role.id);

    // Non-members see nothing, not even the workspace document.
    let mallory = UserId::random();
    assert_matches!(
        manager.workspace(mallory, workspace.id).await,
        Err(ServiceError::Forbidden(_))
    );
}

#[tokio::test]
async fn joining_by_invite_code_grants_the_member_role() {
    let manager = manager().await;
    let alice = UserId::random();
    let bob = UserId::random();

    let workspace = manager.create_workspace(alice, "Acme", None).await.unwrap();
    let member = manager
        .join_workspace(bob, &workspace.invite_code)
        .await
        .unwrap();

    let member_role = manager
        .store
        .role_by_name(RoleName::Member)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(member.role, member_role.id);
    assert_eq!(
        manager.workspaces_of_user(bob).await.unwrap(),
        vec![workspace.clone()]
    );

    // Joining twice violates the one-record-per-pair invariant and is refused.
    assert_matches!(
        manager.join_workspace(bob, &workspace.invite_code).await,
        Err(ServiceError::AlreadyMember(user, ws)) if user == bob && ws == workspace.id
    );

    assert_matches!(
        manager
            .join_workspace(UserId::random(), &InviteCode::new("expired1"))
            .await,
        Err(ServiceError::UnknownInviteCode)
    );
}

#[tokio::test]
async fn resetting_the_invite_code_invalidates_shared_ones() {
    let manager = manager().await;
    let alice = UserId::random();
    let bob = UserId::random();

    let workspace = manager.create_workspace(alice, "Acme", None).await.unwrap();
    let old_code = workspace.invite_code.clone();
    manager
        .join_workspace(bob, &old_code)
        .await
        .unwrap();

    // MEMBER lacks MANAGE_WORKSPACE_SETTINGS.
    assert_matches!(
        manager.reset_invite_code(bob, workspace.id).await,
        Err(ServiceError::Forbidden(_))
    );

    let rotated = manager.reset_invite_code(alice, workspace.id).await.unwrap();
    assert_ne!(rotated.invite_code, old_code);
    assert_matches!(
        manager.join_workspace(UserId::random(), &old_code).await,
        Err(ServiceError::UnknownInviteCode)
    );
}

#[tokio::test]
async fn project_mutations_follow_the_permission_matrix() {
    let manager = manager().await;
    let alice = UserId::random();
    let bob = UserId::random();

    let workspace = manager.create_workspace(alice, "Acme", None).await.unwrap();
    manager
        .join_workspace(bob, &workspace.invite_code)
        .await
        .unwrap();

    // MEMBER cannot create projects, and the denial writes nothing.
    assert_matches!(
        manager
            .create_project(bob, workspace.id, "Website", None, None)
            .await,
        Err(ServiceError::Forbidden(_))
    );
    assert!(
        manager
            .store
            .projects_of_workspace(workspace.id)
            .await
            .unwrap()
            .is_empty()
    );

    // Promoted to ADMIN, the same user can.
    manager
        .change_member_role(alice, workspace.id, bob, RoleName::Admin)
        .await
        .unwrap();
    let project = manager
        .create_project(bob, workspace.id, "Website", None, Some("🚀".to_owned()))
        .await
        .unwrap();
    assert_eq!(project.emoji, "🚀");

    let renamed = manager
        .update_project(
            bob,
            workspace.id,
            project.id,
            Some("Website v2".to_owned()),
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Website v2");

    // A project cannot be reached through a workspace it is not scoped to.
    let other = manager.create_workspace(alice, "Other", None).await.unwrap();
    assert_matches!(
        manager
            .update_project(alice, other.id, project.id, None, None, None)
            .await,
        Err(ServiceError::ProjectWorkspaceMismatch(p, w)) if p == project.id && w == other.id
    );
}

#[tokio::test]
async fn task_lifecycle_with_validation() {
    let manager = manager().await;
    let alice = UserId::random();
    let bob = UserId::random();

    let workspace = manager.create_workspace(alice, "Acme", None).await.unwrap();
    manager
        .join_workspace(bob, &workspace.invite_code)
        .await
        .unwrap();
    let project = manager
        .create_project(alice, workspace.id, "Website", None, None)
        .await
        .unwrap();

    // Assignees must be members of the workspace.
    let outsider = UserId::random();
    assert_matches!(
        manager
            .create_task(
                alice,
                workspace.id,
                project.id,
                "Set up CI",
                TaskDraft {
                    assigned_to: Some(outsider),
                    ..Default::default()
                },
            )
            .await,
        Err(ServiceError::AssigneeNotAMember(user, ws)) if user == outsider && ws == workspace.id
    );

    let task = manager
        .create_task(
            bob,
            workspace.id,
            project.id,
            "Set up CI",
            TaskDraft {
                assigned_to: Some(bob),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(task.status, TaskStatus::Backlog);
    assert_eq!(task.priority, TaskPriority::Medium);

    let updated = manager
        .update_task(
            bob,
            workspace.id,
            task.id,
            TaskPatch {
                status: Some(TaskStatus::InProgress),
                priority: Some(TaskPriority::High),
                assigned_to: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.status, TaskStatus::InProgress);
    assert_eq!(updated.priority, TaskPriority::High);
    assert_eq!(updated.assigned_to, None);

    // MEMBER may create and edit tasks but not delete them.
    assert_matches!(
        manager.delete_task(bob, workspace.id, task.id).await,
        Err(ServiceError::Forbidden(_))
    );
    manager.delete_task(alice, workspace.id, task.id).await.unwrap();
    assert!(
        manager
            .tasks_of_project(alice, workspace.id, project.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn owner_membership_is_protected() {
    let manager = manager().await;
    let alice = UserId::random();
    let bob = UserId::random();

    let workspace = manager.create_workspace(alice, "Acme", None).await.unwrap();
    manager
        .join_workspace(bob, &workspace.invite_code)
        .await
        .unwrap();

    assert_matches!(
        manager
            .change_member_role(alice, workspace.id, alice, RoleName::Member)
            .await,
        Err(ServiceError::OwnerProtected)
    );
    assert_matches!(
        manager.remove_member(alice, workspace.id, alice).await,
        Err(ServiceError::OwnerProtected)
    );

    // Members may leave on their own, without REMOVE_MEMBER.
    manager.remove_member(bob, workspace.id, bob).await.unwrap();
    assert!(
        manager
            .store
            .member(bob, workspace.id)
            .await
            .unwrap()
            .is_none()
    );
    assert_matches!(
        manager.guard().require_member(bob, workspace.id).await,
        Err(teamspace_auth::GuardError::Forbidden(_))
    );
}

#[tokio::test]
async fn only_the_recorded_owner_deletes_the_workspace() {
    let manager = manager().await;
    let alice = UserId::random();
    let bob = UserId::random();
    let carol = UserId::random();

    let workspace = manager.create_workspace(alice, "Acme", None).await.unwrap();
    // Bob holds the OWNER role and with it DELETE_WORKSPACE, but is not the recorded owner.
    manager
        .add_member(alice, workspace.id, bob, RoleName::Owner)
        .await
        .unwrap();
    manager
        .add_member(alice, workspace.id, carol, RoleName::Member)
        .await
        .unwrap();
    let project = manager
        .create_project(alice, workspace.id, "Website", None, None)
        .await
        .unwrap();
    manager
        .create_task(alice, workspace.id, project.id, "Kickoff", TaskDraft::default())
        .await
        .unwrap();

    assert_matches!(
        manager.delete_workspace(bob, workspace.id).await,
        Err(ServiceError::NotWorkspaceOwner)
    );
    assert_matches!(
        manager.delete_workspace(carol, workspace.id).await,
        Err(ServiceError::Forbidden(_))
    );

    manager.delete_workspace(alice, workspace.id).await.unwrap();

    // Everything scoped to the workspace is gone.
    assert!(
        manager
            .store
            .workspace(workspace.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        manager
            .store
            .members_of_workspace(workspace.id)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        manager
            .store
            .projects_of_workspace(workspace.id)
            .await
            .unwrap()
            .is_empty()
    );
    // With the membership rows gone, the former owner has no access either.
    assert_matches!(
        manager.tasks(alice, workspace.id).await,
        Err(ServiceError::Forbidden(_))
    );
}

#[tokio::test]
async fn admins_cannot_manage_memberships() {
    let manager = manager().await;
    let alice = UserId::random();
    let bob = UserId::random();
    let carol = UserId::random();

    let workspace = manager.create_workspace(alice, "Acme", None).await.unwrap();
    manager
        .add_member(alice, workspace.id, bob, RoleName::Admin)
        .await
        .unwrap();
    manager
        .add_member(alice, workspace.id, carol, RoleName::Member)
        .await
        .unwrap();

    // ADMIN may add members but neither reassign roles nor remove others.
    manager
        .add_member(bob, workspace.id, UserId::random(), RoleName::Member)
        .await
        .unwrap();
    assert_matches!(
        manager
            .change_member_role(bob, workspace.id, carol, RoleName::Admin)
            .await,
        Err(ServiceError::Forbidden(_))
    );
    assert_matches!(
        manager.remove_member(bob, workspace.id, carol).await,
        Err(ServiceError::Forbidden(_))
    );
}
