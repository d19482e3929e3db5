// SPDX-License-Identifier: MIT OR Apache-2.0

use assert_matches::assert_matches;
use teamspace_core::{Member, Permission, RoleId, RoleName, UserId, Workspace, WorkspaceId};
use teamspace_store::{MemberStore, MemoryStore, RoleStore, WorkspaceStore};

use crate::guard::{AccessGuard, DenyReason, GuardError};
use crate::registry::{RoleRegistry, seed_roles};
use crate::resolver::{AccessError, MembershipResolver};

async fn seeded_store() -> (MemoryStore, RoleRegistry) {
    let store = MemoryStore::new();
    let registry = seed_roles(&store).await.unwrap();
    (store, registry)
}

async fn workspace_with_member(
    store: &MemoryStore,
    user_id: UserId,
    role_name: RoleName,
) -> WorkspaceId {
    let workspace = Workspace::new("Engineering", None, user_id);
    store.insert_workspace(&workspace).await.unwrap();
    let role = store.role_by_name(role_name).await.unwrap().unwrap();
    let member = Member::new(user_id, workspace.id, role.id);
    store.insert_member(&member).await.unwrap();
    workspace.id
}

#[tokio::test]
async fn seeding_is_idempotent() {
    let store = MemoryStore::new();
    let first = seed_roles(&store).await.unwrap();
    let second = seed_roles(&store).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(store.roles().await.unwrap().len(), 3);
}

#[tokio::test]
async fn owner_may_delete_workspace_member_may_not() {
    let (store, registry) = seeded_store().await;
    let guard = AccessGuard::new(store.clone(), registry);

    let owner = UserId::random();
    let workspace_id = workspace_with_member(&store, owner, RoleName::Owner).await;
    assert!(
        guard
            .require(owner, workspace_id, Permission::DeleteWorkspace)
            .await
            .is_ok()
    );

    let member = UserId::random();
    let role = store.role_by_name(RoleName::Member).await.unwrap().unwrap();
    store
        .insert_member(&Member::new(member, workspace_id, role.id))
        .await
        .unwrap();
    let denied = guard
        .require(member, workspace_id, Permission::DeleteWorkspace)
        .await;
    assert_matches!(
        denied,
        Err(GuardError::Forbidden(forbidden)) if forbidden.reason() == DenyReason::MissingPermission
    );
}

#[tokio::test]
async fn non_members_are_denied_with_a_distinct_reason() {
    let (store, registry) = seeded_store().await;
    let guard = AccessGuard::new(store.clone(), registry);

    let owner = UserId::random();
    let workspace_id = workspace_with_member(&store, owner, RoleName::Owner).await;

    let stranger = UserId::random();
    let denied = guard
        .require(stranger, workspace_id, Permission::CreateTask)
        .await;
    assert_matches!(
        denied,
        Err(GuardError::Forbidden(forbidden)) if forbidden.reason() == DenyReason::NotAMember
    );
}

#[tokio::test]
async fn resolver_fails_closed_on_missing_membership() {
    let (store, _) = seeded_store().await;
    let resolver = MembershipResolver::new(store);

    let result = resolver
        .resolve_role(UserId::random(), WorkspaceId::random())
        .await;
    assert_matches!(result, Err(AccessError::NotAMember { .. }));
}

#[tokio::test]
async fn dangling_role_reference_is_corrupt_not_a_permission_denial() {
    let (store, registry) = seeded_store().await;

    // A membership row left behind by a migration: its role id resolves to nothing.
    let user_id = UserId::random();
    let workspace = Workspace::new("Legacy", None, user_id);
    store.insert_workspace(&workspace).await.unwrap();
    let member = Member::new(user_id, workspace.id, RoleId::random());
    store.insert_member(&member).await.unwrap();

    let resolver = MembershipResolver::new(store.clone());
    let resolved = resolver.resolve_role(user_id, workspace.id).await;
    assert_matches!(
        resolved,
        Err(AccessError::CorruptMembership { member_id, role_id })
            if member_id == member.id && role_id == member.role
    );

    // The guard collapses this to the same caller-visible denial as any other, while the
    // reason stays distinguishable for logging.
    let guard = AccessGuard::new(store, registry);
    let denied = guard
        .require(user_id, workspace.id, Permission::ViewOnly)
        .await;
    assert_matches!(
        denied,
        Err(GuardError::Forbidden(forbidden)) if forbidden.reason() == DenyReason::CorruptMembership
    );
}

#[tokio::test]
async fn checks_are_idempotent_under_unchanged_data() {
    let (store, registry) = seeded_store().await;
    let guard = AccessGuard::new(store.clone(), registry);

    let user_id = UserId::random();
    let workspace_id = workspace_with_member(&store, user_id, RoleName::Admin).await;

    for _ in 0..2 {
        assert!(
            guard
                .require(user_id, workspace_id, Permission::CreateProject)
                .await
                .is_ok()
        );
        let denied = guard
            .require(user_id, workspace_id, Permission::DeleteWorkspace)
            .await;
        assert_matches!(denied, Err(GuardError::Forbidden(_)));
    }
}

#[tokio::test]
async fn membership_alone_satisfies_read_access() {
    let (store, registry) = seeded_store().await;
    let guard = AccessGuard::new(store.clone(), registry);

    let user_id = UserId::random();
    let workspace_id = workspace_with_member(&store, user_id, RoleName::Member).await;

    let membership = guard.require_member(user_id, workspace_id).await.unwrap();
    assert_eq!(membership.role.name, RoleName::Member);
    assert!(
        guard
            .registry()
            .permissions_for(membership.role.name)
            .contains(&Permission::ViewOnly)
    );

    let stranger = UserId::random();
    assert_matches!(
        guard.require_member(stranger, workspace_id).await,
        Err(GuardError::Forbidden(_))
    );
}
