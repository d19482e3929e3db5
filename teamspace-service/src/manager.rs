// SPDX-License-Identifier: MIT OR Apache-2.0

use teamspace_auth::{AccessGuard, Forbidden, GuardError, RoleRegistry};
use teamspace_core::{ProjectId, RoleName, TaskId, UserId, WorkspaceId};
use teamspace_store::StoreError;
use thiserror::Error;

use crate::store::ServiceStore;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Forbidden(#[from] Forbidden),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("workspace {0} not found")]
    WorkspaceNotFound(WorkspaceId),

    #[error("project {0} not found")]
    ProjectNotFound(ProjectId),

    #[error("task {0} not found")]
    TaskNotFound(TaskId),

    #[error("no workspace matches this invite code")]
    UnknownInviteCode,

    #[error("user {0} is already a member of workspace {1}")]
    AlreadyMember(UserId, WorkspaceId),

    #[error("user {0} is not a member of workspace {1}")]
    MemberNotFound(UserId, WorkspaceId),

    #[error("assignee {0} is not a member of workspace {1}")]
    AssigneeNotAMember(UserId, WorkspaceId),

    #[error("project {0} does not belong to workspace {1}")]
    ProjectWorkspaceMismatch(ProjectId, WorkspaceId),

    #[error("task {0} does not belong to workspace {1}")]
    TaskWorkspaceMismatch(TaskId, WorkspaceId),

    #[error("only the workspace owner may delete the workspace")]
    NotWorkspaceOwner,

    #[error("the workspace owner's membership cannot be changed")]
    OwnerProtected,

    #[error("role {0} has not been seeded")]
    RoleNotSeeded(RoleName),
}

impl From<GuardError> for ServiceError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::Forbidden(inner) => ServiceError::Forbidden(inner),
            GuardError::Store(inner) => ServiceError::Store(inner),
        }
    }
}

/// Create and manage workspaces, their members, projects and tasks.
///
/// Owns a store handle and the access guard in front of it. One instance serves all requests;
/// operations borrow it immutably and every authorization check runs within the request that
/// triggered it, so independent requests need no coordination.
#[derive(Clone, Debug)]
pub struct Manager<S> {
    pub(crate) store: S,
    pub(crate) guard: AccessGuard<S>,
}

impl<S> Manager<S>
where
    S: ServiceStore,
{
    /// Construct a manager over a store and the role registry seeded for this deployment.
    pub fn new(store: S, registry: RoleRegistry) -> Self {
        let guard = AccessGuard::new(store.clone(), registry);
        Self { store, guard }
    }

    pub fn guard(&self) -> &AccessGuard<S> {
        &self.guard
    }
}
