// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use teamspace_core::{Permission, UserId, WorkspaceId};
use teamspace_store::{MemberStore, RoleStore, StoreError};
use thiserror::Error;
use tracing::{debug, warn};

use crate::registry::RoleRegistry;
use crate::resolver::{AccessError, Membership, MembershipResolver};

/// Internal reason behind a [`Forbidden`] outcome.
///
/// Callers surface one denial; this reason exists for logs and metrics so operators can tell a
/// normal access denial from data needing repair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DenyReason {
    NotAMember,
    MissingPermission,
    CorruptMembership,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            DenyReason::NotAMember => "not a member",
            DenyReason::MissingPermission => "role lacks permission",
            DenyReason::CorruptMembership => "corrupt membership",
        };
        write!(f, "{reason}")
    }
}

/// The single caller-visible denial produced by the guard.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("forbidden: {reason}")]
pub struct Forbidden {
    reason: DenyReason,
}

impl Forbidden {
    pub fn reason(&self) -> DenyReason {
        self.reason
    }
}

#[derive(Debug, Error)]
pub enum GuardError {
    #[error(transparent)]
    Forbidden(#[from] Forbidden),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Gate in front of mutating workspace, project and task operations.
///
/// Resolves the acting user's role, checks the operation's required permission and only then
/// lets the caller proceed: the check fully precedes any write, so a denied or cancelled
/// request leaves no partial mutation behind. A denial is not transient; there are no retries
/// and no timeouts.
#[derive(Clone, Debug)]
pub struct AccessGuard<S> {
    resolver: MembershipResolver<S>,
    registry: RoleRegistry,
}

impl<S> AccessGuard<S>
where
    S: MemberStore + RoleStore,
{
    pub fn new(store: S, registry: RoleRegistry) -> Self {
        Self {
            resolver: MembershipResolver::new(store),
            registry,
        }
    }

    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }

    /// Require that a user holds a permission within a workspace.
    ///
    /// On success the resolved membership is returned for the caller to act on. On any failure
    /// the caller sees [`Forbidden`]; the distinct reason is logged here, corrupt data loudly.
    pub async fn require(
        &self,
        user_id: UserId,
        workspace_id: WorkspaceId,
        permission: Permission,
    ) -> Result<Membership, GuardError> {
        let membership = self.resolve_logged(user_id, workspace_id).await?;

        if !self.registry.authorize(&membership.role, permission) {
            debug!(
                %user_id,
                %workspace_id,
                %permission,
                role = %membership.role.name,
                "denied: role lacks permission"
            );
            return Err(Forbidden {
                reason: DenyReason::MissingPermission,
            }
            .into());
        }

        Ok(membership)
    }

    /// Require only that a user is a member of a workspace, with any role.
    ///
    /// Read paths use this: seeing a workspace requires membership but no specific mutation
    /// permission.
    pub async fn require_member(
        &self,
        user_id: UserId,
        workspace_id: WorkspaceId,
    ) -> Result<Membership, GuardError> {
        self.resolve_logged(user_id, workspace_id).await
    }

    async fn resolve_logged(
        &self,
        user_id: UserId,
        workspace_id: WorkspaceId,
    ) -> Result<Membership, GuardError> {
        match self.resolver.resolve(user_id, workspace_id).await {
            Ok(membership) => Ok(membership),
            Err(AccessError::NotAMember { .. }) => {
                debug!(%user_id, %workspace_id, "denied: not a member");
                Err(Forbidden {
                    reason: DenyReason::NotAMember,
                }
                .into())
            }
            Err(AccessError::CorruptMembership { member_id, role_id }) => {
                warn!(
                    %user_id,
                    %workspace_id,
                    %member_id,
                    %role_id,
                    "denied: membership references a role which does not resolve, data repair needed"
                );
                Err(Forbidden {
                    reason: DenyReason::CorruptMembership,
                }
                .into())
            }
            Err(AccessError::Store(err)) => Err(GuardError::Store(err)),
        }
    }
}
