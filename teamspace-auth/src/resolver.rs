// SPDX-License-Identifier: MIT OR Apache-2.0

use teamspace_core::{Member, MemberId, Role, RoleId, UserId, WorkspaceId};
use teamspace_store::{MemberStore, RoleStore, StoreError};
use thiserror::Error;

/// Why a membership could not be resolved.
#[derive(Debug, Error)]
pub enum AccessError {
    /// No membership record exists for the (user, workspace) pair. Expected and recoverable;
    /// the user simply has no access to this workspace.
    #[error("user {user_id} is not a member of workspace {workspace_id}")]
    NotAMember {
        user_id: UserId,
        workspace_id: WorkspaceId,
    },

    /// The membership record references a role document which does not exist. A data-integrity
    /// defect, typically left behind by a migration; needs a repair, not a retry.
    #[error("member {member_id} references role {role_id} which does not resolve")]
    CorruptMembership {
        member_id: MemberId,
        role_id: RoleId,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A resolved membership: the record itself and the role document it references.
#[derive(Clone, Debug)]
pub struct Membership {
    pub member: Member,
    pub role: Role,
}

/// Resolves the unique membership record for a (user, workspace) pair.
///
/// The one defect class observed in production data is membership rows whose role reference
/// went null or dangling after a migration. The resolver treats that as a hard failure: it
/// never substitutes a default role and never reports such a row as an ordinary non-member.
#[derive(Clone, Debug)]
pub struct MembershipResolver<S> {
    store: S,
}

impl<S> MembershipResolver<S>
where
    S: MemberStore + RoleStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Resolve the membership record and role for a (user, workspace) pair.
    pub async fn resolve(
        &self,
        user_id: UserId,
        workspace_id: WorkspaceId,
    ) -> Result<Membership, AccessError> {
        let member = self
            .store
            .member(user_id, workspace_id)
            .await?
            .ok_or(AccessError::NotAMember {
                user_id,
                workspace_id,
            })?;

        let role = self.store.role_by_id(member.role).await?.ok_or(
            AccessError::CorruptMembership {
                member_id: member.id,
                role_id: member.role,
            },
        )?;

        Ok(Membership { member, role })
    }

    /// Resolve only the role assigned to a user within a workspace.
    pub async fn resolve_role(
        &self,
        user_id: UserId,
        workspace_id: WorkspaceId,
    ) -> Result<Role, AccessError> {
        let membership = self.resolve(user_id, workspace_id).await?;
        Ok(membership.role)
    }
}
