// SPDX-License-Identifier: MIT OR Apache-2.0

use teamspace_core::{InviteCode, Member, Permission, RoleName, UserId, WorkspaceId};
use tracing::debug;

use crate::manager::{Manager, ServiceError};
use crate::store::ServiceStore;

impl<S> Manager<S>
where
    S: ServiceStore,
{
    /// All membership records of a workspace. Requires membership, with any role.
    pub async fn members(
        &self,
        actor: UserId,
        workspace_id: WorkspaceId,
    ) -> Result<Vec<Member>, ServiceError> {
        self.guard.require_member(actor, workspace_id).await?;
        Ok(self.store.members_of_workspace(workspace_id).await?)
    }

    /// Join the workspace behind an invite code, with the MEMBER role.
    pub async fn join_workspace(
        &self,
        actor: UserId,
        code: &InviteCode,
    ) -> Result<Member, ServiceError> {
        let workspace = self
            .store
            .workspace_by_invite_code(code)
            .await?
            .ok_or(ServiceError::UnknownInviteCode)?;

        let role = self
            .store
            .role_by_name(RoleName::Member)
            .await?
            .ok_or(ServiceError::RoleNotSeeded(RoleName::Member))?;

        let member = Member::new(actor, workspace.id, role.id);
        if !self.store.insert_member(&member).await? {
            return Err(ServiceError::AlreadyMember(actor, workspace.id));
        }

        debug!(user_id = %actor, workspace_id = %workspace.id, "joined workspace");
        Ok(member)
    }

    /// Add a user to a workspace with an explicit role. Requires ADD_MEMBER.
    pub async fn add_member(
        &self,
        actor: UserId,
        workspace_id: WorkspaceId,
        user_id: UserId,
        role_name: RoleName,
    ) -> Result<Member, ServiceError> {
        self.guard
            .require(actor, workspace_id, Permission::AddMember)
            .await?;

        let role = self
            .store
            .role_by_name(role_name)
            .await?
            .ok_or(ServiceError::RoleNotSeeded(role_name))?;

        let member = Member::new(user_id, workspace_id, role.id);
        if !self.store.insert_member(&member).await? {
            return Err(ServiceError::AlreadyMember(user_id, workspace_id));
        }

        debug!(%user_id, %workspace_id, role = %role_name, "added member");
        Ok(member)
    }

    /// Reassign a member's role. Requires CHANGE_MEMBER_ROLE; the owner's role is fixed.
    pub async fn change_member_role(
        &self,
        actor: UserId,
        workspace_id: WorkspaceId,
        user_id: UserId,
        role_name: RoleName,
    ) -> Result<(), ServiceError> {
        self.guard
            .require(actor, workspace_id, Permission::ChangeMemberRole)
            .await?;

        let workspace = self
            .store
            .workspace(workspace_id)
            .await?
            .ok_or(ServiceError::WorkspaceNotFound(workspace_id))?;
        if user_id == workspace.owner {
            return Err(ServiceError::OwnerProtected);
        }

        let role = self
            .store
            .role_by_name(role_name)
            .await?
            .ok_or(ServiceError::RoleNotSeeded(role_name))?;

        if !self
            .store
            .update_member_role(user_id, workspace_id, role.id)
            .await?
        {
            return Err(ServiceError::MemberNotFound(user_id, workspace_id));
        }

        debug!(%user_id, %workspace_id, role = %role_name, "changed member role");
        Ok(())
    }

    /// Remove a member from a workspace.
    ///
    /// Removing someone else requires REMOVE_MEMBER; members may always leave themselves. The
    /// owner can neither be removed nor leave.
    pub async fn remove_member(
        &self,
        actor: UserId,
        workspace_id: WorkspaceId,
        user_id: UserId,
    ) -> Result<(), ServiceError> {
        if actor == user_id {
            self.guard.require_member(actor, workspace_id).await?;
        } else {
            self.guard
                .require(actor, workspace_id, Permission::RemoveMember)
                .await?;
        }

        let workspace = self
            .store
            .workspace(workspace_id)
            .await?
            .ok_or(ServiceError::WorkspaceNotFound(workspace_id))?;
        if user_id == workspace.owner {
            return Err(ServiceError::OwnerProtected);
        }

        if !self.store.delete_member(user_id, workspace_id).await? {
            return Err(ServiceError::MemberNotFound(user_id, workspace_id));
        }

        debug!(%user_id, %workspace_id, "removed member");
        Ok(())
    }
}
