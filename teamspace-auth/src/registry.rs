// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::{BTreeMap, BTreeSet};

use teamspace_core::{Permission, Role, RoleName};
use teamspace_store::{RoleStore, StoreError};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("role {0} is missing from the seeded role set")]
    MissingRole(RoleName),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Read-only mapping from role name to permission set.
///
/// The registry is an immutable configuration value: constructed once at process start and
/// passed by reference to the resolver and guards, never mutated afterwards and never reached
/// through a global.
///
/// Each role's permission set is flat and independent. OWNER and ADMIN overlap only because
/// their seed data lists the shared tokens explicitly; nothing is inferred from one role to
/// another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleRegistry {
    permissions: BTreeMap<RoleName, BTreeSet<Permission>>,
}

impl RoleRegistry {
    /// The canonical permission matrix.
    pub fn new() -> Self {
        use Permission::*;
        let permissions = BTreeMap::from([
            (
                RoleName::Owner,
                BTreeSet::from([
                    CreateWorkspace,
                    EditWorkspace,
                    DeleteWorkspace,
                    ManageWorkspaceSettings,
                    AddMember,
                    ChangeMemberRole,
                    RemoveMember,
                    CreateProject,
                    EditProject,
                    DeleteProject,
                    CreateTask,
                    EditTask,
                    DeleteTask,
                    ViewOnly,
                ]),
            ),
            (
                RoleName::Admin,
                BTreeSet::from([
                    ManageWorkspaceSettings,
                    AddMember,
                    CreateProject,
                    EditProject,
                    DeleteProject,
                    CreateTask,
                    EditTask,
                    DeleteTask,
                    ViewOnly,
                ]),
            ),
            (
                RoleName::Member,
                BTreeSet::from([ViewOnly, CreateTask, EditTask]),
            ),
        ]);
        Self { permissions }
    }

    /// Build the registry from already-seeded role documents.
    ///
    /// Fails when any of the three role names is missing. This is the startup validation path:
    /// a deployment whose seeded data does not cover the full closed set must not come up.
    pub fn from_roles(roles: impl IntoIterator<Item = Role>) -> Result<Self, RegistryError> {
        let mut permissions = BTreeMap::new();
        for role in roles {
            permissions.insert(role.name, role.permissions.into_iter().collect());
        }
        for name in RoleName::all() {
            if !permissions.contains_key(&name) {
                return Err(RegistryError::MissingRole(name));
            }
        }
        Ok(Self { permissions })
    }

    /// The permission set of a role.
    pub fn permissions_for(&self, name: RoleName) -> &BTreeSet<Permission> {
        // All three names are present by construction.
        &self.permissions[&name]
    }

    /// Decide whether a resolved role grants a required permission.
    ///
    /// Pure set membership over the registry's seed for the role's name: no side effects, no
    /// ordering sensitivity, no role-hierarchy inference. Composite checks are expressed by the
    /// caller as boolean combinations of single calls.
    pub fn authorize(&self, role: &Role, permission: Permission) -> bool {
        self.permissions_for(role.name).contains(&permission)
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Write the registry's roles into the store, once.
///
/// Seeding is idempotent: names which already have a role document are left untouched, so
/// repeated provisioning runs cannot duplicate or overwrite roles. Returns the registry built
/// from the documents now present in the store.
pub async fn seed_roles<S: RoleStore>(store: &S) -> Result<RoleRegistry, RegistryError> {
    let canonical = RoleRegistry::new();
    for name in RoleName::all() {
        if store.role_by_name(name).await?.is_none() {
            let permissions = canonical.permissions_for(name).iter().copied().collect();
            store.insert_role(&Role::new(name, permissions)).await?;
            debug!(%name, "seeded role");
        }
    }
    RoleRegistry::from_roles(store.roles().await?)
}

#[cfg(test)]
mod tests {
    use teamspace_core::{Permission, Role, RoleName};

    use super::{RegistryError, RoleRegistry};

    #[test]
    fn canonical_matrix() {
        let registry = RoleRegistry::new();

        let owner = registry.permissions_for(RoleName::Owner);
        assert_eq!(owner.len(), 14);
        assert!(owner.contains(&Permission::ViewOnly));
        assert!(owner.contains(&Permission::DeleteWorkspace));
        assert!(owner.contains(&Permission::ChangeMemberRole));

        let admin = registry.permissions_for(RoleName::Admin);
        assert_eq!(
            admin.iter().copied().collect::<Vec<_>>(),
            vec![
                Permission::ManageWorkspaceSettings,
                Permission::AddMember,
                Permission::CreateProject,
                Permission::EditProject,
                Permission::DeleteProject,
                Permission::CreateTask,
                Permission::EditTask,
                Permission::DeleteTask,
                Permission::ViewOnly,
            ]
        );
        assert!(!admin.contains(&Permission::EditWorkspace));
        assert!(!admin.contains(&Permission::ChangeMemberRole));
        assert!(!admin.contains(&Permission::RemoveMember));

        let member = registry.permissions_for(RoleName::Member);
        assert_eq!(
            member.iter().copied().collect::<Vec<_>>(),
            vec![
                Permission::CreateTask,
                Permission::EditTask,
                Permission::ViewOnly,
            ]
        );
    }

    #[test]
    fn no_role_hierarchy_is_inferred() {
        let registry = RoleRegistry::new();
        // ADMIN lacking a permission says nothing about OWNER and vice versa; the sets stand
        // alone.
        assert!(
            registry
                .permissions_for(RoleName::Owner)
                .contains(&Permission::RemoveMember)
        );
        assert!(
            !registry
                .permissions_for(RoleName::Admin)
                .contains(&Permission::RemoveMember)
        );
    }

    #[test]
    fn authorize_is_deterministic() {
        let registry = RoleRegistry::new();
        let role = Role::new(
            RoleName::Member,
            registry
                .permissions_for(RoleName::Member)
                .iter()
                .copied()
                .collect(),
        );
        for _ in 0..3 {
            assert!(registry.authorize(&role, Permission::CreateTask));
            assert!(!registry.authorize(&role, Permission::DeleteWorkspace));
        }
    }

    #[test]
    fn registry_from_partial_seed_fails() {
        let roles = vec![
            Role::new(RoleName::Owner, vec![Permission::DeleteWorkspace]),
            Role::new(RoleName::Member, vec![Permission::ViewOnly]),
        ];
        assert!(matches!(
            RoleRegistry::from_roles(roles),
            Err(RegistryError::MissingRole(RoleName::Admin))
        ));
    }
}
