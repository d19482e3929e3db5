// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::RoleId;

/// The three role names which can be assigned to a workspace member.
///
/// This is a closed set. Role documents carrying any other name are a seed or migration defect
/// and are rejected at the parsing boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleName {
    Owner,
    Admin,
    Member,
}

impl RoleName {
    /// All role names, in seed order.
    pub const fn all() -> [RoleName; 3] {
        [RoleName::Owner, RoleName::Admin, RoleName::Member]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Owner => "OWNER",
            RoleName::Admin => "ADMIN",
            RoleName::Member => "MEMBER",
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown role name: {0}")]
pub struct UnknownRoleError(pub String);

impl FromStr for RoleName {
    type Err = UnknownRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "OWNER" => Ok(RoleName::Owner),
            "ADMIN" => Ok(RoleName::Admin),
            "MEMBER" => Ok(RoleName::Member),
            unknown => Err(UnknownRoleError(unknown.to_owned())),
        }
    }
}

/// Permission tokens naming one allowed action each.
///
/// The vocabulary is closed; authorization is plain set membership over these tokens with no
/// implied ordering or hierarchy between them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
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
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::CreateWorkspace => "CREATE_WORKSPACE",
            Permission::EditWorkspace => "EDIT_WORKSPACE",
            Permission::DeleteWorkspace => "DELETE_WORKSPACE",
            Permission::ManageWorkspaceSettings => "MANAGE_WORKSPACE_SETTINGS",
            Permission::AddMember => "ADD_MEMBER",
            Permission::ChangeMemberRole => "CHANGE_MEMBER_ROLE",
            Permission::RemoveMember => "REMOVE_MEMBER",
            Permission::CreateProject => "CREATE_PROJECT",
            Permission::EditProject => "EDIT_PROJECT",
            Permission::DeleteProject => "DELETE_PROJECT",
            Permission::CreateTask => "CREATE_TASK",
            Permission::EditTask => "EDIT_TASK",
            Permission::DeleteTask => "DELETE_TASK",
            Permission::ViewOnly => "VIEW_ONLY",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown permission token: {0}")]
pub struct UnknownPermissionError(pub String);

impl FromStr for Permission {
    type Err = UnknownPermissionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "CREATE_WORKSPACE" => Ok(Permission::CreateWorkspace),
            "EDIT_WORKSPACE" => Ok(Permission::EditWorkspace),
            "DELETE_WORKSPACE" => Ok(Permission::DeleteWorkspace),
            "MANAGE_WORKSPACE_SETTINGS" => Ok(Permission::ManageWorkspaceSettings),
            "ADD_MEMBER" => Ok(Permission::AddMember),
            "CHANGE_MEMBER_ROLE" => Ok(Permission::ChangeMemberRole),
            "REMOVE_MEMBER" => Ok(Permission::RemoveMember),
            "CREATE_PROJECT" => Ok(Permission::CreateProject),
            "EDIT_PROJECT" => Ok(Permission::EditProject),
            "DELETE_PROJECT" => Ok(Permission::DeleteProject),
            "CREATE_TASK" => Ok(Permission::CreateTask),
            "EDIT_TASK" => Ok(Permission::EditTask),
            "DELETE_TASK" => Ok(Permission::DeleteTask),
            "VIEW_ONLY" => Ok(Permission::ViewOnly),
            unknown => Err(UnknownPermissionError(unknown.to_owned())),
        }
    }
}

/// A seeded role document.
///
/// Roles are written once at provisioning time and read-only afterwards. Members reference them
/// by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: RoleName,
    pub permissions: Vec<Permission>,
}

impl Role {
    pub fn new(name: RoleName, permissions: Vec<Permission>) -> Self {
        Self {
            id: RoleId::random(),
            name,
            permissions,
        }
    }
}
