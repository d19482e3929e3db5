// SPDX-License-Identifier: MIT OR Apache-2.0

use teamspace_store::{MemberStore, ProjectStore, RoleStore, TaskStore, WorkspaceStore};

/// Combined persistence surface the manager operates on.
///
/// The manager and its access guard each hold a handle to the store, so implementations are
/// expected to be cheaply cloneable handles over shared state.
pub trait ServiceStore:
    RoleStore + MemberStore + WorkspaceStore + ProjectStore + TaskStore + Clone
{
}

impl<S> ServiceStore for S where
    S: RoleStore + MemberStore + WorkspaceStore + ProjectStore + TaskStore + Clone
{
}
