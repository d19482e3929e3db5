// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence boundary of the teamspace backend.
//!
//! The traits in this crate are the only surface the authorization and service layers read and
//! write documents through. A database-backed implementation lives with the deployment; the
//! [`MemoryStore`] here is the reference implementation used in development and tests.

mod memory;
pub mod traits;

pub use memory::MemoryStore;
pub use traits::{
    MemberStore, ProjectStore, RoleStore, StoreError, TaskStore, WorkspaceStore,
};
