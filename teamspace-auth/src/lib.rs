// SPDX-License-Identifier: MIT OR Apache-2.0

//! Workspace membership authorization with per-role permissions.
//!
//! Every mutating operation on a workspace and its projects and tasks is gated by the same
//! linear sequence: resolve the acting user's membership and role, check the operation's
//! required permission token against the role's permission set, then act. The pieces are kept
//! separate so each can be reasoned about alone:
//!
//! - [`RoleRegistry`]: the read-only role name to permission set mapping, constructed once at
//!   process start and passed by reference. Permission sets are independent flat sets; no role
//!   inherits from another.
//! - [`MembershipResolver`]: finds the unique membership record for a (user, workspace) pair
//!   and the role document it references. Fails closed: a missing record is [`NotAMember`], a
//!   dangling role reference is [`CorruptMembership`] and never silently defaults.
//! - [`AccessGuard`]: the translation boundary in front of mutating operations. Any internal
//!   failure becomes the single caller-visible [`Forbidden`] while the distinct reason is kept
//!   for logging and operators.
//!
//! [`NotAMember`]: AccessError::NotAMember
//! [`CorruptMembership`]: AccessError::CorruptMembership

mod guard;
mod registry;
mod resolver;
#[cfg(test)]
mod tests;

pub use guard::{AccessGuard, DenyReason, Forbidden, GuardError};
pub use registry::{RegistryError, RoleRegistry, seed_roles};
pub use resolver::{AccessError, Membership, MembershipResolver};
