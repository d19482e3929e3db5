// SPDX-License-Identifier: MIT OR Apache-2.0

//! Guarded workspace, project and task operations.
//!
//! The [`Manager`] is what route handlers call. Every mutating operation follows the same
//! linear sequence: the access guard resolves the acting user's membership and checks the
//! operation's required permission, and only then is the first write issued. A denied request
//! performs no side effect.

mod manager;
mod member;
mod project;
mod store;
mod task;
#[cfg(test)]
mod tests;
mod workspace;

pub use manager::{Manager, ServiceError};
pub use store::ServiceStore;
pub use task::{TaskDraft, TaskPatch};
