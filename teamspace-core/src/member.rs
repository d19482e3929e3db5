// SPDX-License-Identifier: MIT OR Apache-2.0

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::id::{MemberId, RoleId, UserId, WorkspaceId};

/// The association of one user to one workspace with exactly one role.
///
/// There is never more than one membership record per (user, workspace) pair. The `role` field
/// references a seeded role document; a reference which does not resolve is an inconsistent
/// state which readers must treat as a hard failure, never as an implicit role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub user_id: UserId,
    pub workspace_id: WorkspaceId,
    pub role: RoleId,
    pub joined_at: u64,
}

impl Member {
    pub fn new(user_id: UserId, workspace_id: WorkspaceId, role: RoleId) -> Self {
        Self {
            id: MemberId::random(),
            user_id,
            workspace_id,
            role,
            joined_at: now_secs(),
        }
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or_default()
}
