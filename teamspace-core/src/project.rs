// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::id::{ProjectId, UserId, WorkspaceId};

/// A project scoped to exactly one workspace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    pub emoji: String,
    pub workspace: WorkspaceId,
    pub created_by: UserId,
}

impl Project {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        emoji: Option<String>,
        workspace: WorkspaceId,
        created_by: UserId,
    ) -> Self {
        Self {
            id: ProjectId::random(),
            name: name.into(),
            description,
            emoji: emoji.unwrap_or_else(|| "📊".to_owned()),
            workspace,
            created_by,
        }
    }
}
