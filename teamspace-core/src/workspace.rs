// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};

use crate::id::{UserId, WorkspaceId};

/// Length of generated invite codes.
pub const INVITE_CODE_LEN: usize = 8;

/// Shareable code for joining a workspace.
///
/// Codes are generated randomly and unique across all workspaces. Rotating the code invalidates
/// previously shared ones.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InviteCode(String);

impl InviteCode {
    /// Generate a new random invite code.
    pub fn random() -> Self {
        let code = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(INVITE_CODE_LEN)
            .map(char::from)
            .collect();
        Self(code)
    }

    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InviteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A workspace owned by one user, holding projects, tasks and a collection of members.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
    pub description: Option<String>,
    pub owner: UserId,
    pub invite_code: InviteCode,
}

impl Workspace {
    pub fn new(name: impl Into<String>, description: Option<String>, owner: UserId) -> Self {
        Self {
            id: WorkspaceId::random(),
            name: name.into(),
            description,
            owner,
            invite_code: InviteCode::random(),
        }
    }

    /// Replace the invite code with a freshly generated one.
    pub fn rotate_invite_code(&mut self) {
        self.invite_code = InviteCode::random();
    }
}
