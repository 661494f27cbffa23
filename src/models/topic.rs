//! Discussion topic model and its vote state machine.

use serde::{Deserialize, Serialize};

/// A vote cast by the viewer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    Like,
    Dislike,
}

/// A community topic attached to one technology.
///
/// Topics track a single implicit viewer: `user_vote` is that viewer's current vote and
/// contributes exactly one unit to the matching counter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub dislikes: u32,
    #[serde(default)]
    pub user_vote: Option<VoteKind>,
}

impl Topic {
    /// Apply the viewer's vote.
    ///
    /// Repeating the current vote clears it. Any other request first withdraws the current vote
    /// and then counts the requested one; `None` just withdraws.
    pub fn apply_vote(&mut self, requested: Option<VoteKind>, now: String) {
        let current = self.user_vote;

        if let Some(previous) = current {
            let count = self.counter_mut(previous);
            *count = count.saturating_sub(1);
        }

        if requested == current {
            self.user_vote = None;
        } else {
            if let Some(next) = requested {
                let count = self.counter_mut(next);
                *count = count.saturating_add(1);
            }
            self.user_vote = requested;
        }

        self.updated_at = now;
    }

    fn counter_mut(&mut self, kind: VoteKind) -> &mut u32 {
        match kind {
            VoteKind::Like => &mut self.likes,
            VoteKind::Dislike => &mut self.dislikes,
        }
    }
}

/// Request body for creating a topic.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTopicRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Request body for updating a topic. Absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTopicRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Request body for voting on a topic. `null` withdraws the current vote.
#[derive(Debug, Clone, Deserialize)]
pub struct VoteRequest {
    #[serde(default)]
    pub vote: Option<VoteKind>,
}
