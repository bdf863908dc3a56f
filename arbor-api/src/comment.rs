use std::{collections::HashSet, fmt};

use uuid::Uuid;

use crate::{Time, STUB_UUID};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn stub() -> UserId {
        UserId(STUB_UUID)
    }
}

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct CommentId(pub Uuid);

impl CommentId {
    pub fn stub() -> CommentId {
        CommentId(STUB_UUID)
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommentLabel {
    Noise,
    Offtopic,
    Joke,
    Exemplary,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Comment {
    pub id: CommentId,

    /// Comment this one replies to, `None` for a direct reply to the opening post
    #[serde(default)]
    pub parent_id: Option<CommentId>,

    pub author: UserId,
    pub date: Time,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub num_votes: i64,

    /// Labels currently active on this comment
    #[serde(default)]
    pub labels: HashSet<CommentLabel>,

    #[serde(default)]
    pub is_deleted: bool,

    /// Removed by a moderator
    #[serde(default)]
    pub is_removed: bool,
}

impl Comment {
    pub fn has_label(&self, label: CommentLabel) -> bool {
        self.labels.contains(&label)
    }

    /// Deleted and removed comments stay in the tree but are not shown
    pub fn is_visible(&self) -> bool {
        !(self.is_deleted || self.is_removed)
    }
}
