use crate::{Comment, Time, UserId};

/// A topic's opening post along with every reply posted to it
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Thread {
    pub root: Comment,

    /// Replies, in no particular order
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// Who is looking at a thread
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Viewer {
    pub user: Option<UserId>,

    /// Previous visit to this thread, comments posted after it are new
    pub last_visit: Option<Time>,

    /// Whether the viewer wants already-read discussion collapsed on return
    #[serde(default)]
    pub collapse_old_comments: bool,
}

impl Viewer {
    pub fn anonymous() -> Viewer {
        Viewer::default()
    }

    pub fn is(&self, user: &UserId) -> bool {
        self.user.as_ref() == Some(user)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommentOrder {
    #[default]
    Relevance,
    Votes,
    Newest,
    Posted,
}

impl CommentOrder {
    pub fn description(&self) -> &'static str {
        match self {
            CommentOrder::Relevance => "relevance",
            CommentOrder::Votes => "most votes",
            CommentOrder::Newest => "newest first",
            CommentOrder::Posted => "order posted",
        }
    }
}

impl std::str::FromStr for CommentOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<CommentOrder, String> {
        match s {
            "relevance" => Ok(CommentOrder::Relevance),
            "votes" => Ok(CommentOrder::Votes),
            "newest" => Ok(CommentOrder::Newest),
            "posted" => Ok(CommentOrder::Posted),
            _ => Err(format!("unknown comment order {s:?}")),
        }
    }
}
