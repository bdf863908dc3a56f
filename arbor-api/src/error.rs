use crate::CommentId;

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Comment id used twice in thread {0}")]
    DuplicateComment(CommentId),

    #[error("Comment {comment} replies to unknown comment {parent}")]
    UnknownParent {
        comment: CommentId,
        parent: CommentId,
    },

    #[error("Comment {0} is not reachable from the opening post")]
    Unreachable(CommentId),

    #[error("Comment not found in tree {0}")]
    CommentNotFound(CommentId),
}
