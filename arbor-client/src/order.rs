use std::cmp::Reverse;

use crate::{
    api::{CommentLabel, CommentOrder},
    CommentNode,
};

pub trait OrderExt {
    fn sort(&self, siblings: &mut [CommentNode]);
}

impl OrderExt for CommentOrder {
    /// Expects `siblings` in posting order, and keeps it between equal comments
    fn sort(&self, siblings: &mut [CommentNode]) {
        match self {
            CommentOrder::Posted => (),
            CommentOrder::Newest => siblings.sort_by_key(|c| Reverse(c.date)),
            CommentOrder::Votes => siblings.sort_by_key(|c| Reverse(c.num_votes)),
            CommentOrder::Relevance => siblings.sort_by_key(|c| Reverse(relevance(c))),
        }
    }
}

/// Sorting tier first, then value inside the tier
fn relevance(c: &CommentNode) -> (i64, i64) {
    if c.is_removed {
        return (-100, 0);
    }
    if c.has_label(CommentLabel::Noise) {
        return (-2, c.num_votes);
    }
    if c.has_label(CommentLabel::Offtopic) {
        return (-1, c.num_votes);
    }
    if c.has_label(CommentLabel::Joke) {
        return (0, c.num_votes / 2);
    }
    if c.has_label(CommentLabel::Exemplary) {
        return (0, c.num_votes.saturating_mul(2));
    }
    (0, c.num_votes)
}
