use std::collections::HashSet;

use crate::api::{CollapseState, Comment, CommentId, CommentLabel, Time, UserId};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommentNode {
    pub id: CommentId,

    /// 0 for top-level comments, 1 for their direct replies, etc.
    pub depth: usize,

    /// Posted after the viewer's last visit
    pub is_new: bool,

    pub state: CollapseState,

    pub author: UserId,
    pub date: Time,
    pub text: String,
    pub num_votes: i64,
    pub labels: HashSet<CommentLabel>,
    pub is_deleted: bool,
    pub is_removed: bool,

    /// Number of visible descendants
    pub num_children: usize,

    /// Summary shown instead of a chain of removed comments, whose branch is
    /// then not displayed any further
    pub removed_marker: Option<String>,

    /// Replies, in display order
    pub children: Vec<CommentNode>,
}

impl CommentNode {
    pub fn new(c: Comment, depth: usize, is_new: bool) -> CommentNode {
        CommentNode {
            id: c.id,
            depth,
            is_new,
            state: CollapseState::Expanded,
            author: c.author,
            date: c.date,
            text: c.text,
            num_votes: c.num_votes,
            labels: c.labels,
            is_deleted: c.is_deleted,
            is_removed: c.is_removed,
            num_children: 0,
            removed_marker: None,
            children: Vec::new(),
        }
    }

    pub fn has_label(&self, label: CommentLabel) -> bool {
        self.labels.contains(&label)
    }

    pub fn is_visible(&self) -> bool {
        !(self.is_deleted || self.is_removed)
    }

    pub fn find(&self, id: &CommentId) -> Option<&CommentNode> {
        if self.id == *id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    pub fn find_mut(&mut self, id: &CommentId) -> Option<&mut CommentNode> {
        if self.id == *id {
            return Some(self);
        }
        for c in self.children.iter_mut() {
            if let Some(res) = c.find_mut(id) {
                return Some(res);
            }
        }
        None
    }

    /// Whether this node or any of its descendants is new
    pub fn contains_new(&self) -> bool {
        self.is_new || self.children.iter().any(|c| c.contains_new())
    }

    /// Pre-order iteration over this node and all its descendants
    pub fn iter(&self) -> impl Iterator<Item = &CommentNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Calls `f` on this node and every descendant, parents before children
    pub fn for_each_mut(&mut self, f: &mut impl FnMut(&mut CommentNode)) {
        f(self);
        for c in self.children.iter_mut() {
            c.for_each_mut(f);
        }
    }

    pub fn len(&self) -> usize {
        1 + self.children.iter().map(|c| c.len()).sum::<usize>()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::api::Uuid;

    pub(crate) fn node(n: u128, is_new: bool, children: Vec<CommentNode>) -> CommentNode {
        let mut res = CommentNode::new(
            Comment {
                id: CommentId(Uuid::from_u128(n)),
                parent_id: None,
                author: UserId::stub(),
                date: chrono::Utc.timestamp_opt(n as i64, 0).unwrap(),
                text: String::new(),
                num_votes: 0,
                labels: HashSet::new(),
                is_deleted: false,
                is_removed: false,
            },
            0,
            is_new,
        );
        res.children = children;
        res.fix_depths(0);
        res
    }

    pub(crate) fn id(n: u128) -> CommentId {
        CommentId(Uuid::from_u128(n))
    }

    impl CommentNode {
        fn fix_depths(&mut self, depth: usize) {
            self.depth = depth;
            for c in self.children.iter_mut() {
                c.fix_depths(depth + 1);
            }
        }
    }

    #[test]
    fn iter_is_preorder() {
        let tree = node(
            1,
            false,
            vec![
                node(2, false, vec![node(3, false, vec![])]),
                node(4, false, vec![]),
            ],
        );
        let ids = tree.iter().map(|n| n.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![id(1), id(2), id(3), id(4)]);
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.find(&id(3)).map(|n| n.depth), Some(2));
        assert!(tree.find(&id(5)).is_none());
    }

    #[test]
    fn contains_new_looks_at_whole_subtree() {
        let tree = node(
            1,
            false,
            vec![node(2, false, vec![node(3, true, vec![])]), node(4, false, vec![])],
        );
        assert!(tree.contains_new());
        assert!(tree.children[0].contains_new());
        assert!(!tree.children[1].contains_new());
    }
}
