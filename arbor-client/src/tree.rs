use std::collections::{HashMap, HashSet};

use crate::{
    api::{Comment, CommentId, CommentOrder, Error, Thread, UserId, Viewer},
    CommentNode, OrderExt,
};

/// The replies to a thread, arranged as they will be displayed to a viewer
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommentTree {
    /// The opening post, which is never collapsed
    pub post: Comment,

    /// Top-level comments, at depth 0
    pub comments: Vec<CommentNode>,

    pub viewer: Viewer,
    pub order: CommentOrder,
    num_comments: usize,
}

impl CommentTree {
    pub fn build(thread: Thread, viewer: Viewer, order: CommentOrder) -> Result<CommentTree, Error> {
        let Thread {
            root: post,
            mut comments,
        } = thread;
        let num_comments = comments.len();

        let mut ids = HashSet::with_capacity(num_comments + 1);
        ids.insert(post.id);
        for c in comments.iter() {
            if !ids.insert(c.id) {
                return Err(Error::DuplicateComment(c.id));
            }
        }
        for c in comments.iter() {
            if let Some(parent) = c.parent_id {
                if !ids.contains(&parent) {
                    return Err(Error::UnknownParent {
                        comment: c.id,
                        parent,
                    });
                }
            }
        }

        // replies are always posted after their parent, so this is display
        // order for `CommentOrder::Posted`
        comments.sort_by_key(|c| c.date);
        let mut by_parent = HashMap::<CommentId, Vec<Comment>>::new();
        for c in comments {
            by_parent
                .entry(c.parent_id.unwrap_or(post.id))
                .or_insert_with(Vec::new)
                .push(c);
        }

        let mut top_level = replies_to(&post.id, 0, &mut by_parent, &viewer, order);
        if let Some(orphan) = by_parent.into_values().flatten().min_by_key(|c| c.date) {
            return Err(Error::Unreachable(orphan.id));
        }

        prune_deleted(&mut top_level);
        for c in top_level.iter_mut() {
            add_removed_markers(c);
            count_children(c);
        }

        tracing::debug!(
            num_comments,
            shown = top_level.iter().map(|c| c.len()).sum::<usize>(),
            order = order.description(),
            "built comment tree"
        );
        Ok(CommentTree {
            post,
            comments: top_level,
            viewer,
            order,
            num_comments,
        })
    }

    pub fn find(&self, id: &CommentId) -> Option<&CommentNode> {
        self.comments.iter().find_map(|c| c.find(id))
    }

    pub fn find_mut(&mut self, id: &CommentId) -> Option<&mut CommentNode> {
        self.comments.iter_mut().find_map(|c| c.find_mut(id))
    }

    /// All comments kept in the tree, in display order
    pub fn iter(&self) -> impl Iterator<Item = &CommentNode> {
        self.comments.iter().flat_map(|c| c.iter())
    }

    /// Number of comments in the thread, including deleted ones
    pub fn len(&self) -> usize {
        self.num_comments
    }

    pub fn is_empty(&self) -> bool {
        self.num_comments == 0
    }

    pub fn num_top_level(&self) -> usize {
        self.comments.len()
    }

    /// Latest comment that is neither deleted nor removed
    pub fn most_recent_comment(&self) -> Option<&CommentNode> {
        self.iter()
            .filter(|c| c.is_visible())
            .max_by_key(|c| c.date)
    }
}

fn replies_to(
    parent: &CommentId,
    depth: usize,
    by_parent: &mut HashMap<CommentId, Vec<Comment>>,
    viewer: &Viewer,
    order: CommentOrder,
) -> Vec<CommentNode> {
    let Some(replies) = by_parent.remove(parent) else {
        return Vec::new();
    };
    let mut res = replies
        .into_iter()
        .map(|c| {
            let is_new = match viewer.last_visit {
                Some(last_visit) => c.date > last_visit && !viewer.is(&c.author),
                None => false,
            };
            let id = c.id;
            let mut reply = CommentNode::new(c, depth, is_new);
            reply.children = replies_to(&id, depth + 1, by_parent, viewer, order);
            reply
        })
        .collect::<Vec<_>>();
    order.sort(&mut res);
    res
}

/// Drops deleted comments that have nothing left to show below them
fn prune_deleted(comments: &mut Vec<CommentNode>) {
    for c in comments.iter_mut() {
        prune_deleted(&mut c.children);
    }
    comments.retain(|c| !(c.is_deleted && c.children.is_empty()));
}

/// Summarizes chains of removed comments, returning how many removed
/// comments each user has in the chain starting at `node`
fn add_removed_markers(node: &mut CommentNode) -> Option<HashMap<UserId, usize>> {
    let mut by_user = HashMap::new();
    let mut all_removed = true;
    for c in node.children.iter_mut() {
        // every child gets its own marker, even when this chain is broken
        match add_removed_markers(c) {
            Some(counts) => {
                for (user, n) in counts {
                    *by_user.entry(user).or_insert(0) += n;
                }
            }
            None => all_removed = false,
        }
    }
    if !node.is_removed || !all_removed {
        return None;
    }
    *by_user.entry(node.author).or_insert(0) += 1;

    let num_comments = by_user.values().sum::<usize>();
    if num_comments > 1 {
        node.removed_marker = Some(format!(
            "Removed by admin: {num_comments} comments by {} users",
            by_user.len()
        ));
    }
    Some(by_user)
}

fn count_children(node: &mut CommentNode) {
    node.num_children = 0;
    for c in node.children.iter_mut() {
        count_children(c);
        node.num_children += c.num_children + usize::from(c.is_visible());
    }
}
