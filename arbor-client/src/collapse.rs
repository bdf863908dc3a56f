use crate::{
    api::{CollapseState, CommentId, Error},
    CommentNode, CommentTree,
};

/// Toggles a single comment, returning its new state.
///
/// An individually collapsed comment expands instead of switching to a full
/// collapse. Neither ancestors nor descendants are touched.
pub fn collapse_one(node: &mut CommentNode) -> CollapseState {
    node.state = match node.state {
        CollapseState::Expanded => CollapseState::Collapsed,
        CollapseState::Collapsed | CollapseState::CollapsedIndividual => CollapseState::Expanded,
    };
    node.state
}

fn for_each_mut(comments: &mut [CommentNode], f: &mut impl FnMut(&mut CommentNode)) {
    for c in comments.iter_mut() {
        c.for_each_mut(f);
    }
}

/// Expands every comment of the thread
pub fn expand_all(comments: &mut [CommentNode]) -> usize {
    let mut changed = 0;
    for_each_mut(comments, &mut |n| {
        if n.state != CollapseState::Expanded {
            n.state = CollapseState::Expanded;
            changed += 1;
        }
    });
    tracing::debug!(changed, "expanded all comments");
    changed
}

/// Fully collapses every direct reply to a top-level comment, after undoing
/// individual collapses anywhere in the thread.
///
/// `comments` are the top-level comments; they keep their own state.
pub fn collapse_all_top_level(comments: &mut [CommentNode]) -> usize {
    let mut changed = 0;
    for_each_mut(comments, &mut |n| {
        if n.state == CollapseState::CollapsedIndividual {
            collapse_one(n);
            changed += 1;
        }
    });
    for reply in comments.iter_mut().flat_map(|c| c.children.iter_mut()) {
        if reply.state != CollapseState::Collapsed {
            collapse_one(reply);
            changed += 1;
        }
    }
    tracing::debug!(changed, "collapsed all replies to top-level comments");
    changed
}

/// Expands every comment that is collapsed in either way
pub fn expand_all_from_collapsed(comments: &mut [CommentNode]) -> usize {
    let mut changed = 0;
    for_each_mut(comments, &mut |n| {
        if n.state.is_collapsed() {
            n.state = CollapseState::Expanded;
            changed += 1;
        }
    });
    tracing::debug!(changed, "expanded collapsed comments");
    changed
}

/// Hides the already-read parts of the thread and surfaces the new comments.
///
/// Starts from a fully expanded thread, so calling it twice in a row gives the
/// same result both times.
pub fn collapse_read_highlight_new(comments: &mut [CommentNode]) -> usize {
    let before = comments
        .iter()
        .flat_map(|c| c.iter())
        .map(|n| n.state)
        .collect::<Vec<_>>();

    for_each_mut(comments, &mut |n| n.state = CollapseState::Expanded);
    for c in comments.iter_mut() {
        if !focus_new(c) {
            c.state = CollapseState::Collapsed;
        }
    }

    let changed = before
        .into_iter()
        .zip(comments.iter().flat_map(|c| c.iter()))
        .filter(|(old, n)| *old != n.state)
        .count();
    tracing::debug!(changed, "collapsed read comments");
    changed
}

/// Returns whether `node` or one of its descendants is new.
///
/// Read replies of a node with something new below it are the shallowest
/// read subtrees, and get collapsed here; everything under them stays as is.
fn focus_new(node: &mut CommentNode) -> bool {
    let child_has_new = node
        .children
        .iter_mut()
        .map(focus_new)
        .collect::<Vec<_>>();
    if !node.is_new && !child_has_new.contains(&true) {
        return false;
    }

    for (c, has_new) in node.children.iter_mut().zip(child_has_new.iter()) {
        if !has_new {
            c.state = CollapseState::Collapsed;
        }
    }

    if node.is_new || node.children.iter().any(|c| c.is_new) {
        node.state = CollapseState::Expanded;
    } else if child_has_new.contains(&false) {
        // at least two levels above a new comment, next to read branches
        node.state = CollapseState::CollapsedIndividual;
    }
    true
}

impl CommentTree {
    pub fn collapse_one(&mut self, id: &CommentId) -> Result<CollapseState, Error> {
        let node = self.find_mut(id).ok_or(Error::CommentNotFound(*id))?;
        Ok(collapse_one(node))
    }

    pub fn expand_all(&mut self) -> usize {
        expand_all(&mut self.comments)
    }

    pub fn collapse_all_top_level(&mut self) -> usize {
        collapse_all_top_level(&mut self.comments)
    }

    pub fn expand_all_from_collapsed(&mut self) -> usize {
        expand_all_from_collapsed(&mut self.comments)
    }

    pub fn collapse_read_highlight_new(&mut self) -> usize {
        collapse_read_highlight_new(&mut self.comments)
    }
}
