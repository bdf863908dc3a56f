//! The collapse state a thread is first shown in, before the viewer touches
//! anything.

use std::collections::HashMap;

use crate::{
    api::{CollapseState, CommentId, CommentLabel, Time},
    CommentNode, CommentTree,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Mark {
    /// Must stay visible
    Uncollapsed,
    Full,
    Individual,
}

/// Collapse decisions accumulated over a tree, not yet applied to it
#[derive(Debug, Default)]
pub struct InitialCollapse {
    marks: HashMap<CommentId, Mark>,
}

impl InitialCollapse {
    pub fn new() -> InitialCollapse {
        InitialCollapse::default()
    }

    /// Fully collapses noise, unless the viewer wrote it
    pub fn collapse_from_labels(&mut self, tree: &CommentTree) {
        for c in tree.iter() {
            if tree.viewer.is(&c.author) {
                continue;
            }
            if c.has_label(CommentLabel::Noise) {
                self.marks.insert(c.id, Mark::Full);
            }
        }
    }

    /// Keeps comments posted after `threshold` visible, along with their parents
    pub fn uncollapse_new(&mut self, tree: &CommentTree, threshold: Time) {
        for top in tree.comments.iter() {
            self.uncollapse_new_under(tree, top, None, threshold);
        }
    }

    fn uncollapse_new_under(
        &mut self,
        tree: &CommentTree,
        node: &CommentNode,
        parent: Option<CommentId>,
        threshold: Time,
    ) {
        if node.date > threshold && node.is_visible() && !tree.viewer.is(&node.author) {
            self.marks.entry(node.id).or_insert(Mark::Uncollapsed);
            if let Some(parent) = parent {
                self.marks.insert(parent, Mark::Uncollapsed);
            }
        }
        for c in node.children.iter() {
            self.uncollapse_new_under(tree, c, Some(node.id), threshold);
        }
    }

    /// Collapses as much as possible around the comments that must stay visible
    pub fn finalize_maximized(&mut self, tree: &CommentTree) {
        let top_level = &tree.comments;
        let unknown_before = top_level
            .iter()
            .map(|c| !self.marks.contains_key(&c.id))
            .collect::<Vec<_>>();

        for c in top_level.iter() {
            self.collapse_recursively(c);
        }

        // a page with nothing but collapsed comments is useless
        if top_level
            .iter()
            .all(|c| self.marks.get(&c.id) == Some(&Mark::Full))
        {
            for (c, was_unknown) in top_level.iter().zip(unknown_before) {
                if was_unknown {
                    self.marks.remove(&c.id);
                }
            }
        }
    }

    fn collapse_recursively(&mut self, node: &CommentNode) {
        let mark = self.marks.get(&node.id).copied();
        if mark == Some(Mark::Full) {
            return;
        }
        if mark.is_none() && !self.has_uncollapsed_descendant(node) {
            self.marks.insert(node.id, Mark::Full);
            return;
        }
        self.marks.entry(node.id).or_insert(Mark::Individual);
        for c in node.children.iter() {
            self.collapse_recursively(c);
        }
    }

    fn has_uncollapsed_descendant(&self, node: &CommentNode) -> bool {
        node.children.iter().any(|c| {
            self.marks.get(&c.id) == Some(&Mark::Uncollapsed) || self.has_uncollapsed_descendant(c)
        })
    }

    pub fn apply(self, tree: &mut CommentTree) {
        let mut collapsed = 0;
        for c in tree.comments.iter_mut() {
            c.for_each_mut(&mut |n| {
                n.state = match self.marks.get(&n.id) {
                    Some(Mark::Full) => CollapseState::Collapsed,
                    Some(Mark::Individual) => CollapseState::CollapsedIndividual,
                    Some(Mark::Uncollapsed) | None => CollapseState::Expanded,
                };
                if n.state.is_collapsed() {
                    collapsed += 1;
                }
            });
        }
        tracing::debug!(collapsed, "applied initial collapse");
    }
}

impl CommentTree {
    /// Labels always apply; returning viewers who asked for it also get the
    /// already-read discussion collapsed.
    pub fn apply_initial_collapse(&mut self) {
        let mut initial = InitialCollapse::new();
        initial.collapse_from_labels(self);
        if let (Some(last_visit), true) =
            (self.viewer.last_visit, self.viewer.collapse_old_comments)
        {
            initial.uncollapse_new(self, last_visit);
            initial.finalize_maximized(self);
        }
        initial.apply(self);
    }
}
