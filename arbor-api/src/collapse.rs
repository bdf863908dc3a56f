/// How a single comment is presented.
///
/// `Collapsed` hides the whole subtree behind the comment's header, while
/// `CollapsedIndividual` hides only the comment's own body and leaves its
/// replies visible. A comment is always in exactly one of these states.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollapseState {
    #[default]
    Expanded,
    Collapsed,
    CollapsedIndividual,
}

impl CollapseState {
    pub fn is_collapsed(&self) -> bool {
        !matches!(self, CollapseState::Expanded)
    }

    /// Text of the comment's collapse toggle button
    pub fn toggle_glyph(&self) -> &'static str {
        match self {
            CollapseState::Collapsed => "+",
            CollapseState::Expanded | CollapseState::CollapsedIndividual => "\u{2212}",
        }
    }

    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            CollapseState::Expanded => None,
            CollapseState::Collapsed => Some("is-comment-collapsed"),
            CollapseState::CollapsedIndividual => Some("is-comment-collapsed-individual"),
        }
    }
}
