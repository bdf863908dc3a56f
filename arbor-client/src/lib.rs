mod comment;
pub use comment::CommentNode;

pub mod collapse;

mod initial;
pub use initial::InitialCollapse;

mod order;
pub use order::OrderExt;

mod tree;
pub use tree::CommentTree;

pub mod api {
    pub use arbor_api::*;
}

pub mod prelude {
    pub use crate::OrderExt;
}
