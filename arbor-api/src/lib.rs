use chrono::Utc;

pub use uuid::{uuid, Uuid};
pub type Time = chrono::DateTime<Utc>;

pub const STUB_UUID: Uuid = uuid!("ffffffff-ffff-ffff-ffff-ffffffffffff");

mod collapse;
pub use collapse::CollapseState;

mod comment;
pub use comment::{Comment, CommentId, CommentLabel, UserId};

mod error;
pub use error::Error;

mod thread;
pub use thread::{CommentOrder, Thread, Viewer};
