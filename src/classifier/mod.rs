mod comment;
mod line;

pub use comment::{BLOCK_COMMENT_END, BLOCK_COMMENT_START, CommentDetector, LINE_COMMENT, LineScan};
pub use line::{BlockState, LineClass, LineClassifier};
