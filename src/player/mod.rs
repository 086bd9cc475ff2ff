//! Course tree and sequential lesson playback.

mod completion;
pub use completion::{
    COMPLETED_MESSAGE, COMPLETION_FAILED_MESSAGE, Notice, NoticeLevel, complete_lesson,
};

mod error;
pub use error::{PlayerError, PlayerResult};

mod navigator;
pub use navigator::{Advance, Cursor, Direction, LessonNavigator, Position};

mod tree;
pub use tree::CourseTree;
