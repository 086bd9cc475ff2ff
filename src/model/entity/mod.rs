mod course;
pub use course::{Course, CourseDetails, Introduction, PlayerEntry};

mod instructor;
pub use instructor::{Instructor, DEFAULT_INSTRUCTOR_NAME};

mod module;
pub use module::{Module, ModuleDetails};

mod lesson;
pub use lesson::{Lesson, LessonContent, LessonFile, LessonKey, TEXT_PROVIDER, YOUTUBE_PROVIDER};
