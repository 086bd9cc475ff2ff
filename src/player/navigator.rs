use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::api::CourseApi;
use crate::model::entity::{Lesson, LessonKey, Module};
use crate::player::{CourseTree, Notice, PlayerError, PlayerResult, complete_lesson};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// Neighbour of `index` in a list of `len` items.
    fn step(self, index: usize, len: usize) -> Option<usize> {
        match self {
            Self::Previous => index.checked_sub(1),
            Self::Next => index.checked_add(1).filter(|&i| i < len),
        }
    }

    /// Where to land when entering a list of `len` items from outside.
    fn entry(self, len: usize) -> Option<usize> {
        match self {
            Self::Next => (len > 0).then_some(0),
            Self::Previous => len.checked_sub(1),
        }
    }
}

/// `(module, lesson)` pair identifying what the player shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    pub module_slug: String,
    pub lesson_slug: String,
}

/// The cursor together with everything needed to render it.
#[derive(Debug, Clone)]
pub struct Position {
    module_index: usize,
    lesson_index: usize,
    module: Arc<Module>,
    lesson: Lesson,
}

impl Position {
    fn within(module_index: usize, module: Arc<Module>, lesson_index: usize) -> Option<Self> {
        let lesson = module.lessons()?.get(lesson_index)?.clone();
        Some(Self {
            module_index,
            lesson_index,
            module,
            lesson,
        })
    }

    pub fn module_index(&self) -> usize {
        self.module_index
    }

    pub fn lesson_index(&self) -> usize {
        self.lesson_index
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn lesson(&self) -> &Lesson {
        &self.lesson
    }

    fn lessons_len(&self) -> usize {
        self.module.lessons().map_or(0, <[Lesson]>::len)
    }

    pub fn cursor(&self) -> Cursor {
        Cursor {
            module_slug: self.module.slug().to_string(),
            lesson_slug: self.lesson.slug().to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Advance {
    Moved(Position),
    /// Nothing further in that direction; the cursor did not move.
    AtBoundary,
    /// Another move is still being resolved; this call was ignored.
    Busy,
}

impl Advance {
    pub fn moved(&self) -> Option<&Position> {
        match self {
            Self::Moved(position) => Some(position),
            _ => None,
        }
    }
}

/// Sequential lesson traversal over a [`CourseTree`], crossing module
/// boundaries and fetching sibling modules when needed.
///
/// Moves are serialized: while one is resolving (e.g. waiting for the next
/// module's lessons), further moves return [`Advance::Busy`]. The position is
/// replaced in a single write once the target lesson is known, so readers
/// never observe an intermediate state.
pub struct LessonNavigator<A: ?Sized> {
    tree: Arc<CourseTree<A>>,
    position: RwLock<Option<Position>>,
    gate: Mutex<()>,
}

impl<A> LessonNavigator<A>
where
    A: CourseApi + ?Sized,
{
    /// Navigator with no lesson selected yet.
    pub fn new(tree: Arc<CourseTree<A>>) -> Self {
        Self {
            tree,
            position: RwLock::new(None),
            gate: Mutex::new(()),
        }
    }

    /// Opens the first lesson of the first module that has any.
    pub async fn start(tree: Arc<CourseTree<A>>) -> PlayerResult<Self> {
        let navigator = Self::new(tree);
        if let Some(position) = navigator.seek(None, Direction::Next).await? {
            navigator.set_position(position);
        }
        Ok(navigator)
    }

    /// Opens a specific lesson, e.g. from a deep link.
    pub async fn open_at(
        tree: Arc<CourseTree<A>>,
        module_slug: &str,
        lesson_slug: &str,
    ) -> PlayerResult<Self> {
        let navigator = Self::new(tree);
        navigator.select(module_slug, lesson_slug).await?;
        Ok(navigator)
    }

    pub fn tree(&self) -> &Arc<CourseTree<A>> {
        &self.tree
    }

    pub fn position(&self) -> Option<Position> {
        self.position
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn cursor(&self) -> Option<Cursor> {
        self.position().map(|p| p.cursor())
    }

    pub fn current_lesson(&self) -> Option<Lesson> {
        self.position().map(|p| p.lesson)
    }

    /// True while a move is being resolved.
    pub fn is_busy(&self) -> bool {
        self.gate.try_lock().is_err()
    }

    fn set_position(&self, position: Position) {
        info!(
            "player at {}/{} ({}.{})",
            position.module.slug(),
            position.lesson.slug(),
            position.module_index + 1,
            position.lesson_index + 1
        );
        *self
            .position
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(position);
    }

    pub fn has_previous(&self) -> bool {
        self.position()
            .is_some_and(|p| p.module_index > 0 || p.lesson_index > 0)
    }

    pub fn has_next(&self) -> bool {
        let module_count = self.tree.modules().len();
        self.position().is_some_and(|p| {
            p.module_index + 1 < module_count || p.lesson_index + 1 < p.lessons_len()
        })
    }

    /// Jumps to `lesson_slug` of `module_slug`, fetching the module if needed.
    pub async fn select(&self, module_slug: &str, lesson_slug: &str) -> PlayerResult<Advance> {
        let Ok(_guard) = self.gate.try_lock() else {
            debug!("select ignored, another move is pending");
            return Ok(Advance::Busy);
        };

        let module_index =
            self.tree
                .module_index(module_slug)
                .ok_or_else(|| PlayerError::UnknownModule {
                    course_slug: self.tree.slug().to_string(),
                    module_slug: module_slug.to_string(),
                })?;
        let module = self.tree.module(module_slug).await?;
        let unknown_lesson = || PlayerError::UnknownLesson {
            module_slug: module_slug.to_string(),
            lesson_slug: lesson_slug.to_string(),
        };
        let lesson_index = module.lesson_index(lesson_slug).ok_or_else(unknown_lesson)?;
        let position =
            Position::within(module_index, module, lesson_index).ok_or_else(unknown_lesson)?;

        self.set_position(position.clone());
        Ok(Advance::Moved(position))
    }

    /// Moves one lesson in `direction`: inside the current module when
    /// possible, otherwise to the nearest edge lesson of the adjacent
    /// non-empty module.
    pub async fn advance(&self, direction: Direction) -> PlayerResult<Advance> {
        let Ok(_guard) = self.gate.try_lock() else {
            debug!("advance {:?} ignored, another move is pending", direction);
            return Ok(Advance::Busy);
        };

        let Some(current) = self.position() else {
            return Ok(Advance::AtBoundary);
        };

        // same module, already loaded
        let sibling = direction
            .step(current.lesson_index, current.lessons_len())
            .and_then(|index| {
                Position::within(current.module_index, Arc::clone(&current.module), index)
            });
        if let Some(position) = sibling {
            self.set_position(position.clone());
            return Ok(Advance::Moved(position));
        }

        match self.seek(Some(current.module_index), direction).await? {
            Some(position) => {
                self.set_position(position.clone());
                Ok(Advance::Moved(position))
            }
            None => {
                debug!("advance {:?} at course boundary", direction);
                Ok(Advance::AtBoundary)
            }
        }
    }

    /// First non-empty module after `from` (or from the start when `None`)
    /// in `direction`, positioned on its edge lesson.
    async fn seek(&self, from: Option<usize>, direction: Direction) -> PlayerResult<Option<Position>> {
        let modules = self.tree.modules();
        let mut candidate = match from {
            Some(index) => direction.step(index, modules.len()),
            None => direction.entry(modules.len()),
        };

        while let Some(index) = candidate {
            let Some(summary) = modules.get(index) else {
                break;
            };
            let module = self.tree.module(summary.slug()).await?;
            let len = module.lessons().map_or(0, <[Lesson]>::len);

            if let Some(position) = direction
                .entry(len)
                .and_then(|lesson_index| Position::within(index, Arc::clone(&module), lesson_index))
            {
                return Ok(Some(position));
            }

            debug!("module {} has no lessons, skipping", summary.slug());
            candidate = direction.step(index, modules.len());
        }

        Ok(None)
    }

    /// Marks the displayed lesson complete. Does not touch the cursor.
    pub async fn complete_current(&self) -> Option<Notice> {
        let cursor = self.cursor()?;
        let key = LessonKey::new(self.tree.slug(), cursor.module_slug, cursor.lesson_slug);
        Some(complete_lesson(self.tree.api().as_ref(), &key).await)
    }
}
